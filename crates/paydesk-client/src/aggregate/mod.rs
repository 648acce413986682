//! Summary statistics over a filtered payment set.
//!
//! Every view goes through these functions so that rounding and divide-by-zero
//! rules stay identical. Records with an unparsable amount are counted but
//! never summed.

pub mod buckets;
pub mod ranking;

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::records::date::previous_day;
use crate::records::types::{PaymentRecord, PaymentStatus};

pub use buckets::{DailyTotal, HourlyCount, daily_success_totals, hourly_histogram, recent_days};
pub use ranking::{
    CategoryCount, MerchantRanking, count_by_biz_type, count_by_merchant_status,
    count_by_pay_type, count_by_status, top_merchants_by_success_amount,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentSummary {
    pub total_count: usize,
    pub status_counts: BTreeMap<PaymentStatus, usize>,
    pub success_count: usize,
    pub success_rate: String,
    pub success_total: Decimal,
    pub success_average: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayOverDay {
    pub today: NaiveDate,
    pub today_total: Decimal,
    pub yesterday_total: Decimal,
    pub change_percent: String,
}

pub fn summarize(records: &[&PaymentRecord]) -> PaymentSummary {
    let mut status_counts = PaymentStatus::ALL
        .into_iter()
        .map(|status| (status, 0usize))
        .collect::<BTreeMap<PaymentStatus, usize>>();
    for record in records {
        *status_counts.entry(record.status).or_insert(0) += 1;
    }

    let success_count = status_counts
        .get(&PaymentStatus::Success)
        .copied()
        .unwrap_or(0);

    let mut success_total = Decimal::ZERO;
    let mut summed = 0usize;
    for record in records.iter().filter(|record| record.is_success()) {
        let Some(amount) = record.amount.value() else {
            continue;
        };
        if let Some(total) = add_amount(success_total, amount, &record.payment_code) {
            success_total = total;
            summed += 1;
        }
    }
    let success_average = if summed == 0 {
        Decimal::ZERO
    } else {
        success_total
            .checked_div(Decimal::from(summed))
            .map(|average| average.round_dp(2))
            .unwrap_or(Decimal::ZERO)
    };

    PaymentSummary {
        total_count: records.len(),
        status_counts,
        success_count,
        success_rate: success_rate(success_count, records.len()),
        success_total,
        success_average,
    }
}

/// `success / total * 100` to one decimal place, or `"0"` with no records.
pub fn success_rate(success_count: usize, total_count: usize) -> String {
    if total_count == 0 {
        return "0".to_string();
    }
    let rate = Decimal::from(success_count) * Decimal::ONE_HUNDRED / Decimal::from(total_count);
    format!("{:.1}", round_half_up(rate, 1))
}

/// Whole-number share used for pie slices.
pub fn share_percent(count: usize, total_count: usize) -> String {
    if total_count == 0 {
        return "0".to_string();
    }
    let share = Decimal::from(count) * Decimal::ONE_HUNDRED / Decimal::from(total_count);
    format!("{:.0}", round_half_up(share, 0))
}

/// Percentage change from `previous` to `current`; `"0"` when `previous` is zero.
pub fn percent_change(current: Decimal, previous: Decimal) -> String {
    if previous.is_zero() {
        return "0".to_string();
    }
    let change = current
        .checked_sub(previous)
        .and_then(|delta| delta.checked_div(previous))
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED));
    match change {
        Some(change) => format!("{:.1}", round_half_up(change, 1)),
        None => {
            tracing::warn!(%current, %previous, "percent change is out of range; reporting 0");
            "0".to_string()
        }
    }
}

/// SUCCESS totals for `today` and the local day before it.
pub fn day_over_day(records: &[&PaymentRecord], today: NaiveDate) -> DayOverDay {
    let yesterday = previous_day(today);
    let mut today_total = Decimal::ZERO;
    let mut yesterday_total = Decimal::ZERO;

    for record in records.iter().filter(|record| record.is_success()) {
        let (Some(date), Some(amount)) = (record.payment_at.local_date(), record.amount.value())
        else {
            continue;
        };
        let bucket = if date == today {
            &mut today_total
        } else if date == yesterday {
            &mut yesterday_total
        } else {
            continue;
        };
        if let Some(total) = add_amount(*bucket, amount, &record.payment_code) {
            *bucket = total;
        }
    }

    DayOverDay {
        today,
        today_total,
        yesterday_total,
        change_percent: percent_change(today_total, yesterday_total),
    }
}

/// Adds `amount` to a running total. An amount that would overflow the total
/// is left out, like an unparsable one, and `None` is returned.
pub(crate) fn add_amount(total: Decimal, amount: Decimal, payment_code: &str) -> Option<Decimal> {
    let sum = total.checked_add(amount);
    if sum.is_none() {
        tracing::warn!(
            payment = payment_code,
            %amount,
            "amount overflows the running total; excluding it from arithmetic"
        );
    }
    sum
}

fn round_half_up(value: Decimal, places: u32) -> Decimal {
    value.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero)
}
