use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::aggregate::add_amount;
use crate::records::types::PaymentRecord;

const HOURS_PER_DAY: usize = 24;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub total: Decimal,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourlyCount {
    pub hour: u32,
    pub count: usize,
}

/// SUCCESS totals per local date, covering every day from the earliest to the
/// latest SUCCESS record. Days without payments appear with zero totals so
/// charts never skip over them.
pub fn daily_success_totals(records: &[&PaymentRecord]) -> Vec<DailyTotal> {
    let mut by_day: BTreeMap<NaiveDate, (Decimal, usize)> = BTreeMap::new();
    for record in records.iter().filter(|record| record.is_success()) {
        let Some(date) = record.payment_at.local_date() else {
            continue;
        };
        let entry = by_day.entry(date).or_insert((Decimal::ZERO, 0));
        if let Some(amount) = record.amount.value()
            && let Some(total) = add_amount(entry.0, amount, &record.payment_code)
        {
            entry.0 = total;
        }
        entry.1 += 1;
    }

    let (Some(first), Some(last)) = (
        by_day.keys().next().copied(),
        by_day.keys().next_back().copied(),
    ) else {
        return Vec::new();
    };

    first
        .iter_days()
        .take_while(|date| *date <= last)
        .map(|date| {
            let (total, count) = by_day.get(&date).copied().unwrap_or((Decimal::ZERO, 0));
            DailyTotal { date, total, count }
        })
        .collect()
}

/// The trailing `days` buckets of a daily series.
pub fn recent_days(series: &[DailyTotal], days: usize) -> &[DailyTotal] {
    &series[series.len().saturating_sub(days)..]
}

/// Record counts per local hour of day, every status included.
pub fn hourly_histogram(records: &[&PaymentRecord]) -> Vec<HourlyCount> {
    let mut counts = [0usize; HOURS_PER_DAY];
    for record in records {
        if let Some(hour) = record.payment_at.local_hour()
            && let Some(slot) = counts.get_mut(hour as usize)
        {
            *slot += 1;
        }
    }

    counts
        .iter()
        .enumerate()
        .map(|(hour, count)| HourlyCount {
            hour: hour as u32,
            count: *count,
        })
        .collect()
}
