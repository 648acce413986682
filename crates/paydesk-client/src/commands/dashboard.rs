use chrono::{NaiveDate, Utc};

use crate::ClientResult;
use crate::aggregate::{
    count_by_pay_type, count_by_status, daily_success_totals, day_over_day, hourly_histogram,
    recent_days, summarize, top_merchants_by_success_amount,
};
use crate::commands::common::{count_entries, load_view, summary_data};
use crate::config::ConfigOverrides;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{
    DailyTotalRow, DashboardData, DayOverDayData, HourlyCountRow, TopMerchantRow,
};
use crate::records::amount::format_amount;
use crate::records::date::{format_iso_date, parse_iso_date_strict, previous_day};
use crate::records::directory::MerchantDirectory;
use crate::records::types::{PayType, PaymentRecord, PaymentStatus};
use crate::source::SourceNeeds;

const CHART_WINDOW_DAYS: usize = 7;
const TOP_MERCHANT_LIMIT: usize = 10;

#[derive(Debug, Default)]
pub struct DashboardRunOptions {
    pub today: Option<String>,
    pub config: ConfigOverrides,
    pub stdin_override: Option<String>,
}

pub fn run(today: Option<&str>, config: ConfigOverrides) -> ClientResult<SuccessEnvelope> {
    run_with_options(DashboardRunOptions {
        today: today.map(std::string::ToString::to_string),
        config,
        stdin_override: None,
    })
}

#[doc(hidden)]
pub fn run_with_options(options: DashboardRunOptions) -> ClientResult<SuccessEnvelope> {
    let pinned_today = match options.today.as_deref() {
        Some(value) => Some(parse_iso_date_strict(value, "today", "dashboard")?),
        None => None,
    };
    let (config, store) = load_view(
        &options.config,
        SourceNeeds::PAYMENTS_WITH_MERCHANTS,
        options.stdin_override,
    )?;
    let today = pinned_today
        .unwrap_or_else(|| Utc::now().with_timezone(&config.utc_offset).date_naive());

    let directory = MerchantDirectory::new(&store.merchants);
    let records = store.payments.iter().collect::<Vec<&PaymentRecord>>();
    let data = build_dashboard(&records, &directory, today);
    tracing::debug!(
        payments = records.len(),
        days = data.daily_totals.len(),
        today = %data.today,
        "dashboard aggregated"
    );
    success("dashboard", data)
}

fn build_dashboard(
    records: &[&PaymentRecord],
    directory: &MerchantDirectory<'_>,
    today: NaiveDate,
) -> DashboardData {
    let summary = summarize(records);
    let change = day_over_day(records, today);
    let series = daily_success_totals(records);

    DashboardData {
        today: format_iso_date(&today),
        summary: summary_data(&summary),
        day_over_day: DayOverDayData {
            today: format_iso_date(&change.today),
            yesterday: format_iso_date(&previous_day(change.today)),
            today_total: format_amount(change.today_total),
            yesterday_total: format_amount(change.yesterday_total),
            change_percent: change.change_percent,
        },
        daily_totals: recent_days(&series, CHART_WINDOW_DAYS)
            .iter()
            .map(|day| DailyTotalRow {
                date: format_iso_date(&day.date),
                total: format_amount(day.total),
                total_value: day.total.normalize().to_string(),
                count: day.count,
            })
            .collect(),
        daily_window_days: CHART_WINDOW_DAYS,
        hourly: hourly_histogram(records)
            .into_iter()
            .map(|bucket| HourlyCountRow {
                hour: bucket.hour,
                count: bucket.count,
            })
            .collect(),
        pay_types: count_entries(&count_by_pay_type(records), PayType::code, PayType::label),
        statuses: count_entries(
            &count_by_status(records),
            PaymentStatus::code,
            PaymentStatus::label,
        ),
        top_merchants: top_merchants_by_success_amount(records, directory, TOP_MERCHANT_LIMIT)
            .into_iter()
            .enumerate()
            .map(|(index, ranking)| TopMerchantRow {
                rank: index + 1,
                mcht_code: ranking.mcht_code,
                mcht_name: ranking.mcht_name,
                success_total: format_amount(ranking.success_total),
                success_total_value: ranking.success_total.normalize().to_string(),
                success_count: ranking.success_count,
            })
            .collect(),
    }
}
