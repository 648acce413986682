use std::collections::BTreeSet;

use crate::ClientResult;
use crate::aggregate::{CategoryCount, PaymentSummary};
use crate::config::{ConfigOverrides, DeskConfig, resolve_config};
use crate::contracts::types::{
    AppliedSort, CountEntry, MerchantProfile, MerchantRow, PageInfo, PaymentRow, SummaryData,
};
use crate::error::ClientError;
use crate::records::amount::format_amount;
use crate::records::date::Timestamp;
use crate::records::directory::MerchantDirectory;
use crate::records::types::{MerchantDetail, PaymentRecord, PaymentStatus};
use crate::source::{RecordStore, SourceNeeds, load_store};
use crate::table::paginate::{Page, page_window};
use crate::table::sort::{SortDirection, SortState};

/// Configuration plus every record the view needs, loaded all-or-nothing.
pub(crate) fn load_view(
    overrides: &ConfigOverrides,
    needs: SourceNeeds,
    stdin_override: Option<String>,
) -> ClientResult<(DeskConfig, RecordStore)> {
    let config = resolve_config(overrides)?;
    let store = load_store(&config, needs, stdin_override)?;
    Ok((config, store))
}

/// Parses repeated category flags. Duplicates collapse; an unknown code is an
/// argument error listing the accepted codes.
pub(crate) fn parse_codes<T, F>(
    values: &[String],
    flag: &str,
    command: &str,
    accepted: &[&str],
    parse: F,
) -> ClientResult<BTreeSet<T>>
where
    T: Ord,
    F: Fn(&str) -> Option<T>,
{
    let mut parsed = BTreeSet::new();
    for value in values {
        let Some(code) = parse(value) else {
            return Err(ClientError::invalid_argument_for_command(
                &format!(
                    "`--{flag}` does not accept `{value}`. Use one of: {}.",
                    accepted.join(", ")
                ),
                Some(command),
            ));
        };
        parsed.insert(code);
    }
    Ok(parsed)
}

/// Resolves `--sort`/`--order` against a view's default. A field given
/// without an order starts ascending, like clicking a new column header.
pub(crate) fn resolve_sort<F, P>(
    default: SortState<F>,
    field: Option<&str>,
    order: Option<&str>,
    command: &str,
    accepted: &[&str],
    parse: P,
) -> ClientResult<SortState<F>>
where
    F: Copy + Eq,
    P: Fn(&str) -> Option<F>,
{
    let direction = match order {
        Some(value) => Some(SortDirection::parse(value).ok_or_else(|| {
            ClientError::invalid_argument_for_command(
                &format!("`--order` does not accept `{value}`. Use `asc` or `desc`."),
                Some(command),
            )
        })?),
        None => None,
    };

    match field {
        Some(value) => {
            let parsed = parse(value).ok_or_else(|| {
                ClientError::invalid_argument_for_command(
                    &format!(
                        "`--sort` does not accept `{value}`. Use one of: {}.",
                        accepted.join(", ")
                    ),
                    Some(command),
                )
            })?;
            Ok(SortState::new(
                parsed,
                direction.unwrap_or(SortDirection::Asc),
            ))
        }
        None => Ok(SortState::new(
            default.field,
            direction.unwrap_or(default.direction),
        )),
    }
}

pub(crate) fn applied_sort(field: &str, direction: SortDirection) -> AppliedSort {
    AppliedSort {
        field: field.to_string(),
        order: direction.as_str().to_string(),
    }
}

pub(crate) fn page_info<T>(page: &Page<'_, T>) -> PageInfo {
    PageInfo {
        page: page.page,
        page_size: page.page_size,
        total_items: page.total_items,
        total_pages: page.total_pages,
        first_position: page.first_position(),
        last_position: page.last_position(),
        past_end: page.is_past_end(),
        window: page_window(page.page.max(1), page.total_pages),
    }
}

pub(crate) fn payment_row(record: &PaymentRecord, directory: &MerchantDirectory<'_>) -> PaymentRow {
    PaymentRow {
        payment_code: record.payment_code.clone(),
        mcht_code: record.mcht_code.clone(),
        merchant_name: directory.display_name(&record.mcht_code).to_string(),
        amount: record.amount.raw().to_string(),
        amount_display: record.amount.display(),
        currency: record.currency.clone(),
        pay_type: record.pay_type,
        pay_type_label: record.pay_type.label().to_string(),
        status: record.status,
        status_label: record.status.label().to_string(),
        payment_at: record.payment_at.raw().to_string(),
        payment_at_local: local_text(&record.payment_at),
    }
}

pub(crate) fn merchant_row(merchant: &MerchantDetail) -> MerchantRow {
    MerchantRow {
        mcht_code: merchant.mcht_code.clone(),
        mcht_name: merchant.mcht_name.clone(),
        biz_type: merchant.biz_type,
        biz_type_label: merchant.biz_type.label().to_string(),
        status: merchant.status,
        status_label: merchant.status.label().to_string(),
        registered_at: merchant.registered_at.raw().to_string(),
        registered_at_local: local_text(&merchant.registered_at),
    }
}

pub(crate) fn merchant_profile(merchant: &MerchantDetail) -> MerchantProfile {
    MerchantProfile {
        mcht_code: merchant.mcht_code.clone(),
        mcht_name: merchant.mcht_name.clone(),
        biz_type: merchant.biz_type,
        biz_type_label: merchant.biz_type.label().to_string(),
        status: merchant.status,
        status_label: merchant.status.label().to_string(),
        biz_no: merchant.biz_no.clone(),
        address: merchant.address.clone(),
        phone: merchant.phone.clone(),
        email: merchant.email.clone(),
        registered_at: merchant.registered_at.raw().to_string(),
        registered_at_local: local_text(&merchant.registered_at),
        updated_at: merchant.updated_at.raw().to_string(),
        updated_at_local: local_text(&merchant.updated_at),
    }
}

pub(crate) fn summary_data(summary: &PaymentSummary) -> SummaryData {
    let status_counts = PaymentStatus::ALL
        .into_iter()
        .map(|status| {
            let count = summary.status_counts.get(&status).copied().unwrap_or(0);
            CountEntry {
                code: status.code().to_string(),
                label: status.label().to_string(),
                count,
                share_percent: crate::aggregate::share_percent(count, summary.total_count),
            }
        })
        .collect();

    SummaryData {
        total_count: summary.total_count,
        success_count: summary.success_count,
        success_rate: summary.success_rate.clone(),
        success_total: format_amount(summary.success_total),
        success_average: format_amount(summary.success_average),
        status_counts,
    }
}

pub(crate) fn count_entries<C, K, L>(counts: &[CategoryCount<C>], code: K, label: L) -> Vec<CountEntry>
where
    C: Copy,
    K: Fn(C) -> &'static str,
    L: Fn(C) -> &'static str,
{
    counts
        .iter()
        .map(|entry| CountEntry {
            code: code(entry.category).to_string(),
            label: label(entry.category).to_string(),
            count: entry.count,
            share_percent: entry.share_percent.clone(),
        })
        .collect()
}

fn local_text(timestamp: &Timestamp) -> Option<String> {
    timestamp.local().map(|_| timestamp.display())
}
