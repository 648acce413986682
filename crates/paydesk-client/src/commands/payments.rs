use crate::aggregate::summarize;
use crate::commands::common::{
    applied_sort, load_view, merchant_profile, page_info, parse_codes, payment_row, resolve_sort,
    summary_data,
};
use crate::config::{ConfigOverrides, PageSize, resolve_config};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{PaymentDetailData, PaymentFiltersApplied, PaymentsData};
use crate::records::amount::format_amount;
use crate::records::date::{build_date_range, format_iso_date};
use crate::records::directory::MerchantDirectory;
use crate::records::types::{PayType, PaymentStatus};
use crate::source::{SourceNeeds, load_store};
use crate::table::sort::PaymentSortField;
use crate::table::view::PaymentsView;
use crate::{ClientError, ClientResult};

/// Table arguments for the payments list.
#[derive(Debug, Clone, Default)]
pub struct PaymentsQuery {
    pub search: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub pay_types: Vec<String>,
    pub statuses: Vec<String>,
    pub min_amount: Option<String>,
    pub max_amount: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
    pub page: Option<usize>,
}

#[derive(Debug, Default)]
pub struct PaymentsRunOptions {
    pub query: PaymentsQuery,
    pub config: ConfigOverrides,
    pub stdin_override: Option<String>,
}

#[derive(Debug, Default)]
pub struct PaymentShowOptions {
    pub payment_code: String,
    pub config: ConfigOverrides,
    pub stdin_override: Option<String>,
}

pub fn run(query: PaymentsQuery, config: ConfigOverrides) -> ClientResult<SuccessEnvelope> {
    run_with_options(PaymentsRunOptions {
        query,
        config,
        stdin_override: None,
    })
}

#[doc(hidden)]
pub fn run_with_options(options: PaymentsRunOptions) -> ClientResult<SuccessEnvelope> {
    let data = build_payments_data(
        "payments",
        &options.query,
        &options.config,
        options.stdin_override,
    )?;
    success("payments", data)
}

pub fn show(payment_code: &str, config: ConfigOverrides) -> ClientResult<SuccessEnvelope> {
    show_with_options(PaymentShowOptions {
        payment_code: payment_code.to_string(),
        config,
        stdin_override: None,
    })
}

#[doc(hidden)]
pub fn show_with_options(options: PaymentShowOptions) -> ClientResult<SuccessEnvelope> {
    let code = options.payment_code.trim();
    if code.is_empty() {
        return Err(ClientError::invalid_argument_for_command(
            "A payment code is required.",
            Some("payments show"),
        ));
    }

    let (_config, store) = load_view(
        &options.config,
        SourceNeeds::PAYMENTS_WITH_MERCHANTS,
        options.stdin_override,
    )?;
    let directory = MerchantDirectory::new(&store.merchants);
    let record = store
        .payments
        .iter()
        .find(|record| record.payment_code == code)
        .ok_or_else(|| ClientError::record_not_found("payment", code))?;

    let data = PaymentDetailData {
        payment: payment_row(record, &directory),
        merchant: directory.get(&record.mcht_code).map(merchant_profile),
    };
    success("payments show", data)
}

/// Shared by the payments and transactions commands; `command` names the view
/// in errors and output.
pub(crate) fn build_payments_data(
    command: &str,
    query: &PaymentsQuery,
    overrides: &ConfigOverrides,
    stdin_override: Option<String>,
) -> ClientResult<PaymentsData> {
    let config = resolve_config(overrides)?;
    let view = build_view(command, query, config.page_size)?;
    let store = load_store(&config, SourceNeeds::PAYMENTS_WITH_MERCHANTS, stdin_override)?;

    let directory = MerchantDirectory::new(&store.merchants);
    let ordered = view.ordered_rows(&store.payments, &directory);
    let page = view.current_page(&ordered);
    tracing::debug!(
        view = command,
        loaded = store.payments.len(),
        matched = ordered.len(),
        page = page.page,
        "payments pipeline finished"
    );

    let filter = view.filter();
    let filters = PaymentFiltersApplied {
        search: (!filter.search.is_empty()).then(|| filter.search.clone()),
        from: filter.date_range.from.as_ref().map(format_iso_date),
        to: filter.date_range.to.as_ref().map(format_iso_date),
        pay_types: filter.pay_types.iter().copied().collect(),
        statuses: filter.statuses.iter().copied().collect(),
        min_amount: filter.min_amount.map(format_amount),
        max_amount: filter.max_amount.map(format_amount),
    };

    Ok(PaymentsData {
        view: command.to_string(),
        filters,
        sort: applied_sort(view.sort().field.as_str(), view.sort().direction),
        pagination: page_info(&page),
        summary: summary_data(&summarize(&ordered)),
        rows: page
            .items
            .iter()
            .map(|record| payment_row(record, &directory))
            .collect(),
    })
}

fn build_view(
    command: &str,
    query: &PaymentsQuery,
    page_size: PageSize,
) -> ClientResult<PaymentsView> {
    let pay_types = parse_codes(
        &query.pay_types,
        "pay-type",
        command,
        &PayType::ALL.map(PayType::code),
        PayType::from_code,
    )?;
    let statuses = parse_codes(
        &query.statuses,
        "status",
        command,
        &PaymentStatus::ALL.map(PaymentStatus::code),
        PaymentStatus::from_code,
    )?;
    let date_range = build_date_range(query.from.as_deref(), query.to.as_deref(), command)?;

    let mut view = PaymentsView::new(page_size);
    let sort = resolve_sort(
        view.sort(),
        query.sort.as_deref(),
        query.order.as_deref(),
        command,
        &PaymentSortField::ALL.map(PaymentSortField::as_str),
        PaymentSortField::parse,
    )?;
    view.set_sort(sort);

    if let Some(search) = &query.search {
        view.set_search(search.trim());
    }
    view.set_date_range(date_range);
    for pay_type in pay_types {
        view.toggle_pay_type(pay_type);
    }
    for status in statuses {
        view.toggle_status(status);
    }
    if let Some(min) = &query.min_amount {
        view.set_min_amount_input(min);
    }
    if let Some(max) = &query.max_amount {
        view.set_max_amount_input(max);
    }

    view.go_to_page(query.page.unwrap_or(1));
    Ok(view)
}
