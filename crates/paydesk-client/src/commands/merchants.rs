use crate::aggregate::ranking::{count_by_biz_type, count_by_merchant_status};
use crate::commands::common::{
    applied_sort, count_entries, load_view, merchant_profile, merchant_row, page_info,
    parse_codes, resolve_sort,
};
use crate::config::{ConfigOverrides, PageSize, resolve_config};
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{MerchantDetailData, MerchantFiltersApplied, MerchantStats, MerchantsData};
use crate::records::types::{BizType, MerchantDetail, MerchantStatus};
use crate::source::{SourceNeeds, load_store};
use crate::table::sort::MerchantSortField;
use crate::table::view::MerchantsView;
use crate::{ClientError, ClientResult};

#[derive(Debug, Clone, Default)]
pub struct MerchantsQuery {
    pub search: Option<String>,
    pub biz_types: Vec<String>,
    pub statuses: Vec<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
    pub page: Option<usize>,
}

#[derive(Debug, Default)]
pub struct MerchantsRunOptions {
    pub query: MerchantsQuery,
    pub config: ConfigOverrides,
    pub stdin_override: Option<String>,
}

#[derive(Debug, Default)]
pub struct MerchantShowOptions {
    pub mcht_code: String,
    pub config: ConfigOverrides,
    pub stdin_override: Option<String>,
}

pub fn run(query: MerchantsQuery, config: ConfigOverrides) -> ClientResult<SuccessEnvelope> {
    run_with_options(MerchantsRunOptions {
        query,
        config,
        stdin_override: None,
    })
}

#[doc(hidden)]
pub fn run_with_options(options: MerchantsRunOptions) -> ClientResult<SuccessEnvelope> {
    let config = resolve_config(&options.config)?;
    let view = build_view(&options.query, config.page_size)?;
    let store = load_store(&config, SourceNeeds::MERCHANTS_ONLY, options.stdin_override)?;

    let ordered = view.ordered_rows(&store.merchants);
    let page = view.current_page(&ordered);
    tracing::debug!(
        loaded = store.merchants.len(),
        matched = ordered.len(),
        page = page.page,
        "merchants pipeline finished"
    );

    let filter = view.filter();
    let data = MerchantsData {
        filters: MerchantFiltersApplied {
            search: (!filter.search.is_empty()).then(|| filter.search.clone()),
            biz_types: filter.biz_types.iter().copied().collect(),
            statuses: filter.statuses.iter().copied().collect(),
        },
        sort: applied_sort(view.sort().field.as_str(), view.sort().direction),
        pagination: page_info(&page),
        stats: merchant_stats(&store.merchants),
        rows: page.items.iter().map(|merchant| merchant_row(merchant)).collect(),
    };
    success("merchants", data)
}

pub fn show(mcht_code: &str, config: ConfigOverrides) -> ClientResult<SuccessEnvelope> {
    show_with_options(MerchantShowOptions {
        mcht_code: mcht_code.to_string(),
        config,
        stdin_override: None,
    })
}

#[doc(hidden)]
pub fn show_with_options(options: MerchantShowOptions) -> ClientResult<SuccessEnvelope> {
    let code = options.mcht_code.trim();
    if code.is_empty() {
        return Err(ClientError::invalid_argument_for_command(
            "A merchant code is required.",
            Some("merchants show"),
        ));
    }

    let (_config, store) = load_view(
        &options.config,
        SourceNeeds::MERCHANTS_ONLY,
        options.stdin_override,
    )?;
    let merchant = store
        .merchants
        .iter()
        .find(|merchant| merchant.mcht_code == code)
        .ok_or_else(|| ClientError::record_not_found("merchant", code))?;

    success(
        "merchants show",
        MerchantDetailData {
            merchant: merchant_profile(merchant),
        },
    )
}

/// Stat cards count every loaded merchant, not just the filtered ones.
fn merchant_stats(merchants: &[MerchantDetail]) -> MerchantStats {
    MerchantStats {
        total_count: merchants.len(),
        by_biz_type: count_entries(&count_by_biz_type(merchants), BizType::code, BizType::label),
        by_status: count_entries(
            &count_by_merchant_status(merchants),
            MerchantStatus::code,
            MerchantStatus::label,
        ),
    }
}

fn build_view(query: &MerchantsQuery, page_size: PageSize) -> ClientResult<MerchantsView> {
    let biz_types = parse_codes(
        &query.biz_types,
        "biz-type",
        "merchants",
        &BizType::ALL.map(BizType::code),
        BizType::from_code,
    )?;
    let statuses = parse_codes(
        &query.statuses,
        "status",
        "merchants",
        &MerchantStatus::ALL.map(MerchantStatus::code),
        MerchantStatus::from_code,
    )?;

    let mut view = MerchantsView::new(page_size);
    let sort = resolve_sort(
        view.sort(),
        query.sort.as_deref(),
        query.order.as_deref(),
        "merchants",
        &MerchantSortField::ALL.map(MerchantSortField::as_str),
        MerchantSortField::parse,
    )?;
    view.set_sort(sort);

    if let Some(search) = &query.search {
        view.set_search(search.trim());
    }
    for biz_type in biz_types {
        view.toggle_biz_type(biz_type);
    }
    for status in statuses {
        view.toggle_status(status);
    }

    view.go_to_page(query.page.unwrap_or(1));
    Ok(view)
}
