use serde::Serialize;

use crate::records::types::{BizType, MerchantStatus, PayType, PaymentStatus};
use crate::table::paginate::PageMarker;

#[derive(Debug, Clone, Serialize)]
pub struct PaymentRow {
    pub payment_code: String,
    pub mcht_code: String,
    pub merchant_name: String,
    pub amount: String,
    pub amount_display: String,
    pub currency: String,
    pub pay_type: PayType,
    pub pay_type_label: String,
    pub status: PaymentStatus,
    pub status_label: String,
    pub payment_at: String,
    pub payment_at_local: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MerchantRow {
    pub mcht_code: String,
    pub mcht_name: String,
    pub biz_type: BizType,
    pub biz_type_label: String,
    pub status: MerchantStatus,
    pub status_label: String,
    pub registered_at: String,
    pub registered_at_local: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MerchantProfile {
    pub mcht_code: String,
    pub mcht_name: String,
    pub biz_type: BizType,
    pub biz_type_label: String,
    pub status: MerchantStatus,
    pub status_label: String,
    pub biz_no: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub registered_at: String,
    pub registered_at_local: Option<String>,
    pub updated_at: String,
    pub updated_at_local: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PageInfo {
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
    pub first_position: usize,
    pub last_position: usize,
    pub past_end: bool,
    pub window: Vec<PageMarker>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AppliedSort {
    pub field: String,
    pub order: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PaymentFiltersApplied {
    pub search: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub pay_types: Vec<PayType>,
    pub statuses: Vec<PaymentStatus>,
    pub min_amount: Option<String>,
    pub max_amount: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct MerchantFiltersApplied {
    pub search: Option<String>,
    pub biz_types: Vec<BizType>,
    pub statuses: Vec<MerchantStatus>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CountEntry {
    pub code: String,
    pub label: String,
    pub count: usize,
    pub share_percent: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryData {
    pub total_count: usize,
    pub success_count: usize,
    pub success_rate: String,
    pub success_total: String,
    pub success_average: String,
    pub status_counts: Vec<CountEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PaymentsData {
    pub view: String,
    pub filters: PaymentFiltersApplied,
    pub sort: AppliedSort,
    pub pagination: PageInfo,
    pub summary: SummaryData,
    pub rows: Vec<PaymentRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MerchantStats {
    pub total_count: usize,
    pub by_biz_type: Vec<CountEntry>,
    pub by_status: Vec<CountEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MerchantsData {
    pub filters: MerchantFiltersApplied,
    pub sort: AppliedSort,
    pub pagination: PageInfo,
    pub stats: MerchantStats,
    pub rows: Vec<MerchantRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PaymentDetailData {
    pub payment: PaymentRow,
    pub merchant: Option<MerchantProfile>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MerchantDetailData {
    pub merchant: MerchantProfile,
}

#[derive(Debug, Clone, Serialize)]
pub struct DailyTotalRow {
    pub date: String,
    pub total: String,
    /// Plain decimal text of `total`, without grouping.
    pub total_value: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct HourlyCountRow {
    pub hour: u32,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct DayOverDayData {
    pub today: String,
    pub yesterday: String,
    pub today_total: String,
    pub yesterday_total: String,
    pub change_percent: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TopMerchantRow {
    pub rank: usize,
    pub mcht_code: String,
    pub mcht_name: String,
    pub success_total: String,
    pub success_total_value: String,
    pub success_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardData {
    pub today: String,
    pub summary: SummaryData,
    pub day_over_day: DayOverDayData,
    pub daily_totals: Vec<DailyTotalRow>,
    pub daily_window_days: usize,
    pub hourly: Vec<HourlyCountRow>,
    pub pay_types: Vec<CountEntry>,
    pub statuses: Vec<CountEntry>,
    pub top_merchants: Vec<TopMerchantRow>,
}
