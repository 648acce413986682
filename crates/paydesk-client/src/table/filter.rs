use std::collections::BTreeSet;

use rust_decimal::Decimal;

use crate::records::date::DateRange;
use crate::records::directory::MerchantDirectory;
use crate::records::types::{
    BizType, MerchantDetail, MerchantStatus, PayType, PaymentRecord, PaymentStatus,
};

/// Predicate parameters shared by the payments and transactions tables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentFilter {
    pub search: String,
    pub date_range: DateRange,
    pub pay_types: BTreeSet<PayType>,
    pub statuses: BTreeSet<PaymentStatus>,
    pub min_amount: Option<Decimal>,
    pub max_amount: Option<Decimal>,
}

impl PaymentFilter {
    pub fn matches(&self, record: &PaymentRecord, directory: &MerchantDirectory<'_>) -> bool {
        contains_ignore_case(directory.display_name(&record.mcht_code), &self.search)
            && self.date_range.contains(record.payment_at.local_date())
            && selected(&self.pay_types, &record.pay_type)
            && selected(&self.statuses, &record.status)
            && within_amount_bounds(record.amount.value(), self.min_amount, self.max_amount)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MerchantFilter {
    pub search: String,
    pub biz_types: BTreeSet<BizType>,
    pub statuses: BTreeSet<MerchantStatus>,
}

impl MerchantFilter {
    pub fn matches(&self, merchant: &MerchantDetail) -> bool {
        let matches_search = contains_ignore_case(&merchant.mcht_name, &self.search)
            || contains_ignore_case(&merchant.mcht_code, &self.search);
        matches_search
            && selected(&self.biz_types, &merchant.biz_type)
            && selected(&self.statuses, &merchant.status)
    }
}

pub fn filter_payments<'a>(
    records: &'a [PaymentRecord],
    filter: &PaymentFilter,
    directory: &MerchantDirectory<'_>,
) -> Vec<&'a PaymentRecord> {
    records
        .iter()
        .filter(|record| filter.matches(record, directory))
        .collect()
}

pub fn filter_merchants<'a>(
    merchants: &'a [MerchantDetail],
    filter: &MerchantFilter,
) -> Vec<&'a MerchantDetail> {
    merchants
        .iter()
        .filter(|merchant| filter.matches(merchant))
        .collect()
}

/// An empty needle matches everything.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// An empty selection is "no filter", never "exclude all".
pub fn selected<T: Ord>(selection: &BTreeSet<T>, value: &T) -> bool {
    selection.is_empty() || selection.contains(value)
}

/// Unparsable amounts cannot satisfy a bound but pass when none is set.
pub fn within_amount_bounds(
    amount: Option<Decimal>,
    min: Option<Decimal>,
    max: Option<Decimal>,
) -> bool {
    if min.is_none() && max.is_none() {
        return true;
    }
    let Some(amount) = amount else {
        return false;
    };
    min.is_none_or(|bound| amount >= bound) && max.is_none_or(|bound| amount <= bound)
}
