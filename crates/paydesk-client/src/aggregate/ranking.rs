use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::aggregate::{add_amount, share_percent};
use crate::records::directory::MerchantDirectory;
use crate::records::types::{
    BizType, MerchantDetail, MerchantStatus, PayType, PaymentRecord, PaymentStatus,
};

/// Count of records in one category, with its whole-number share of the set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount<C> {
    pub category: C,
    pub count: usize,
    pub share_percent: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerchantRanking {
    pub mcht_code: String,
    pub mcht_name: String,
    pub success_total: Decimal,
    pub success_count: usize,
}

/// Top merchants by SUCCESS amount. Merchants with equal totals keep the
/// order in which they first appear in `records`.
pub fn top_merchants_by_success_amount(
    records: &[&PaymentRecord],
    directory: &MerchantDirectory<'_>,
    limit: usize,
) -> Vec<MerchantRanking> {
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut rankings: Vec<MerchantRanking> = Vec::new();

    for record in records.iter().filter(|record| record.is_success()) {
        let index = *slots.entry(record.mcht_code.as_str()).or_insert_with(|| {
            rankings.push(MerchantRanking {
                mcht_code: record.mcht_code.clone(),
                mcht_name: directory.display_name(&record.mcht_code).to_string(),
                success_total: Decimal::ZERO,
                success_count: 0,
            });
            rankings.len() - 1
        });
        if let Some(ranking) = rankings.get_mut(index) {
            if let Some(amount) = record.amount.value()
                && let Some(total) = add_amount(ranking.success_total, amount, &record.payment_code)
            {
                ranking.success_total = total;
            }
            ranking.success_count += 1;
        }
    }

    rankings.sort_by(|left, right| right.success_total.cmp(&left.success_total));
    rankings.truncate(limit);
    rankings
}

pub fn count_by_pay_type(records: &[&PaymentRecord]) -> Vec<CategoryCount<PayType>> {
    count_categories(&PayType::ALL, records.iter().map(|record| record.pay_type))
}

pub fn count_by_status(records: &[&PaymentRecord]) -> Vec<CategoryCount<PaymentStatus>> {
    count_categories(&PaymentStatus::ALL, records.iter().map(|record| record.status))
}

pub fn count_by_biz_type(merchants: &[MerchantDetail]) -> Vec<CategoryCount<BizType>> {
    count_categories(&BizType::ALL, merchants.iter().map(|merchant| merchant.biz_type))
}

pub fn count_by_merchant_status(merchants: &[MerchantDetail]) -> Vec<CategoryCount<MerchantStatus>> {
    count_categories(
        &MerchantStatus::ALL,
        merchants.iter().map(|merchant| merchant.status),
    )
}

/// Zero-filled counts in the declared order of `all`.
fn count_categories<C>(all: &[C], values: impl Iterator<Item = C>) -> Vec<CategoryCount<C>>
where
    C: Copy + Eq + std::hash::Hash,
{
    let mut counts: HashMap<C, usize> = HashMap::new();
    let mut total = 0usize;
    for value in values {
        *counts.entry(value).or_insert(0) += 1;
        total += 1;
    }

    all.iter()
        .map(|category| {
            let count = counts.get(category).copied().unwrap_or(0);
            CategoryCount {
                category: *category,
                count,
                share_percent: share_percent(count, total),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{count_by_pay_type, count_by_status, top_merchants_by_success_amount};
    use crate::aggregate::buckets::tests::payment;
    use crate::records::directory::MerchantDirectory;
    use crate::records::types::{PayType, PaymentRecord, PaymentStatus};

    fn at_merchant(mut record: PaymentRecord, mcht_code: &str) -> PaymentRecord {
        record.mcht_code = mcht_code.to_string();
        record
    }

    #[test]
    fn ranks_by_success_total_with_first_seen_ties() {
        let records = vec![
            at_merchant(payment("P1", "100", PaymentStatus::Success, "2024-01-01T10:00:00"), "M1"),
            at_merchant(payment("P2", "300", PaymentStatus::Success, "2024-01-01T10:00:00"), "M2"),
            at_merchant(payment("P3", "300", PaymentStatus::Success, "2024-01-01T10:00:00"), "M3"),
            at_merchant(payment("P4", "900", PaymentStatus::Failed, "2024-01-01T10:00:00"), "M1"),
            at_merchant(payment("P5", "50", PaymentStatus::Success, "2024-01-01T10:00:00"), "M1"),
        ];
        let refs = records.iter().collect::<Vec<_>>();
        let directory = MerchantDirectory::default();

        let ranking = top_merchants_by_success_amount(&refs, &directory, 10);
        let codes = ranking
            .iter()
            .map(|entry| entry.mcht_code.as_str())
            .collect::<Vec<&str>>();
        assert_eq!(codes, vec!["M2", "M3", "M1"]);
        assert_eq!(ranking[2].success_total, Decimal::from(150));
        assert_eq!(ranking[2].success_count, 2);
        assert_eq!(ranking[0].mcht_name, "M2");

        let top_one = top_merchants_by_success_amount(&refs, &directory, 1);
        assert_eq!(top_one.len(), 1);
    }

    #[test]
    fn overflowing_merchant_total_does_not_abort_ranking() {
        let max = Decimal::MAX.to_string();
        let records = vec![
            at_merchant(payment("P1", &max, PaymentStatus::Success, "2024-01-01T10:00:00"), "M1"),
            at_merchant(payment("P2", &max, PaymentStatus::Success, "2024-01-01T11:00:00"), "M1"),
            at_merchant(payment("P3", "10", PaymentStatus::Success, "2024-01-01T12:00:00"), "M2"),
        ];
        let refs = records.iter().collect::<Vec<_>>();
        let ranking = top_merchants_by_success_amount(&refs, &MerchantDirectory::default(), 10);
        assert_eq!(ranking[0].mcht_code, "M1");
        assert_eq!(ranking[0].success_total, Decimal::MAX);
        assert_eq!(ranking[0].success_count, 2);
        assert_eq!(ranking[1].success_total, Decimal::from(10));
    }

    #[test]
    fn category_counts_are_zero_filled_in_declared_order() {
        let records = vec![
            payment("P1", "100", PaymentStatus::Success, "2024-01-01T10:00:00"),
            payment("P2", "100", PaymentStatus::Failed, "2024-01-01T10:00:00"),
            payment("P3", "100", PaymentStatus::Success, "2024-01-01T10:00:00"),
        ];
        let refs = records.iter().collect::<Vec<_>>();

        let by_type = count_by_pay_type(&refs);
        assert_eq!(by_type.len(), PayType::ALL.len());
        assert_eq!(by_type[0].category, PayType::Online);
        assert_eq!(by_type[0].count, 3);
        assert_eq!(by_type[0].share_percent, "100");
        assert_eq!(by_type[1].count, 0);

        let by_status = count_by_status(&refs);
        assert_eq!(by_status[0].category, PaymentStatus::Pending);
        assert_eq!(by_status[1].count, 2);
        assert_eq!(by_status[1].share_percent, "67");
        assert_eq!(by_status[2].share_percent, "33");
    }
}
