use crate::config::PageSize;
use crate::records::amount::parse_amount_bound;
use crate::records::date::DateRange;
use crate::records::directory::MerchantDirectory;
use crate::records::types::{
    BizType, MerchantDetail, MerchantStatus, PayType, PaymentRecord, PaymentStatus,
};
use crate::table::filter::{MerchantFilter, PaymentFilter, filter_merchants, filter_payments};
use crate::table::paginate::{Page, paginate};
use crate::table::sort::{
    MerchantSortField, PaymentSortField, SortDirection, SortState, sort_merchants, sort_payments,
};

/// Table state for the payments and transactions views.
///
/// Every mutation that changes which rows are visible or their order sends
/// the view back to page 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentsView {
    filter: PaymentFilter,
    sort: SortState<PaymentSortField>,
    page: usize,
    page_size: PageSize,
}

impl PaymentsView {
    pub fn new(page_size: PageSize) -> Self {
        Self {
            filter: PaymentFilter::default(),
            sort: SortState::new(PaymentSortField::PaymentAt, SortDirection::Desc),
            page: 1,
            page_size,
        }
    }

    pub fn filter(&self) -> &PaymentFilter {
        &self.filter
    }

    pub fn sort(&self) -> SortState<PaymentSortField> {
        self.sort
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    pub fn set_search(&mut self, text: &str) {
        self.filter.search = text.to_string();
        self.page = 1;
    }

    pub fn set_date_range(&mut self, range: DateRange) {
        self.filter.date_range = range;
        self.page = 1;
    }

    pub fn toggle_pay_type(&mut self, pay_type: PayType) {
        if !self.filter.pay_types.remove(&pay_type) {
            self.filter.pay_types.insert(pay_type);
        }
        self.page = 1;
    }

    pub fn toggle_status(&mut self, status: PaymentStatus) {
        if !self.filter.statuses.remove(&status) {
            self.filter.statuses.insert(status);
        }
        self.page = 1;
    }

    /// Raw text from the min-amount box; unparsable input clears the bound.
    pub fn set_min_amount_input(&mut self, input: &str) {
        self.filter.min_amount = parse_amount_bound(input);
        self.page = 1;
    }

    pub fn set_max_amount_input(&mut self, input: &str) {
        self.filter.max_amount = parse_amount_bound(input);
        self.page = 1;
    }

    pub fn reset_filters(&mut self) {
        self.filter = PaymentFilter::default();
        self.page = 1;
    }

    pub fn sort_by(&mut self, field: PaymentSortField) {
        self.sort.toggle(field);
        self.page = 1;
    }

    pub fn set_sort(&mut self, sort: SortState<PaymentSortField>) {
        self.sort = sort;
        self.page = 1;
    }

    pub fn set_page_size(&mut self, page_size: PageSize) {
        self.page_size = page_size;
        self.page = 1;
    }

    pub fn go_to_page(&mut self, page: usize) {
        self.page = page;
    }

    /// Filter then sort. The result feeds both paging and aggregation.
    pub fn ordered_rows<'a>(
        &self,
        records: &'a [PaymentRecord],
        directory: &MerchantDirectory<'_>,
    ) -> Vec<&'a PaymentRecord> {
        let mut rows = filter_payments(records, &self.filter, directory);
        sort_payments(&mut rows, self.sort, directory);
        rows
    }

    pub fn current_page<'r, 'a>(
        &self,
        ordered: &'r [&'a PaymentRecord],
    ) -> Page<'r, &'a PaymentRecord> {
        paginate(ordered, self.page_size, self.page)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerchantsView {
    filter: MerchantFilter,
    sort: SortState<MerchantSortField>,
    page: usize,
    page_size: PageSize,
}

impl MerchantsView {
    pub fn new(page_size: PageSize) -> Self {
        Self {
            filter: MerchantFilter::default(),
            sort: SortState::new(MerchantSortField::RegisteredAt, SortDirection::Desc),
            page: 1,
            page_size,
        }
    }

    pub fn filter(&self) -> &MerchantFilter {
        &self.filter
    }

    pub fn sort(&self) -> SortState<MerchantSortField> {
        self.sort
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    pub fn set_search(&mut self, text: &str) {
        self.filter.search = text.to_string();
        self.page = 1;
    }

    pub fn toggle_biz_type(&mut self, biz_type: BizType) {
        if !self.filter.biz_types.remove(&biz_type) {
            self.filter.biz_types.insert(biz_type);
        }
        self.page = 1;
    }

    pub fn toggle_status(&mut self, status: MerchantStatus) {
        if !self.filter.statuses.remove(&status) {
            self.filter.statuses.insert(status);
        }
        self.page = 1;
    }

    pub fn reset_filters(&mut self) {
        self.filter = MerchantFilter::default();
        self.page = 1;
    }

    pub fn sort_by(&mut self, field: MerchantSortField) {
        self.sort.toggle(field);
        self.page = 1;
    }

    pub fn set_sort(&mut self, sort: SortState<MerchantSortField>) {
        self.sort = sort;
        self.page = 1;
    }

    pub fn set_page_size(&mut self, page_size: PageSize) {
        self.page_size = page_size;
        self.page = 1;
    }

    pub fn go_to_page(&mut self, page: usize) {
        self.page = page;
    }

    pub fn ordered_rows<'a>(&self, merchants: &'a [MerchantDetail]) -> Vec<&'a MerchantDetail> {
        let mut rows = filter_merchants(merchants, &self.filter);
        sort_merchants(&mut rows, self.sort);
        rows
    }

    pub fn current_page<'r, 'a>(
        &self,
        ordered: &'r [&'a MerchantDetail],
    ) -> Page<'r, &'a MerchantDetail> {
        paginate(ordered, self.page_size, self.page)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{MerchantsView, PaymentsView};
    use crate::config::PageSize;
    use crate::records::types::{BizType, PayType};
    use crate::table::sort::{PaymentSortField, SortDirection};

    #[test]
    fn starts_on_newest_payments_first() {
        let view = PaymentsView::new(PageSize::default());
        assert_eq!(view.sort().field, PaymentSortField::PaymentAt);
        assert_eq!(view.sort().direction, SortDirection::Desc);
        assert_eq!(view.page(), 1);
    }

    #[test]
    fn every_filter_change_returns_to_first_page() {
        let mut view = PaymentsView::new(PageSize::default());

        view.go_to_page(4);
        view.set_search("bottle");
        assert_eq!(view.page(), 1);

        view.go_to_page(4);
        view.toggle_pay_type(PayType::Mobile);
        assert_eq!(view.page(), 1);

        view.go_to_page(4);
        view.set_min_amount_input("1000");
        assert_eq!(view.page(), 1);

        view.go_to_page(4);
        view.sort_by(PaymentSortField::Amount);
        assert_eq!(view.page(), 1);

        view.go_to_page(4);
        view.set_page_size(PageSize::new(50).unwrap_or_default());
        assert_eq!(view.page(), 1);
    }

    #[test]
    fn toggling_a_category_twice_clears_it() {
        let mut view = MerchantsView::new(PageSize::default());
        view.toggle_biz_type(BizType::Cafe);
        assert!(view.filter().biz_types.contains(&BizType::Cafe));
        view.toggle_biz_type(BizType::Cafe);
        assert!(view.filter().biz_types.is_empty());
    }

    #[test]
    fn invalid_amount_input_is_unconstrained() {
        let mut view = PaymentsView::new(PageSize::default());
        view.set_min_amount_input("500");
        assert_eq!(view.filter().min_amount, Some(Decimal::from(500)));
        view.set_min_amount_input("5OO");
        assert_eq!(view.filter().min_amount, None);
    }

    #[test]
    fn reset_clears_filters_but_keeps_sort() {
        let mut view = PaymentsView::new(PageSize::default());
        view.sort_by(PaymentSortField::Amount);
        view.set_search("cafe");
        view.toggle_pay_type(PayType::Vact);
        view.reset_filters();
        assert!(view.filter().search.is_empty());
        assert!(view.filter().pay_types.is_empty());
        assert_eq!(view.sort().field, PaymentSortField::Amount);
    }
}
