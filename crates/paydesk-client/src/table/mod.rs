pub mod filter;
pub mod paginate;
pub mod sort;
pub mod view;

pub use filter::{MerchantFilter, PaymentFilter};
pub use paginate::{Page, PageMarker, page_window, paginate};
pub use sort::{MerchantSortField, PaymentSortField, SortDirection, SortState};
pub use view::{MerchantsView, PaymentsView};
