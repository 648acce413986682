pub mod amount;
pub mod date;
pub mod directory;
pub mod types;

pub use amount::Amount;
pub use date::{DateRange, Timestamp};
pub use directory::MerchantDirectory;
pub use types::{
    BizType, MerchantDetail, MerchantStatus, MerchantWire, PayType, PaymentRecord, PaymentStatus,
    PaymentWire,
};
