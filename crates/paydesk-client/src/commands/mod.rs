pub(crate) mod common;
pub mod dashboard;
pub mod merchants;
pub mod payments;
pub mod transactions;
