pub mod aggregate;
pub mod commands;
pub mod config;
pub mod contracts;
pub mod error;
pub mod records;
pub mod source;
pub mod table;

pub use config::{ConfigOverrides, DeskConfig};
pub use contracts::envelope::{FailureEnvelope, SuccessEnvelope};
pub use error::{ClientError, ClientResult};

pub const API_VERSION: &str = env!("CARGO_PKG_VERSION");
