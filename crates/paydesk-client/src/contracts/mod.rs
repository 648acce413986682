pub mod envelope;
pub mod types;
