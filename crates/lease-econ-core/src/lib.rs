pub mod error;
pub mod lease;
pub mod time_value;
pub mod types;

pub use error::LeaseEconError;
pub use types::*;

/// Standard result type for all lease-economics operations
pub type LeaseEconResult<T> = Result<T, LeaseEconError>;
