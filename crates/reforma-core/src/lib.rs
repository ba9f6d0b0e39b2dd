pub mod classification;
pub mod config;
pub mod error;
pub mod simulation;
pub mod transition;
pub mod types;

#[cfg(feature = "state_tables")]
pub mod state_tables;

pub use config::ReformConfig;
pub use error::ReformaError;
pub use types::*;

/// Standard result type for all reforma operations
pub type ReformaResult<T> = Result<T, ReformaError>;
