//! Core business logic abstractions

pub mod config;
pub mod conversion;
pub mod log;
pub mod rates;

// Re-export main types for cleaner imports
pub use conversion::{ConversionResult, convert, format_conversion, invert, round4};
pub use rates::{CurrencySet, ExchangeRateService, LatestRate};
