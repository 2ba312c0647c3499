pub mod frankfurter;
pub mod http;

pub use frankfurter::FrankfurterProvider;
