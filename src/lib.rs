pub mod api;
pub mod config;
pub mod constants;
pub mod core;
pub mod infrastructure;

pub use crate::core::calculator::{SplitCalculator, round_currency};
pub use crate::core::errors::{SplitError, TripSplitError};
pub use crate::core::services::TripService;
pub use infrastructure::logging::in_memory::InMemoryLogging;
pub use infrastructure::storage::in_memory::InMemoryStorage;

#[cfg(test)]
mod tests;
