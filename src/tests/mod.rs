mod api_tests;
mod property_tests;

use crate::constants::DEFAULT_MAX_AMOUNT;
use crate::core::models::settlement::Settlement;
use crate::core::models::transaction::Transaction;
use crate::core::services::TripService;
use crate::infrastructure::logging::in_memory::InMemoryLogging;
use crate::infrastructure::storage::in_memory::InMemoryStorage;

pub fn create_test_service() -> TripService<InMemoryLogging, InMemoryStorage> {
    let storage = InMemoryStorage::new();
    let logging = InMemoryLogging::new();
    TripService::new(storage, logging, DEFAULT_MAX_AMOUNT)
}

pub fn ids(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

pub fn tx(id: &str, payer: &str, amount: f64, participants: &[&str]) -> Transaction {
    Transaction::new(id, payer, amount, ids(participants))
}

pub fn settlement(from: &str, to: &str, amount: f64) -> Settlement {
    Settlement {
        from: from.to_string(),
        to: to.to_string(),
        amount,
    }
}
