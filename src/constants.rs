// Audit actions
pub const TRIP_CREATED: &str = "TRIP_CREATED";
pub const TRIP_RENAMED: &str = "TRIP_RENAMED";
pub const TRIP_DELETED: &str = "TRIP_DELETED";
pub const PARTICIPANT_ADDED: &str = "PARTICIPANT_ADDED";
pub const PARTICIPANT_REMOVED: &str = "PARTICIPANT_REMOVED";
pub const TRANSACTION_ADDED: &str = "TRANSACTION_ADDED";
pub const TRANSACTION_UPDATED: &str = "TRANSACTION_UPDATED";
pub const TRANSACTION_REMOVED: &str = "TRANSACTION_REMOVED";

// Validation limits
pub const MAX_NAME_LENGTH: usize = 100;
pub const MAX_DESCRIPTION_LENGTH: usize = 255;
pub const MAX_PHONE_LENGTH: usize = 32;
pub const DEFAULT_MAX_AMOUNT: f64 = 1_000_000_000.0;
