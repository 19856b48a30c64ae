use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub title: String,
    pub description: String,
}

/// Failure raised by the settlement calculator. The whole computation is
/// abandoned; no partial settlement list is ever returned.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SplitError {
    /// The transaction resolved to an empty sharing set, so its amount cannot
    /// be divided.
    #[error("Invalid transaction {transaction_id}: sharing set is empty")]
    EmptySharingSet { transaction_id: String },

    /// The payer is not one of the group participants.
    #[error("Invalid transaction {transaction_id}: payer {payer} is not a group participant")]
    UnknownPayer { transaction_id: String, payer: String },
}

impl SplitError {
    pub fn transaction_id(&self) -> &str {
        match self {
            SplitError::EmptySharingSet { transaction_id } | SplitError::UnknownPayer { transaction_id, .. } => {
                transaction_id
            }
        }
    }
}

#[derive(Error, Debug, Serialize)]
pub enum TripSplitError {
    #[error("Trip {0} not found")]
    TripNotFound(String),

    #[error("Participant {0} not found")]
    ParticipantNotFound(String),

    #[error("Transaction {0} not found")]
    TransactionNotFound(String),

    /// Participant is still referenced by a recorded transaction
    #[error("Participant {0} is referenced by existing transactions")]
    ParticipantInUse(String),

    #[error(transparent)]
    InvalidTransaction(#[from] SplitError),

    #[error("Invalid input for field `{0}`: {1:?}")]
    InvalidInput(String, FieldError),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Logging error: {0}")]
    LoggingError(String),
}

impl TripSplitError {
    pub fn invalid_input(field: &str, title: impl Into<String>, description: impl Into<String>) -> Self {
        TripSplitError::InvalidInput(
            field.to_string(),
            FieldError {
                field: field.to_string(),
                title: title.into(),
                description: description.into(),
            },
        )
    }
}
