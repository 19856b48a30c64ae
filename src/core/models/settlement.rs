use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Net directed debt between two participants, rounded to cents.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct Settlement {
    pub from: String,
    pub to: String,
    pub amount: f64,
}

/// Directed obligation kept at full precision. Used for both the per-transaction
/// raw debts and their per-pair consolidation.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct Debt {
    pub from: String,
    pub to: String,
    pub amount: f64,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct SettlementBreakdown {
    pub raw_debts: Vec<Debt>,
    pub consolidated: Vec<Debt>,
    pub settlements: Vec<Settlement>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct NetPosition {
    pub participant_id: String,
    pub paid: f64,
    pub share: f64,
    /// `paid - share`; positive means the participant is owed money.
    pub net: f64,
}
