use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One recorded expense. An empty `participants` list means the amount is
/// shared by every participant of the group at computation time.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct Transaction {
    pub id: String,
    pub payer: String,
    pub amount: f64,
    #[serde(default)]
    pub participants: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
}

impl Transaction {
    pub fn new(id: impl Into<String>, payer: impl Into<String>, amount: f64, participants: Vec<String>) -> Self {
        Transaction {
            id: id.into(),
            payer: payer.into(),
            amount,
            participants,
            description: String::new(),
            date: None,
        }
    }

    /// Resolves the sentinel: the explicit list when present, the whole group otherwise.
    pub fn sharing_set<'a>(&'a self, group_participant_ids: &'a [String]) -> &'a [String] {
        if self.participants.is_empty() {
            group_participant_ids
        } else {
            &self.participants
        }
    }

    pub fn references(&self, participant_id: &str) -> bool {
        self.payer == participant_id || self.participants.iter().any(|p| p == participant_id)
    }
}

/// Caller-supplied fields of a transaction; the service assigns the id.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct NewTransaction {
    pub payer: String,
    pub amount: f64,
    #[serde(default)]
    pub participants: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
}

impl NewTransaction {
    pub fn into_transaction(self, id: String) -> Transaction {
        Transaction {
            id,
            payer: self.payer,
            amount: self.amount,
            participants: self.participants,
            description: self.description,
            date: self.date,
        }
    }
}
