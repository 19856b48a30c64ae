use super::participant::Participant;
use super::transaction::Transaction;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Trip {
    pub id: String,
    pub name: String,
    pub currency: String,
    pub created_at: DateTime<Utc>,
    pub participants: Vec<Participant>,
    pub transactions: Vec<Transaction>,
}

/// Owned copy of the data the calculator needs. Taken once per computation so
/// that later edits to the trip cannot affect a calculation in flight.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct LedgerSnapshot {
    pub participant_ids: Vec<String>,
    pub transactions: Vec<Transaction>,
}

impl Trip {
    pub fn participant(&self, participant_id: &str) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == participant_id)
    }

    pub fn is_participant(&self, participant_id: &str) -> bool {
        self.participant(participant_id).is_some()
    }

    pub fn participant_ids(&self) -> Vec<String> {
        self.participants.iter().map(|p| p.id.clone()).collect()
    }

    pub fn total_amount(&self) -> f64 {
        self.transactions.iter().map(|t| t.amount).sum()
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            participant_ids: self.participant_ids(),
            transactions: self.transactions.clone(),
        }
    }
}
