use crate::constants::{
    MAX_DESCRIPTION_LENGTH, MAX_NAME_LENGTH, MAX_PHONE_LENGTH, PARTICIPANT_ADDED, PARTICIPANT_REMOVED,
    TRANSACTION_ADDED, TRANSACTION_REMOVED, TRANSACTION_UPDATED, TRIP_CREATED, TRIP_DELETED, TRIP_RENAMED,
};
use crate::core::calculator::SplitCalculator;
use crate::core::errors::TripSplitError;
use crate::core::models::{
    audit::AppLog,
    participant::{NewParticipant, Participant},
    settlement::{NetPosition, Settlement, SettlementBreakdown},
    transaction::{NewTransaction, Transaction},
    trip::Trip,
};
use crate::infrastructure::logging::LoggingService;
use crate::infrastructure::storage::Storage;
use chrono::Utc;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::HashSet;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug, ToSchema, Clone)]
pub struct TripSummary {
    pub trip_id: String,
    pub currency: String,
    pub total_amount: f64,
    pub per_person_share: f64,
    pub positions: Vec<NetPosition>,
    pub settlements: Vec<Settlement>,
}

pub struct TripService<L: LoggingService, S: Storage> {
    storage: S,
    logging: L,
    max_amount: f64,
}

impl<L: LoggingService, S: Storage> TripService<L, S> {
    pub fn new(storage: S, logging: L, max_amount: f64) -> Self {
        info!("Initializing TripService");
        TripService {
            storage,
            logging,
            max_amount,
        }
    }

    async fn load_trip(&self, trip_id: &str) -> Result<Trip, TripSplitError> {
        self.storage
            .get_trip(trip_id)
            .await?
            .ok_or_else(|| TripSplitError::TripNotFound(trip_id.to_string()))
    }

    fn validate_string_input(&self, field: &str, value: &str, max_length: usize) -> Result<(), TripSplitError> {
        if value.trim().is_empty() {
            return Err(TripSplitError::invalid_input(
                field,
                format!("Invalid {}", field),
                format!("{} cannot be empty", field),
            ));
        }
        if value.chars().count() > max_length {
            return Err(TripSplitError::invalid_input(
                field,
                format!("{} Too Long", field),
                format!("{} cannot exceed {} characters", field, max_length),
            ));
        }
        if value.chars().any(|c| c.is_control() || "<>{}[]".contains(c)) {
            return Err(TripSplitError::invalid_input(
                field,
                format!("Invalid {}", field),
                format!("{} contains invalid characters", field),
            ));
        }
        Ok(())
    }

    fn validate_person_name(&self, field: &str, value: &str) -> Result<(), TripSplitError> {
        self.validate_string_input(field, value, MAX_NAME_LENGTH)?;
        if !value
            .chars()
            .all(|c| c.is_ascii_alphabetic() || c.is_whitespace() || c == '-' || c == '\'')
        {
            return Err(TripSplitError::invalid_input(
                field,
                format!("Invalid {}", field),
                format!("{} may only contain letters, spaces, hyphens and apostrophes", field),
            ));
        }
        Ok(())
    }

    fn validate_currency(&self, currency: &str) -> Result<String, TripSplitError> {
        let code = currency.trim().to_ascii_uppercase();
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(TripSplitError::invalid_input(
                "currency",
                "Invalid Currency",
                "Currency must be a three-letter ISO code",
            ));
        }
        Ok(code)
    }

    fn validate_amount_input(&self, field: &str, amount: f64) -> Result<(), TripSplitError> {
        if !amount.is_finite() {
            return Err(TripSplitError::invalid_input(
                field,
                "Invalid Amount",
                "Amount must be a finite number",
            ));
        }
        if amount < 0.0 {
            return Err(TripSplitError::invalid_input(
                field,
                "Invalid Amount",
                "Amount cannot be negative",
            ));
        }
        if amount > self.max_amount {
            return Err(TripSplitError::invalid_input(
                field,
                "Amount Too Large",
                format!("Amount cannot exceed {}", self.max_amount),
            ));
        }
        Ok(())
    }

    fn validate_transaction(&self, trip: &Trip, input: &NewTransaction) -> Result<(), TripSplitError> {
        self.validate_amount_input("amount", input.amount)?;
        if !input.description.is_empty() {
            self.validate_string_input("description", &input.description, MAX_DESCRIPTION_LENGTH)?;
        }
        if !trip.is_participant(&input.payer) {
            warn!("Payer {} not in trip {}", input.payer, trip.id);
            return Err(TripSplitError::invalid_input(
                "payer",
                "Unknown Payer",
                format!("{} is not a participant of this trip", input.payer),
            ));
        }

        let mut seen = HashSet::new();
        for participant_id in &input.participants {
            if !trip.is_participant(participant_id) {
                warn!("Sharer {} not in trip {}", participant_id, trip.id);
                return Err(TripSplitError::invalid_input(
                    "participants",
                    "Unknown Participant",
                    format!("{} is not a participant of this trip", participant_id),
                ));
            }
            if !seen.insert(participant_id.as_str()) {
                return Err(TripSplitError::invalid_input(
                    "participants",
                    "Duplicate Participant",
                    format!("{} is listed more than once", participant_id),
                ));
            }
        }
        Ok(())
    }

    fn build_participant(&self, input: NewParticipant) -> Result<Participant, TripSplitError> {
        let name = input.name.trim().to_string();
        self.validate_person_name("name", &name)?;
        let phone = match input.phone.map(|p| p.trim().to_string()) {
            Some(p) if p.is_empty() => None,
            Some(p) => {
                self.validate_string_input("phone", &p, MAX_PHONE_LENGTH)?;
                Some(p)
            }
            None => None,
        };
        Ok(Participant {
            id: Uuid::new_v4().to_string(),
            name,
            phone,
        })
    }

    // TRIPS

    pub async fn create_trip(
        &self,
        name: String,
        currency: String,
        participants: Vec<NewParticipant>,
    ) -> Result<Trip, TripSplitError> {
        info!("Creating trip '{}' with {} participants", name, participants.len());
        self.validate_string_input("name", &name, MAX_NAME_LENGTH)?;
        let currency = self.validate_currency(&currency)?;
        let participants = participants
            .into_iter()
            .map(|p| self.build_participant(p))
            .collect::<Result<Vec<_>, _>>()?;

        let trip = Trip {
            id: Uuid::new_v4().to_string(),
            name: name.trim().to_string(),
            currency,
            created_at: Utc::now(),
            participants,
            transactions: Vec::new(),
        };
        self.storage.save_trip(trip.clone()).await?;
        debug!("Trip created with ID: {}", trip.id);

        self.logging
            .log_action(
                TRIP_CREATED,
                json!({
                    "trip_id": trip.id,
                    "name": trip.name,
                    "currency": trip.currency,
                    "participant_ids": trip.participant_ids(),
                }),
                Some(&trip.id),
            )
            .await?;
        Ok(trip)
    }

    pub async fn get_trip(&self, trip_id: &str) -> Result<Option<Trip>, TripSplitError> {
        self.storage.get_trip(trip_id).await
    }

    pub async fn list_trips(&self) -> Result<Vec<Trip>, TripSplitError> {
        self.storage.list_trips().await
    }

    pub async fn rename_trip(&self, trip_id: &str, name: String) -> Result<Trip, TripSplitError> {
        info!("Renaming trip {}", trip_id);
        self.validate_string_input("name", &name, MAX_NAME_LENGTH)?;
        let new_name = name.trim().to_string();
        let (trip, old_name) = self
            .storage
            .update_trip(trip_id, |trip| {
                let old_name = std::mem::replace(&mut trip.name, new_name);
                Ok((trip.clone(), old_name))
            })
            .await?;

        self.logging
            .log_action(
                TRIP_RENAMED,
                json!({ "trip_id": trip_id, "old_name": old_name, "new_name": trip.name }),
                Some(trip_id),
            )
            .await?;
        Ok(trip)
    }

    pub async fn delete_trip(&self, trip_id: &str) -> Result<(), TripSplitError> {
        info!("Deleting trip {}", trip_id);
        let trip = self.storage.delete_trip(trip_id).await?;

        self.logging
            .log_action(
                TRIP_DELETED,
                json!({ "trip_id": trip_id, "name": trip.name }),
                Some(trip_id),
            )
            .await?;
        Ok(())
    }

    // PARTICIPANTS

    pub async fn add_participant(&self, trip_id: &str, input: NewParticipant) -> Result<Participant, TripSplitError> {
        info!("Adding participant '{}' to trip {}", input.name, trip_id);
        let participant = self.build_participant(input)?;
        self.storage
            .update_trip(trip_id, |trip| {
                trip.participants.push(participant.clone());
                Ok(())
            })
            .await?;

        self.logging
            .log_action(
                PARTICIPANT_ADDED,
                json!({ "trip_id": trip_id, "participant_id": participant.id, "name": participant.name }),
                Some(trip_id),
            )
            .await?;
        Ok(participant)
    }

    pub async fn remove_participant(&self, trip_id: &str, participant_id: &str) -> Result<(), TripSplitError> {
        info!("Removing participant {} from trip {}", participant_id, trip_id);
        self.storage
            .update_trip(trip_id, |trip| {
                if !trip.is_participant(participant_id) {
                    return Err(TripSplitError::ParticipantNotFound(participant_id.to_string()));
                }
                // also covers all-split transactions, which implicitly include everyone
                if trip
                    .transactions
                    .iter()
                    .any(|tx| tx.references(participant_id) || tx.participants.is_empty())
                {
                    warn!("Participant {} still referenced in trip {}", participant_id, trip_id);
                    return Err(TripSplitError::ParticipantInUse(participant_id.to_string()));
                }
                trip.participants.retain(|p| p.id != participant_id);
                Ok(())
            })
            .await?;

        self.logging
            .log_action(
                PARTICIPANT_REMOVED,
                json!({ "trip_id": trip_id, "participant_id": participant_id }),
                Some(trip_id),
            )
            .await?;
        Ok(())
    }

    // TRANSACTIONS

    pub async fn add_transaction(&self, trip_id: &str, input: NewTransaction) -> Result<Transaction, TripSplitError> {
        info!(
            "Adding transaction to trip {} paid by {} for amount {}",
            trip_id, input.payer, input.amount
        );
        let transaction = self
            .storage
            .update_trip(trip_id, |trip| {
                self.validate_transaction(trip, &input)?;
                let mut transaction = input.into_transaction(Uuid::new_v4().to_string());
                transaction.date.get_or_insert_with(Utc::now);
                trip.transactions.push(transaction.clone());
                Ok(transaction)
            })
            .await?;
        debug!("Transaction created with ID: {}", transaction.id);

        self.logging
            .log_action(
                TRANSACTION_ADDED,
                json!({
                    "trip_id": trip_id,
                    "transaction_id": transaction.id,
                    "payer": transaction.payer,
                    "amount": transaction.amount,
                }),
                Some(trip_id),
            )
            .await?;
        Ok(transaction)
    }

    pub async fn update_transaction(
        &self,
        trip_id: &str,
        transaction_id: &str,
        input: NewTransaction,
    ) -> Result<Transaction, TripSplitError> {
        info!("Updating transaction {} in trip {}", transaction_id, trip_id);
        let updated = self
            .storage
            .update_trip(trip_id, |trip| {
                self.validate_transaction(trip, &input)?;
                let slot = trip
                    .transactions
                    .iter_mut()
                    .find(|tx| tx.id == transaction_id)
                    .ok_or_else(|| TripSplitError::TransactionNotFound(transaction_id.to_string()))?;
                let previous_date = slot.date;
                let mut updated = input.into_transaction(transaction_id.to_string());
                if updated.date.is_none() {
                    updated.date = previous_date;
                }
                *slot = updated.clone();
                Ok(updated)
            })
            .await?;

        self.logging
            .log_action(
                TRANSACTION_UPDATED,
                json!({
                    "trip_id": trip_id,
                    "transaction_id": transaction_id,
                    "payer": updated.payer,
                    "amount": updated.amount,
                }),
                Some(trip_id),
            )
            .await?;
        Ok(updated)
    }

    pub async fn remove_transaction(&self, trip_id: &str, transaction_id: &str) -> Result<(), TripSplitError> {
        info!("Removing transaction {} from trip {}", transaction_id, trip_id);
        self.storage
            .update_trip(trip_id, |trip| {
                let before = trip.transactions.len();
                trip.transactions.retain(|tx| tx.id != transaction_id);
                if trip.transactions.len() == before {
                    return Err(TripSplitError::TransactionNotFound(transaction_id.to_string()));
                }
                Ok(())
            })
            .await?;

        self.logging
            .log_action(
                TRANSACTION_REMOVED,
                json!({ "trip_id": trip_id, "transaction_id": transaction_id }),
                Some(trip_id),
            )
            .await?;
        Ok(())
    }

    // SETTLEMENTS

    pub async fn get_settlements(&self, trip_id: &str) -> Result<Vec<Settlement>, TripSplitError> {
        let snapshot = self.load_trip(trip_id).await?.snapshot();
        let settlements = SplitCalculator::compute_settlements(&snapshot.transactions, &snapshot.participant_ids)?;
        debug!("Trip {} settles with {} transfers", trip_id, settlements.len());
        Ok(settlements)
    }

    pub async fn get_breakdown(&self, trip_id: &str) -> Result<SettlementBreakdown, TripSplitError> {
        let snapshot = self.load_trip(trip_id).await?.snapshot();
        Ok(SplitCalculator::breakdown(
            &snapshot.transactions,
            &snapshot.participant_ids,
        )?)
    }

    pub async fn get_summary(&self, trip_id: &str) -> Result<TripSummary, TripSplitError> {
        let trip = self.load_trip(trip_id).await?;
        let snapshot = trip.snapshot();
        let positions = SplitCalculator::net_positions(&snapshot.transactions, &snapshot.participant_ids)?;
        let settlements = SplitCalculator::compute_settlements(&snapshot.transactions, &snapshot.participant_ids)?;

        let total_amount = trip.total_amount();
        let per_person_share = if trip.participants.is_empty() {
            0.0
        } else {
            total_amount / trip.participants.len() as f64
        };

        Ok(TripSummary {
            trip_id: trip.id,
            currency: trip.currency,
            total_amount,
            per_person_share,
            positions,
            settlements,
        })
    }

    // AUDIT

    pub async fn get_trip_logs(&self, trip_id: &str) -> Result<Vec<AppLog>, TripSplitError> {
        self.logging.get_trip_logs(trip_id).await
    }

    pub async fn get_app_logs(&self) -> Result<Vec<AppLog>, TripSplitError> {
        self.logging.get_logs().await
    }
}
