use crate::core::errors::TripSplitError;
use crate::core::models::trip::Trip;
use crate::infrastructure::storage::Storage;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone, Default)]
pub struct InMemoryStorage {
    trips: Arc<RwLock<HashMap<String, Trip>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        InMemoryStorage {
            trips: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn save_trip(&self, trip: Trip) -> Result<(), TripSplitError> {
        let mut trips = self.trips.write().await;
        trips.insert(trip.id.clone(), trip);
        Ok(())
    }

    async fn get_trip(&self, trip_id: &str) -> Result<Option<Trip>, TripSplitError> {
        let trips = self.trips.read().await;
        Ok(trips.get(trip_id).cloned())
    }

    async fn list_trips(&self) -> Result<Vec<Trip>, TripSplitError> {
        let trips = self.trips.read().await;
        let mut all: Vec<Trip> = trips.values().cloned().collect();
        all.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(all)
    }

    async fn update_trip<T, F>(&self, trip_id: &str, apply: F) -> Result<T, TripSplitError>
    where
        T: Send,
        F: FnOnce(&mut Trip) -> Result<T, TripSplitError> + Send,
    {
        let mut trips = self.trips.write().await;
        let stored = trips
            .get_mut(trip_id)
            .ok_or_else(|| TripSplitError::TripNotFound(trip_id.to_string()))?;
        let mut draft = stored.clone();
        let output = apply(&mut draft)?;
        *stored = draft;
        Ok(output)
    }

    async fn delete_trip(&self, trip_id: &str) -> Result<Trip, TripSplitError> {
        let mut trips = self.trips.write().await;
        trips
            .remove(trip_id)
            .ok_or_else(|| TripSplitError::TripNotFound(trip_id.to_string()))
    }
}
