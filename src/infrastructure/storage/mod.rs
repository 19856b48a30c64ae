pub mod in_memory;

use crate::core::errors::TripSplitError;
use crate::core::models::trip::Trip;
use async_trait::async_trait;

#[async_trait]
pub trait Storage: Send + Sync {
    async fn save_trip(&self, trip: Trip) -> Result<(), TripSplitError>;
    async fn get_trip(&self, trip_id: &str) -> Result<Option<Trip>, TripSplitError>;
    async fn list_trips(&self) -> Result<Vec<Trip>, TripSplitError>;
    /// Applies `apply` to the stored trip while holding it exclusively.
    /// The change is committed only when `apply` returns `Ok`.
    async fn update_trip<T, F>(&self, trip_id: &str, apply: F) -> Result<T, TripSplitError>
    where
        T: Send,
        F: FnOnce(&mut Trip) -> Result<T, TripSplitError> + Send;
    async fn delete_trip(&self, trip_id: &str) -> Result<Trip, TripSplitError>;
}
