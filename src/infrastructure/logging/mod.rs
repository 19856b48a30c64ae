pub mod in_memory;

use crate::core::errors::TripSplitError;
use crate::core::models::audit::AppLog;
use async_trait::async_trait;

#[async_trait]
pub trait LoggingService: Send + Sync {
    async fn log_action(
        &self,
        action: &str,
        details: serde_json::Value,
        trip_id: Option<&str>,
    ) -> Result<(), TripSplitError>;
    async fn get_logs(&self) -> Result<Vec<AppLog>, TripSplitError>;
    async fn get_trip_logs(&self, trip_id: &str) -> Result<Vec<AppLog>, TripSplitError>;
}
