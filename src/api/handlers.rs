use crate::{
    api::models::*,
    core::{
        calculator::SplitCalculator,
        errors::TripSplitError,
        models::{
            audit::AppLog,
            participant::{NewParticipant, Participant},
            settlement::{Settlement, SettlementBreakdown},
            transaction::{NewTransaction, Transaction},
            trip::{LedgerSnapshot, Trip},
        },
        services::{TripService, TripSummary},
    },
    infrastructure::{logging::in_memory::InMemoryLogging, storage::in_memory::InMemoryStorage},
};
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
};
use std::sync::Arc;

pub type AppService = TripService<InMemoryLogging, InMemoryStorage>;

// Define API routes
pub fn api_routes(service: Arc<AppService>) -> Router {
    Router::new()
        .route("/trips", post(create_trip).get(list_trips))
        .route("/trips/{trip_id}", get(get_trip).delete(delete_trip))
        .route("/trips/{trip_id}/name", put(rename_trip))
        .route("/trips/{trip_id}/participants", post(add_participant))
        .route(
            "/trips/{trip_id}/participants/{participant_id}",
            delete(remove_participant),
        )
        .route("/trips/{trip_id}/transactions", post(add_transaction))
        .route(
            "/trips/{trip_id}/transactions/{transaction_id}",
            put(update_transaction).delete(remove_transaction),
        )
        .route("/trips/{trip_id}/settlements", get(get_settlements))
        .route("/trips/{trip_id}/breakdown", get(get_breakdown))
        .route("/trips/{trip_id}/summary", get(get_summary))
        .route("/trips/{trip_id}/logs", get(get_trip_logs))
        .route("/settlements/compute", post(compute_settlements))
        .route("/logs", get(get_app_logs))
        .with_state(service)
}

#[utoipa::path(
    post,
    path = "/api/trips",
    request_body = CreateTripRequest,
    responses(
        (status = 201, description = "Trip created successfully", body = Trip),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn create_trip(
    State(service): State<Arc<AppService>>,
    Json(req): Json<CreateTripRequest>,
) -> Result<(StatusCode, Json<Trip>), ApiError> {
    let trip = service.create_trip(req.name, req.currency, req.participants).await?;
    Ok((StatusCode::CREATED, Json(trip)))
}

#[utoipa::path(
    get,
    path = "/api/trips",
    responses(
        (status = 200, description = "All trips", body = Vec<Trip>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn list_trips(State(service): State<Arc<AppService>>) -> Result<Json<Vec<Trip>>, ApiError> {
    Ok(Json(service.list_trips().await?))
}

#[utoipa::path(
    get,
    path = "/api/trips/{trip_id}",
    params(
        ("trip_id" = String, Path, description = "ID of the trip to retrieve")
    ),
    responses(
        (status = 200, description = "Trip retrieved successfully", body = Trip),
        (status = 404, description = "Trip not found", body = ErrorResponse)
    )
)]
pub async fn get_trip(
    State(service): State<Arc<AppService>>,
    Path(trip_id): Path<String>,
) -> Result<Json<Trip>, ApiError> {
    let trip = service
        .get_trip(&trip_id)
        .await?
        .ok_or_else(|| TripSplitError::TripNotFound(trip_id))?;
    Ok(Json(trip))
}

#[utoipa::path(
    delete,
    path = "/api/trips/{trip_id}",
    params(
        ("trip_id" = String, Path, description = "ID of the trip to delete")
    ),
    responses(
        (status = 204, description = "Trip deleted"),
        (status = 404, description = "Trip not found", body = ErrorResponse)
    )
)]
pub async fn delete_trip(
    State(service): State<Arc<AppService>>,
    Path(trip_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    service.delete_trip(&trip_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    put,
    path = "/api/trips/{trip_id}/name",
    request_body = RenameTripRequest,
    params(
        ("trip_id" = String, Path, description = "ID of the trip to rename")
    ),
    responses(
        (status = 200, description = "Trip renamed", body = Trip),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 404, description = "Trip not found", body = ErrorResponse)
    )
)]
pub async fn rename_trip(
    State(service): State<Arc<AppService>>,
    Path(trip_id): Path<String>,
    Json(req): Json<RenameTripRequest>,
) -> Result<Json<Trip>, ApiError> {
    Ok(Json(service.rename_trip(&trip_id, req.name).await?))
}

#[utoipa::path(
    post,
    path = "/api/trips/{trip_id}/participants",
    request_body = NewParticipant,
    params(
        ("trip_id" = String, Path, description = "ID of the trip")
    ),
    responses(
        (status = 201, description = "Participant added", body = Participant),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 404, description = "Trip not found", body = ErrorResponse)
    )
)]
pub async fn add_participant(
    State(service): State<Arc<AppService>>,
    Path(trip_id): Path<String>,
    Json(req): Json<NewParticipant>,
) -> Result<(StatusCode, Json<Participant>), ApiError> {
    let participant = service.add_participant(&trip_id, req).await?;
    Ok((StatusCode::CREATED, Json(participant)))
}

#[utoipa::path(
    delete,
    path = "/api/trips/{trip_id}/participants/{participant_id}",
    params(
        ("trip_id" = String, Path, description = "ID of the trip"),
        ("participant_id" = String, Path, description = "ID of the participant to remove")
    ),
    responses(
        (status = 204, description = "Participant removed"),
        (status = 404, description = "Trip or participant not found", body = ErrorResponse),
        (status = 409, description = "Participant still referenced by transactions", body = ErrorResponse)
    )
)]
pub async fn remove_participant(
    State(service): State<Arc<AppService>>,
    Path((trip_id, participant_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    service.remove_participant(&trip_id, &participant_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/trips/{trip_id}/transactions",
    request_body = NewTransaction,
    params(
        ("trip_id" = String, Path, description = "ID of the trip")
    ),
    responses(
        (status = 201, description = "Transaction recorded", body = Transaction),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 404, description = "Trip not found", body = ErrorResponse)
    )
)]
pub async fn add_transaction(
    State(service): State<Arc<AppService>>,
    Path(trip_id): Path<String>,
    Json(req): Json<NewTransaction>,
) -> Result<(StatusCode, Json<Transaction>), ApiError> {
    let transaction = service.add_transaction(&trip_id, req).await?;
    Ok((StatusCode::CREATED, Json(transaction)))
}

#[utoipa::path(
    put,
    path = "/api/trips/{trip_id}/transactions/{transaction_id}",
    request_body = NewTransaction,
    params(
        ("trip_id" = String, Path, description = "ID of the trip"),
        ("transaction_id" = String, Path, description = "ID of the transaction to replace")
    ),
    responses(
        (status = 200, description = "Transaction updated", body = Transaction),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 404, description = "Trip or transaction not found", body = ErrorResponse)
    )
)]
pub async fn update_transaction(
    State(service): State<Arc<AppService>>,
    Path((trip_id, transaction_id)): Path<(String, String)>,
    Json(req): Json<NewTransaction>,
) -> Result<Json<Transaction>, ApiError> {
    Ok(Json(service.update_transaction(&trip_id, &transaction_id, req).await?))
}

#[utoipa::path(
    delete,
    path = "/api/trips/{trip_id}/transactions/{transaction_id}",
    params(
        ("trip_id" = String, Path, description = "ID of the trip"),
        ("transaction_id" = String, Path, description = "ID of the transaction to remove")
    ),
    responses(
        (status = 204, description = "Transaction removed"),
        (status = 404, description = "Trip or transaction not found", body = ErrorResponse)
    )
)]
pub async fn remove_transaction(
    State(service): State<Arc<AppService>>,
    Path((trip_id, transaction_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    service.remove_transaction(&trip_id, &transaction_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/trips/{trip_id}/settlements",
    params(
        ("trip_id" = String, Path, description = "ID of the trip")
    ),
    responses(
        (status = 200, description = "Who owes whom", body = Vec<Settlement>),
        (status = 404, description = "Trip not found", body = ErrorResponse),
        (status = 422, description = "Ledger holds an invalid transaction", body = ErrorResponse)
    )
)]
pub async fn get_settlements(
    State(service): State<Arc<AppService>>,
    Path(trip_id): Path<String>,
) -> Result<Json<Vec<Settlement>>, ApiError> {
    Ok(Json(service.get_settlements(&trip_id).await?))
}

#[utoipa::path(
    get,
    path = "/api/trips/{trip_id}/breakdown",
    params(
        ("trip_id" = String, Path, description = "ID of the trip")
    ),
    responses(
        (status = 200, description = "Raw, consolidated and netted debts", body = SettlementBreakdown),
        (status = 404, description = "Trip not found", body = ErrorResponse),
        (status = 422, description = "Ledger holds an invalid transaction", body = ErrorResponse)
    )
)]
pub async fn get_breakdown(
    State(service): State<Arc<AppService>>,
    Path(trip_id): Path<String>,
) -> Result<Json<SettlementBreakdown>, ApiError> {
    Ok(Json(service.get_breakdown(&trip_id).await?))
}

#[utoipa::path(
    get,
    path = "/api/trips/{trip_id}/summary",
    params(
        ("trip_id" = String, Path, description = "ID of the trip")
    ),
    responses(
        (status = 200, description = "Totals, net positions and settlements", body = TripSummary),
        (status = 404, description = "Trip not found", body = ErrorResponse),
        (status = 422, description = "Ledger holds an invalid transaction", body = ErrorResponse)
    )
)]
pub async fn get_summary(
    State(service): State<Arc<AppService>>,
    Path(trip_id): Path<String>,
) -> Result<Json<TripSummary>, ApiError> {
    Ok(Json(service.get_summary(&trip_id).await?))
}

#[utoipa::path(
    get,
    path = "/api/trips/{trip_id}/logs",
    params(
        ("trip_id" = String, Path, description = "ID of the trip")
    ),
    responses(
        (status = 200, description = "Audit entries for the trip", body = Vec<AppLog>)
    )
)]
pub async fn get_trip_logs(
    State(service): State<Arc<AppService>>,
    Path(trip_id): Path<String>,
) -> Result<Json<Vec<AppLog>>, ApiError> {
    Ok(Json(service.get_trip_logs(&trip_id).await?))
}

#[utoipa::path(
    post,
    path = "/api/settlements/compute",
    request_body = LedgerSnapshot,
    responses(
        (status = 200, description = "Settlements for the posted ledger", body = Vec<Settlement>),
        (status = 422, description = "Ledger holds an invalid transaction", body = ErrorResponse)
    )
)]
pub async fn compute_settlements(Json(snapshot): Json<LedgerSnapshot>) -> Result<Json<Vec<Settlement>>, ApiError> {
    let settlements = SplitCalculator::compute_settlements(&snapshot.transactions, &snapshot.participant_ids)
        .map_err(TripSplitError::from)?;
    Ok(Json(settlements))
}

#[utoipa::path(
    get,
    path = "/api/logs",
    responses(
        (status = 200, description = "All audit entries", body = Vec<AppLog>)
    )
)]
pub async fn get_app_logs(State(service): State<Arc<AppService>>) -> Result<Json<Vec<AppLog>>, ApiError> {
    Ok(Json(service.get_app_logs().await?))
}
