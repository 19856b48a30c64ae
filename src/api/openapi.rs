use utoipa::OpenApi;

use crate::{
    api::models::{CreateTripRequest, ErrorResponse, RenameTripRequest},
    core::{
        models::{
            audit::AppLog,
            participant::{NewParticipant, Participant},
            settlement::{Debt, NetPosition, Settlement, SettlementBreakdown},
            transaction::{NewTransaction, Transaction},
            trip::{LedgerSnapshot, Trip},
        },
        services::TripSummary,
    },
};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::handlers::create_trip,
        super::handlers::list_trips,
        super::handlers::get_trip,
        super::handlers::delete_trip,
        super::handlers::rename_trip,
        super::handlers::add_participant,
        super::handlers::remove_participant,
        super::handlers::add_transaction,
        super::handlers::update_transaction,
        super::handlers::remove_transaction,
        super::handlers::get_settlements,
        super::handlers::get_breakdown,
        super::handlers::get_summary,
        super::handlers::get_trip_logs,
        super::handlers::compute_settlements,
        super::handlers::get_app_logs
    ),
    components(schemas(
        CreateTripRequest,
        RenameTripRequest,
        ErrorResponse,
        NewParticipant,
        Participant,
        NewTransaction,
        Transaction,
        Trip,
        LedgerSnapshot,
        Settlement,
        Debt,
        SettlementBreakdown,
        NetPosition,
        TripSummary,
        AppLog
    )),
    info(
        title = "tripsplit API",
        description = "Record shared trip expenses and compute who owes whom",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;
