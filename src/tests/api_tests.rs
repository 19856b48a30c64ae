use crate::api::handlers::{
    AppService, add_transaction, compute_settlements, create_trip, get_settlements, get_summary, get_trip,
    remove_participant,
};
use crate::api::models::{ApiError, CreateTripRequest};
use crate::core::errors::{SplitError, TripSplitError};
use crate::core::models::participant::NewParticipant;
use crate::core::models::transaction::{NewTransaction, Transaction};
use crate::core::models::trip::LedgerSnapshot;
use crate::tests::{create_test_service, settlement};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;

fn service() -> Arc<AppService> {
    Arc::new(create_test_service())
}

#[tokio::test]
async fn test_trip_lifecycle_through_handlers() {
    let _ = env_logger::try_init();
    let service = service();

    let (status, Json(trip)) = create_trip(
        State(service.clone()),
        Json(CreateTripRequest {
            name: "Weekend".to_string(),
            currency: "usd".to_string(),
            participants: vec![
                NewParticipant {
                    name: "Anna".to_string(),
                    phone: Some("+1 555 0100".to_string()),
                },
                NewParticipant {
                    name: "Ben".to_string(),
                    phone: None,
                },
            ],
        }),
    )
    .await
    .unwrap();
    assert_eq!(status, StatusCode::CREATED);
    let (a, b) = (trip.participants[0].id.clone(), trip.participants[1].id.clone());

    let (status, Json(recorded)) = add_transaction(
        State(service.clone()),
        Path(trip.id.clone()),
        Json(NewTransaction {
            payer: a.clone(),
            amount: 60.0,
            participants: vec![],
            description: "Fuel".to_string(),
            date: None,
        }),
    )
    .await
    .unwrap();
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(recorded.description, "Fuel");

    let Json(settlements) = get_settlements(State(service.clone()), Path(trip.id.clone()))
        .await
        .unwrap();
    assert_eq!(settlements, vec![settlement(&b, &a, 30.0)]);

    let Json(summary) = get_summary(State(service.clone()), Path(trip.id.clone()))
        .await
        .unwrap();
    assert_eq!(summary.total_amount, 60.0);

    let Json(fetched) = get_trip(State(service.clone()), Path(trip.id.clone())).await.unwrap();
    assert_eq!(fetched.transactions.len(), 1);
}

#[tokio::test]
async fn test_error_statuses() {
    let service = service();

    let missing = get_trip(State(service.clone()), Path("nope".to_string()))
        .await
        .unwrap_err();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    assert_eq!(missing.into_response().status(), StatusCode::NOT_FOUND);

    let invalid = create_trip(
        State(service.clone()),
        Json(CreateTripRequest {
            name: "Trip".to_string(),
            currency: "dollars".to_string(),
            participants: vec![],
        }),
    )
    .await
    .unwrap_err();
    assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);

    let (_, Json(trip)) = create_trip(
        State(service.clone()),
        Json(CreateTripRequest {
            name: "Trip".to_string(),
            currency: "EUR".to_string(),
            participants: vec![NewParticipant {
                name: "Anna".to_string(),
                phone: None,
            }],
        }),
    )
    .await
    .unwrap();
    let anna = trip.participants[0].id.clone();
    add_transaction(
        State(service.clone()),
        Path(trip.id.clone()),
        Json(NewTransaction {
            payer: anna.clone(),
            amount: 10.0,
            participants: vec![],
            description: String::new(),
            date: None,
        }),
    )
    .await
    .unwrap();

    let conflict = remove_participant(State(service.clone()), Path((trip.id.clone(), anna)))
        .await
        .unwrap_err();
    assert_eq!(conflict.status(), StatusCode::CONFLICT);

    let unprocessable = ApiError(TripSplitError::InvalidTransaction(SplitError::EmptySharingSet {
        transaction_id: "t1".to_string(),
    }));
    assert_eq!(unprocessable.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_compute_settlements_on_posted_snapshot() {
    let snapshot = LedgerSnapshot {
        participant_ids: vec!["A".to_string(), "B".to_string(), "C".to_string()],
        transactions: vec![
            Transaction::new("t1", "A", 90.0, vec![]),
            Transaction::new("t2", "B", 30.0, vec!["B".to_string(), "C".to_string()]),
        ],
    };

    let Json(settlements) = compute_settlements(Json(snapshot)).await.unwrap();
    assert_eq!(
        settlements,
        vec![
            settlement("B", "A", 30.0),
            settlement("C", "A", 30.0),
            settlement("C", "B", 15.0),
        ]
    );

    let empty_group = LedgerSnapshot {
        participant_ids: vec![],
        transactions: vec![Transaction::new("t1", "A", 10.0, vec![])],
    };
    let err = compute_settlements(Json(empty_group)).await.unwrap_err();
    assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[test]
fn test_snapshot_deserializes_with_optional_fields() {
    let snapshot: LedgerSnapshot = serde_json::from_str(
        r#"{
            "participant_ids": ["A", "B"],
            "transactions": [{ "id": "t1", "payer": "A", "amount": 12.5 }]
        }"#,
    )
    .unwrap();

    assert!(snapshot.transactions[0].participants.is_empty());
    assert!(snapshot.transactions[0].date.is_none());
    assert_eq!(snapshot.transactions[0].description, "");
}
