use axum::{body::to_bytes, http::StatusCode};
use clinicdesk_api::middleware::error_handling::{map_error, AppError};
use clinicdesk_core::{errors::TimeError, time::parse_time};
use rstest::rstest;
use serde_json::Value;

#[rstest]
#[case(TimeError::NotFound("Schedule template for branch gangnam".into()), StatusCode::NOT_FOUND)]
#[case(TimeError::Validation("Invalid month".into()), StatusCode::BAD_REQUEST)]
#[case(TimeError::InvalidTimeFormat("9:5".into()), StatusCode::BAD_REQUEST)]
#[case(
    TimeError::InvalidRange { start: parse_time("18:00").unwrap(), end: parse_time("09:00").unwrap() },
    StatusCode::BAD_REQUEST
)]
#[case(TimeError::Persistence(eyre::eyre!("connection refused")), StatusCode::INTERNAL_SERVER_ERROR)]
#[case(
    TimeError::Internal(Box::new(std::io::Error::new(std::io::ErrorKind::Other, "Internal error"))),
    StatusCode::INTERNAL_SERVER_ERROR
)]
#[tokio::test]
async fn test_error_status_mapping(#[case] error: TimeError, #[case] expected: StatusCode) {
    let response = map_error(error);
    assert_eq!(response.status(), expected);
}

#[tokio::test]
async fn test_error_body_carries_message() {
    let response = map_error(TimeError::InvalidTimeFormat("24:00".into()));

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(
        body["error"],
        "Invalid time format: \"24:00\" (expected HH:MM)"
    );
}

#[test]
fn test_eyre_report_becomes_persistence_error() {
    let error = AppError::from(eyre::eyre!("pool timed out"));

    assert!(matches!(error.0, TimeError::Persistence(_)));
    assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
