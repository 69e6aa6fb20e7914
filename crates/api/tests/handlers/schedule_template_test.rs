use axum::http::StatusCode;
use clinicdesk_core::models::template::ScheduleTemplate;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::test_utils::{clinic_template, TestContext, BRANCH};

const PATH: &str = "/api/branches/gangnam/schedule-template";

#[tokio::test]
async fn test_get_template() {
    let mut ctx = TestContext::new();
    ctx.store.expect_get_template().times(1).returning(|slug| {
        assert_eq!(slug, BRANCH);
        Ok(Some(clinic_template()))
    });
    let server = ctx.into_server();

    let response = server.get(PATH).await;

    response.assert_status_ok();
    assert_eq!(response.json::<ScheduleTemplate>(), clinic_template());
    assert_eq!(
        response.json::<Value>(),
        json!({
            "startTime": "10:00",
            "endTime": "19:00",
            "intervalMinutes": 15,
            "excludedTimes": [{ "start": "13:00", "end": "14:00" }],
            "weeklyHolidays": [0],
        })
    );
}

#[tokio::test]
async fn test_get_template_not_configured() {
    let mut ctx = TestContext::new();
    ctx.store.expect_get_template().returning(|_| Ok(None));
    let server = ctx.into_server();

    let response = server.get(PATH).await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(
        response.json::<Value>()["error"],
        "Resource not found: Schedule template for branch gangnam"
    );
}

#[tokio::test]
async fn test_get_template_store_failure() {
    let mut ctx = TestContext::new();
    ctx.store
        .expect_get_template()
        .returning(|_| Err(eyre::eyre!("connection refused")));
    let server = ctx.into_server();

    let response = server.get(PATH).await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_invalid_branch_slug_never_reaches_store() {
    let mut ctx = TestContext::new();
    ctx.store.expect_get_template().never();
    let server = ctx.into_server();

    let response = server.get("/api/branches/Gangnam_1/schedule-template").await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_put_template() {
    let mut ctx = TestContext::new();
    ctx.store
        .expect_put_template()
        .times(1)
        .returning(|slug, template| {
            assert_eq!(slug, BRANCH);
            assert_eq!(template, &clinic_template());
            Ok(template.clone())
        });
    let server = ctx.into_server();

    let response = server
        .put(PATH)
        .json(&json!({
            "startTime": "10:00",
            "endTime": "19:00",
            "intervalMinutes": 15,
            "excludedTimes": [{ "start": "13:00", "end": "14:00" }],
            "weeklyHolidays": [0],
        }))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<ScheduleTemplate>().slots().len(), 32);
}

#[tokio::test]
async fn test_put_template_defaults_optional_lists() {
    let mut ctx = TestContext::new();
    ctx.store
        .expect_put_template()
        .returning(|_, template| Ok(template.clone()));
    let server = ctx.into_server();

    let response = server
        .put(PATH)
        .json(&json!({ "startTime": "09:00", "endTime": "18:00", "intervalMinutes": 30 }))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<ScheduleTemplate>(), ScheduleTemplate::default());
}

#[tokio::test]
async fn test_put_inverted_template_is_rejected() {
    let mut ctx = TestContext::new();
    ctx.store.expect_put_template().never();
    let server = ctx.into_server();

    let response = server
        .put(PATH)
        .json(&json!({ "startTime": "18:00", "endTime": "09:00", "intervalMinutes": 30 }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["error"],
        "Invalid range: start 18:00 must be earlier than end 09:00"
    );
}

#[tokio::test]
async fn test_put_zero_interval_is_rejected() {
    let mut ctx = TestContext::new();
    ctx.store.expect_put_template().never();
    let server = ctx.into_server();

    let response = server
        .put(PATH)
        .json(&json!({ "startTime": "09:00", "endTime": "18:00", "intervalMinutes": 0 }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_put_interval_longer_than_a_day_is_rejected() {
    let mut ctx = TestContext::new();
    ctx.store.expect_put_template().never();
    let server = ctx.into_server();

    let response = server
        .put(PATH)
        .json(&json!({ "startTime": "09:00", "endTime": "18:00", "intervalMinutes": 4294967295u32 }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_put_malformed_time_is_unprocessable() {
    let mut ctx = TestContext::new();
    ctx.store.expect_put_template().never();
    let server = ctx.into_server();

    let response = server
        .put(PATH)
        .json(&json!({ "startTime": "9:00", "endTime": "18:00", "intervalMinutes": 30 }))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}
