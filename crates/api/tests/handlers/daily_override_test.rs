use axum::http::StatusCode;
use clinicdesk_core::{models::daily_override::DailyOverride, month::YearMonth};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{json, Value};
use test_log::test;

use crate::test_utils::{date, t, TestContext, BRANCH};

const PATH: &str = "/api/branches/gangnam/schedule-overrides";

#[test(tokio::test)]
async fn test_list_overrides_for_month() {
    let mut ctx = TestContext::new();
    ctx.store
        .expect_get_overrides()
        .times(1)
        .returning(|slug, month| {
            assert_eq!(slug, BRANCH);
            assert_eq!(month, YearMonth::new(2025, 3).unwrap());
            Ok(vec![
                DailyOverride::closed(date(2025, 3, 3)),
                DailyOverride::new(date(2025, 3, 9), [t("10:00"), t("10:30")]),
            ])
        });
    let server = ctx.into_server();

    let response = server.get(PATH).add_query_param("month", "2025-03").await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>(),
        json!([
            { "date": "2025-03-03T00:00:00.000Z", "timeSlots": [] },
            { "date": "2025-03-09T00:00:00.000Z", "timeSlots": ["10:00", "10:30"] },
        ])
    );
}

#[rstest]
#[case("2025-3")]
#[case("2025-13")]
#[case("march")]
#[tokio::test]
async fn test_list_overrides_rejects_bad_month(#[case] month: &str) {
    let mut ctx = TestContext::new();
    ctx.store.expect_get_overrides().never();
    let server = ctx.into_server();

    let response = server.get(PATH).add_query_param("month", month).await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[test(tokio::test)]
async fn test_put_override_normalizes_slots() {
    let mut ctx = TestContext::new();
    ctx.store
        .expect_put_override()
        .times(1)
        .returning(|slug, daily_override| {
            assert_eq!(slug, BRANCH);
            assert_eq!(daily_override.date, date(2025, 3, 10));
            assert_eq!(daily_override.time_slots, vec![t("09:00"), t("09:30")]);
            Ok(daily_override.clone())
        });
    let server = ctx.into_server();

    let response = server
        .put(PATH)
        .json(&json!({
            "date": "2025-03-10T00:00:00.000Z",
            "timeSlots": ["09:30", "09:00", "09:30"],
        }))
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<DailyOverride>(),
        DailyOverride::new(date(2025, 3, 10), [t("09:00"), t("09:30")])
    );
}

#[test(tokio::test)]
async fn test_put_empty_override_closes_the_day() {
    let mut ctx = TestContext::new();
    ctx.store
        .expect_put_override()
        .returning(|_, daily_override| {
            assert!(daily_override.is_closed());
            Ok(daily_override.clone())
        });
    let server = ctx.into_server();

    let response = server
        .put(PATH)
        .json(&json!({ "date": "2025-03-10", "timeSlots": [] }))
        .await;

    response.assert_status_ok();
    assert!(response.json::<DailyOverride>().is_closed());
}

#[test(tokio::test)]
async fn test_put_override_with_malformed_slot() {
    let mut ctx = TestContext::new();
    ctx.store.expect_put_override().never();
    let server = ctx.into_server();

    let response = server
        .put(PATH)
        .json(&json!({ "date": "2025-03-10", "timeSlots": ["9:5"] }))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[rstest]
#[case("2025-03-10")]
#[case("2025-03-10T00:00:00.000Z")]
#[case("2025-03-11T08:30:00+09:00")]
#[tokio::test]
async fn test_delete_override_accepts_date_forms(#[case] raw: &str) {
    let mut ctx = TestContext::new();
    ctx.store
        .expect_delete_override()
        .times(1)
        .returning(|slug, day| {
            assert_eq!(slug, BRANCH);
            assert_eq!(day, date(2025, 3, 10));
            Ok(true)
        });
    let server = ctx.into_server();

    let response = server
        .delete(&format!("{}/{}", PATH, urlencode(raw)))
        .await;

    response.assert_status(StatusCode::NO_CONTENT);
}

#[test(tokio::test)]
async fn test_delete_missing_override() {
    let mut ctx = TestContext::new();
    ctx.store.expect_delete_override().returning(|_, _| Ok(false));
    let server = ctx.into_server();

    let response = server.delete(&format!("{}/2025-03-10", PATH)).await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[test(tokio::test)]
async fn test_delete_override_bad_date() {
    let mut ctx = TestContext::new();
    ctx.store.expect_delete_override().never();
    let server = ctx.into_server();

    let response = server.delete(&format!("{}/yesterday", PATH)).await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

// Only `:` and `+` need escaping in the date forms above
fn urlencode(raw: &str) -> String {
    raw.replace(':', "%3A").replace('+', "%2B")
}
