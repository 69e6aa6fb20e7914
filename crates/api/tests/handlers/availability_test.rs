use axum::http::StatusCode;
use clinicdesk_core::{
    models::{availability::MonthAvailability, daily_override::DailyOverride},
    resolver::SlotSource,
};
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::test_utils::{clinic_template, date, t, TestContext, BRANCH};

const PATH: &str = "/api/branches/gangnam/availability";

#[test_log::test(tokio::test)]
async fn test_month_availability_resolves_every_day() {
    let mut ctx = TestContext::new();
    ctx.store
        .expect_get_template()
        .times(1)
        .returning(|_| Ok(Some(clinic_template())));
    ctx.store
        .expect_get_overrides()
        .times(1)
        .returning(|slug, _| {
            assert_eq!(slug, BRANCH);
            Ok(vec![
                // closed on a Monday
                DailyOverride::closed(date(2025, 3, 3)),
                // open on a Sunday
                DailyOverride::new(date(2025, 3, 16), [t("10:00"), t("10:30")]),
            ])
        });
    let server = ctx.into_server();

    let response = server.get(PATH).add_query_param("month", "2025-03").await;

    response.assert_status_ok();
    let availability = response.json::<MonthAvailability>();
    assert_eq!(availability.branch_slug, BRANCH);
    assert!(availability.template_configured);
    assert_eq!(availability.days.len(), 31);

    let day = |d: u32| &availability.days[d as usize - 1];
    assert_eq!(day(3).source, SlotSource::Override);
    assert!(day(3).slots.is_empty());
    assert_eq!(day(9).source, SlotSource::WeeklyHoliday);
    assert_eq!(day(16).slots, vec![t("10:00"), t("10:30")]);
    assert_eq!(day(10).source, SlotSource::Template);
    assert_eq!(day(10).slots.len(), 32);
}

#[test_log::test(tokio::test)]
async fn test_month_availability_without_template_uses_defaults() {
    let mut ctx = TestContext::new();
    ctx.store.expect_get_template().returning(|_| Ok(None));
    ctx.store.expect_get_overrides().returning(|_, _| Ok(vec![]));
    let server = ctx.into_server();

    let response = server.get(PATH).add_query_param("month", "2025-02").await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["templateConfigured"], false);
    assert_eq!(body["month"], "2025-02");
    assert_eq!(body["days"].as_array().map(Vec::len), Some(28));
    assert_eq!(body["days"][0]["slots"][0], "09:00");
    assert_eq!(body["days"][0]["source"], "template");
}

#[test_log::test(tokio::test)]
async fn test_month_availability_fails_when_store_fails() {
    let mut ctx = TestContext::new();
    ctx.store
        .expect_get_template()
        .returning(|_| Ok(Some(clinic_template())));
    ctx.store
        .expect_get_overrides()
        .returning(|_, _| Err(eyre::eyre!("connection reset")));
    let server = ctx.into_server();

    let response = server.get(PATH).add_query_param("month", "2025-03").await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_month_availability_requires_month() {
    let server = TestContext::new().into_server();

    let response = server.get(PATH).await;

    response.assert_status(StatusCode::BAD_REQUEST);
}
