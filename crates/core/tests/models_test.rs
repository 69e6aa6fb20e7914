use chrono::NaiveDate;
use clinicdesk_core::{
    errors::TimeError,
    models::{
        daily_override::{date_key, format_date_key, parse_date_key, DailyOverride},
        template::{DayOfWeek, ScheduleTemplate},
    },
    slots::ExcludedRange,
    time::{parse_time, TimeOfDay},
};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{from_str, json, to_value};
use serde_test::{assert_de_tokens_error, assert_tokens, Token};

fn t(s: &str) -> TimeOfDay {
    parse_time(s).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn clinic_template() -> ScheduleTemplate {
    ScheduleTemplate::new(t("10:00"), t("19:00"), 15)
        .with_excluded(ExcludedRange::new(t("13:00"), t("14:00")).unwrap())
        .with_weekly_holiday(DayOfWeek::Sunday)
}

#[test]
fn test_day_of_week_tokens() {
    assert_tokens(&DayOfWeek::Sunday, &[Token::U8(0)]);
    assert_tokens(&DayOfWeek::Wednesday, &[Token::U8(3)]);
    assert_tokens(&DayOfWeek::Saturday, &[Token::U8(6)]);
    assert_de_tokens_error::<DayOfWeek>(
        &[Token::U8(7)],
        "Validation error: Weekday must be between 0 and 6, got 7",
    );
}

#[rstest]
#[case(date(2025, 3, 9), DayOfWeek::Sunday)]
#[case(date(2025, 3, 10), DayOfWeek::Monday)]
#[case(date(2025, 3, 15), DayOfWeek::Saturday)]
#[case(date(2024, 2, 29), DayOfWeek::Thursday)]
fn test_day_of_week_of_date(#[case] day: NaiveDate, #[case] expected: DayOfWeek) {
    assert_eq!(DayOfWeek::of(day), expected);
}

#[test]
fn test_day_of_week_numbers_round_trip() {
    for day in DayOfWeek::ALL {
        assert_eq!(DayOfWeek::from_number(day.number()), Some(day));
    }
    assert_eq!(DayOfWeek::from_number(7), None);
}

#[test]
fn test_schedule_template_wire_format() {
    let template = clinic_template();

    let value = to_value(&template).expect("Failed to serialize template");
    assert_eq!(
        value,
        json!({
            "startTime": "10:00",
            "endTime": "19:00",
            "intervalMinutes": 15,
            "excludedTimes": [{ "start": "13:00", "end": "14:00" }],
            "weeklyHolidays": [0],
        })
    );

    let back: ScheduleTemplate =
        serde_json::from_value(value).expect("Failed to deserialize template");
    assert_eq!(back, template);
}

#[test]
fn test_schedule_template_optional_collections_default_to_empty() {
    let template: ScheduleTemplate =
        from_str(r#"{"startTime":"09:00","endTime":"12:00","intervalMinutes":30}"#).unwrap();

    assert!(template.excluded_times.is_empty());
    assert!(template.weekly_holidays.is_empty());
    assert_eq!(template.slots().len(), 6);
}

#[test]
fn test_schedule_template_rejects_malformed_times() {
    let result = from_str::<ScheduleTemplate>(
        r#"{"startTime":"9:00","endTime":"12:00","intervalMinutes":30}"#,
    );
    assert!(result.is_err());
}

#[test]
fn test_schedule_template_validate() {
    assert!(clinic_template().validate().is_ok());

    let inverted = ScheduleTemplate::new(t("18:00"), t("09:00"), 30);
    assert!(matches!(inverted.validate(), Err(TimeError::InvalidRange { .. })));

    let equal = ScheduleTemplate::new(t("09:00"), t("09:00"), 30);
    assert!(matches!(equal.validate(), Err(TimeError::InvalidRange { .. })));

    let zero_interval = ScheduleTemplate::new(t("09:00"), t("18:00"), 0);
    assert!(matches!(zero_interval.validate(), Err(TimeError::Validation(_))));

    let whole_day = ScheduleTemplate::new(t("09:00"), t("18:00"), 24 * 60);
    assert!(whole_day.validate().is_ok());

    let huge_interval = ScheduleTemplate::new(t("09:00"), t("18:00"), u32::MAX);
    assert!(matches!(huge_interval.validate(), Err(TimeError::Validation(_))));
    assert_eq!(huge_interval.slots(), vec![t("09:00")]);

    let mut bad_exclusion = ScheduleTemplate::new(t("09:00"), t("18:00"), 30);
    bad_exclusion.excluded_times.push(ExcludedRange {
        start: t("14:00"),
        end: t("13:00"),
    });
    assert!(matches!(bad_exclusion.validate(), Err(TimeError::Validation(_))));
}

#[test]
fn test_default_template_is_a_working_day() {
    let template = ScheduleTemplate::default();

    assert!(template.validate().is_ok());
    assert!(template.weekly_holidays.is_empty());
    assert_eq!(template.slots().first(), Some(&t("09:00")));
    assert_eq!(template.slots().last(), Some(&t("17:30")));
}

#[test]
fn test_daily_override_serializes_midnight_utc() {
    let closed = DailyOverride::closed(date(2025, 3, 9));
    assert_eq!(
        to_value(&closed).unwrap(),
        json!({ "date": "2025-03-09T00:00:00.000Z", "timeSlots": [] })
    );

    let custom = DailyOverride::new(date(2025, 3, 10), [t("09:30"), t("09:00"), t("09:30")]);
    assert_eq!(
        to_value(&custom).unwrap(),
        json!({ "date": "2025-03-10T00:00:00.000Z", "timeSlots": ["09:00", "09:30"] })
    );
}

#[rstest]
#[case("2025-03-09T00:00:00.000Z", date(2025, 3, 9))]
#[case("2025-03-09T00:00:00Z", date(2025, 3, 9))]
#[case("2025-03-09T23:59:59.999Z", date(2025, 3, 9))]
#[case("2025-03-09", date(2025, 3, 9))]
// local midnight in Seoul is still the previous day in UTC
#[case("2025-03-09T00:00:00+09:00", date(2025, 3, 8))]
#[case("2025-03-08T20:00:00-05:00", date(2025, 3, 9))]
fn test_parse_date_key_normalizes_to_utc(#[case] raw: &str, #[case] expected: NaiveDate) {
    assert_eq!(parse_date_key(raw).unwrap(), expected);
}

#[rstest]
#[case("09/03/2025")]
#[case("2025-02-30")]
#[case("tomorrow")]
#[case("")]
fn test_parse_date_key_rejects_garbage(#[case] raw: &str) {
    assert!(matches!(parse_date_key(raw), Err(TimeError::Validation(_))));
}

#[test]
fn test_date_key_drops_time_of_day() {
    let at = parse_date_key("2025-03-09T00:00:00Z").unwrap();
    assert_eq!(format_date_key(at), "2025-03-09T00:00:00.000Z");

    let timestamp = chrono::DateTime::parse_from_rfc3339("2025-03-09T17:45:00Z")
        .unwrap()
        .with_timezone(&chrono::Utc);
    assert_eq!(date_key(timestamp), date(2025, 3, 9));
}

#[test]
fn test_daily_override_normalized_sorts_deserialized_slots() {
    let raw: DailyOverride = from_str(
        r#"{"date":"2025-03-10T00:00:00.000Z","timeSlots":["11:00","09:00","11:00"]}"#,
    )
    .unwrap();

    let normalized = raw.normalized();
    assert_eq!(normalized.time_slots, vec![t("09:00"), t("11:00")]);
    assert!(!normalized.is_closed());
}
