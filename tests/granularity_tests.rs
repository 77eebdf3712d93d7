// Range -> tier policy tests: boundaries go to the finer tier

use fleetpulse::models::Granularity;

const HOUR_MS: i64 = 60 * 60 * 1000;

#[test]
fn short_ranges_resolve_to_one_minute() {
    assert_eq!(Granularity::for_range(0, 1), Granularity::OneMinute);
    assert_eq!(
        Granularity::for_range(0, 30 * 60 * 1000),
        Granularity::OneMinute
    );
}

#[test]
fn boundary_at_exactly_one_hour_stays_fine() {
    assert_eq!(Granularity::for_range(0, HOUR_MS), Granularity::OneMinute);
    assert_eq!(
        Granularity::for_range(0, HOUR_MS + 1),
        Granularity::FiveMinutes
    );
}

#[test]
fn boundary_at_exactly_three_hours_stays_fine() {
    assert_eq!(
        Granularity::for_range(0, 3 * HOUR_MS),
        Granularity::FiveMinutes
    );
    assert_eq!(
        Granularity::for_range(0, 3 * HOUR_MS + 1),
        Granularity::TenMinutes
    );
}

#[test]
fn boundary_at_exactly_one_day_stays_fine() {
    assert_eq!(
        Granularity::for_range(0, 24 * HOUR_MS),
        Granularity::TenMinutes
    );
    assert_eq!(
        Granularity::for_range(0, 24 * HOUR_MS + 1),
        Granularity::OneHour
    );
}

#[test]
fn long_ranges_resolve_to_one_hour() {
    assert_eq!(
        Granularity::for_range(0, 7 * 24 * HOUR_MS),
        Granularity::OneHour
    );
}

#[test]
fn offset_start_uses_duration_not_instants() {
    let start = 1_700_000_000_000;
    assert_eq!(
        Granularity::for_range(start, start + HOUR_MS),
        Granularity::OneMinute
    );
}

#[test]
fn parses_wire_forms() {
    assert_eq!("1m".parse::<Granularity>().unwrap(), Granularity::OneMinute);
    assert_eq!(
        "5m".parse::<Granularity>().unwrap(),
        Granularity::FiveMinutes
    );
    assert_eq!(
        "10m".parse::<Granularity>().unwrap(),
        Granularity::TenMinutes
    );
    assert_eq!("1h".parse::<Granularity>().unwrap(), Granularity::OneHour);
}

#[test]
fn rejects_unknown_granularity() {
    let err = "2m".parse::<Granularity>().unwrap_err();
    assert!(err.to_string().contains("2m"));
}

#[test]
fn bucket_widths() {
    assert_eq!(Granularity::OneMinute.bucket_ms(), 60_000);
    assert_eq!(Granularity::FiveMinutes.bucket_ms(), 300_000);
    assert_eq!(Granularity::TenMinutes.bucket_ms(), 600_000);
    assert_eq!(Granularity::OneHour.bucket_ms(), 3_600_000);
}
