use chart_realtime::ChartError;
use chart_realtime::api::{
    TickRequest, TickSource, TimeAxisOptions, determine_step_size, determine_unit_for_auto_ticks,
    generate_ticks, label_capacity,
};
use chart_realtime::core::TimeUnit;
use chrono::{Datelike, TimeZone, Utc, Weekday};

fn utc_ms(y: i32, mo: u32, d: u32, h: u32) -> f64 {
    Utc.with_ymd_and_hms(y, mo, d, h, 0, 0)
        .single()
        .expect("valid datetime")
        .timestamp_millis() as f64
}

fn seconds(step_size: Option<u32>) -> TimeAxisOptions {
    TimeAxisOptions {
        unit: Some(TimeUnit::Second),
        step_size,
        ..TimeAxisOptions::default()
    }
}

#[test]
fn ten_seconds_at_capacity_six_step_by_two() {
    let request = TickRequest::new(0.0, 10_000.0, 6).with_time(seconds(None));
    let ticks = generate_ticks(&request, None).expect("ticks");

    assert_eq!(ticks.minor, TimeUnit::Second);
    assert_eq!(ticks.step, 2);
    assert_eq!(ticks.major, Some(TimeUnit::Minute));
    assert_eq!(
        ticks.values(),
        vec![0.0, 2_000.0, 4_000.0, 6_000.0, 8_000.0, 10_000.0]
    );
    assert!(ticks.ticks[0].major);
    assert_eq!(ticks.majors().count(), 1);
}

#[test]
fn refresh_lookahead_adds_one_tick_past_max() {
    let request = TickRequest::new(0.0, 10_000.0, 6)
        .with_refresh(1_000.0)
        .with_time(seconds(None));
    let ticks = generate_ticks(&request, None).expect("ticks");

    assert_eq!(ticks.last().map(|tick| tick.value), Some(12_000.0));
    assert_eq!(ticks.len(), 7);
}

#[test]
fn auto_unit_uses_label_capacity() {
    assert_eq!(
        determine_unit_for_auto_ticks(TimeUnit::Millisecond, 0.0, 10_000.0, 6),
        TimeUnit::Second
    );
    assert_eq!(
        determine_unit_for_auto_ticks(TimeUnit::Millisecond, 0.0, 3_600_000.0, 10),
        TimeUnit::Minute
    );
    assert_eq!(determine_step_size(0.0, 3_600_000.0, TimeUnit::Minute, 10), 10);
    assert_eq!(
        determine_unit_for_auto_ticks(TimeUnit::Hour, 0.0, 10_000.0, 6),
        TimeUnit::Hour
    );
    assert_eq!(
        determine_unit_for_auto_ticks(TimeUnit::Millisecond, 0.0, 1e15, 2),
        TimeUnit::Year
    );
}

#[test]
fn auto_ticks_for_default_window() {
    let request = TickRequest::new(0.0, 10_000.0, label_capacity(600.0, 100.0));
    let ticks = generate_ticks(&request, None).expect("ticks");

    assert_eq!(ticks.minor, TimeUnit::Second);
    assert_eq!(ticks.step, 2);
}

#[test]
fn first_tick_aligns_to_major_unit_multiple() {
    let request = TickRequest::new(65_000.0, 125_000.0, 10).with_time(seconds(Some(10)));
    let ticks = generate_ticks(&request, None).expect("ticks");

    assert_eq!(
        ticks.values(),
        vec![
            60_000.0, 70_000.0, 80_000.0, 90_000.0, 100_000.0, 110_000.0, 120_000.0, 130_000.0
        ]
    );
    let majors: Vec<f64> = ticks.majors().map(|tick| tick.value).collect();
    assert_eq!(majors, vec![60_000.0, 120_000.0]);
}

#[test]
fn disabled_major_alignment_starts_at_unit_boundary() {
    let options = TimeAxisOptions {
        major_enabled: false,
        ..seconds(Some(10))
    };
    let request = TickRequest::new(65_000.0, 125_000.0, 10).with_time(options);
    let ticks = generate_ticks(&request, None).expect("ticks");

    assert_eq!(ticks.values()[0], 65_000.0);
    assert_eq!(ticks.last().map(|tick| tick.value), Some(125_000.0));
}

#[test]
fn round_option_disables_major_alignment() {
    let options = TimeAxisOptions {
        round: Some(TimeUnit::Second),
        ..seconds(Some(10))
    };
    let request = TickRequest::new(65_000.0, 125_000.0, 10).with_time(options);
    let ticks = generate_ticks(&request, None).expect("ticks");

    assert_eq!(ticks.values()[0], 65_000.0);
}

#[test]
fn week_ticks_start_on_configured_weekday() {
    let min = utc_ms(2024, 3, 14, 12);
    let max = utc_ms(2024, 3, 28, 12);
    let options = TimeAxisOptions {
        unit: Some(TimeUnit::Week),
        step_size: Some(1),
        iso_weekday: Some(1),
        ..TimeAxisOptions::default()
    };
    let ticks = generate_ticks(&TickRequest::new(min, max, 10).with_time(options), None)
        .expect("ticks");

    assert_eq!(
        ticks.values(),
        vec![
            utc_ms(2024, 3, 11, 0),
            utc_ms(2024, 3, 18, 0),
            utc_ms(2024, 3, 25, 0),
            utc_ms(2024, 4, 1, 0),
        ]
    );
    for value in ticks.values() {
        let date = Utc
            .timestamp_millis_opt(value as i64)
            .single()
            .expect("valid tick");
        assert_eq!(date.weekday(), Weekday::Mon);
    }
}

#[test]
fn month_ticks_follow_the_calendar() {
    let options = TimeAxisOptions {
        unit: Some(TimeUnit::Month),
        step_size: Some(1),
        ..TimeAxisOptions::default()
    };
    let request =
        TickRequest::new(utc_ms(2024, 1, 15, 0), utc_ms(2024, 4, 15, 0), 12).with_time(options);
    let ticks = generate_ticks(&request, None).expect("ticks");

    assert_eq!(
        ticks.values(),
        vec![
            utc_ms(2024, 1, 1, 0),
            utc_ms(2024, 2, 1, 0),
            utc_ms(2024, 3, 1, 0),
            utc_ms(2024, 4, 1, 0),
            utc_ms(2024, 5, 1, 0),
        ]
    );
    assert_eq!(ticks.major, Some(TimeUnit::Year));
    assert_eq!(ticks.majors().count(), 1);
}

#[test]
fn data_source_snaps_forward_and_drops_unmatched_ticks() {
    let options = TimeAxisOptions {
        source: TickSource::Data,
        ..seconds(Some(2))
    };
    let request = TickRequest::new(0.0, 10_000.0, 6).with_time(options);
    let timestamps = [500.0, 2_500.0, 4_100.0, 9_000.0];
    let ticks = generate_ticks(&request, Some(&timestamps)).expect("ticks");

    assert_eq!(ticks.values(), vec![500.0, 2_500.0, 4_100.0, 9_000.0]);
}

#[test]
fn data_source_without_samples_yields_no_ticks() {
    let options = TimeAxisOptions {
        source: TickSource::Data,
        ..seconds(Some(2))
    };
    let ticks = generate_ticks(&TickRequest::new(0.0, 10_000.0, 6).with_time(options), None)
        .expect("ticks");
    assert!(ticks.is_empty());
}

#[test]
fn oversized_range_is_rejected() {
    let options = TimeAxisOptions {
        unit: Some(TimeUnit::Millisecond),
        step_size: Some(1),
        ..TimeAxisOptions::default()
    };
    let request = TickRequest::new(0.0, 100_001_000.0, 10).with_time(options);
    let err = generate_ticks(&request, None).expect_err("range must be rejected");

    assert!(matches!(
        err,
        ChartError::TickRangeTooLarge {
            step: 1,
            unit: TimeUnit::Millisecond,
            ..
        }
    ));
    assert!(err.to_string().contains("too far apart"));
}

#[test]
fn oversized_lookahead_reports_the_requested_bounds() {
    let options = TimeAxisOptions {
        unit: Some(TimeUnit::Millisecond),
        step_size: Some(1),
        ..TimeAxisOptions::default()
    };
    let request = TickRequest::new(0.0, 1_000.0, 10)
        .with_refresh(2_000_000.0)
        .with_time(options);
    let err = generate_ticks(&request, None).expect_err("lookahead must be rejected");

    assert!(matches!(
        err,
        ChartError::TickRangeTooLarge { min, max, step: 1, .. } if min == 0.0 && max == 1_000.0
    ));
}

#[test]
fn range_at_the_bound_is_accepted() {
    let options = TimeAxisOptions {
        unit: Some(TimeUnit::Second),
        step_size: Some(1),
        ..TimeAxisOptions::default()
    };
    let request = TickRequest::new(0.0, 100_000_000.0, 10).with_time(options);
    let ticks = generate_ticks(&request, None).expect("exactly at the bound");
    assert_eq!(ticks.len(), 100_001);
}
