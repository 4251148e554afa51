use chart_realtime::api::{
    RealtimeAxisOptions, RealtimeOverrides, STREAMING_CONFIG_JSON_SCHEMA_V1,
    StreamingConfigJsonContractV1, TickSource, TimeAxisOptions,
};
use chart_realtime::core::{AxisId, TimeUnit};
use chart_realtime::{StreamingConfig, StreamingOptions};

fn config() -> StreamingConfig {
    let mut config = StreamingConfig {
        streaming: StreamingOptions::default()
            .with_duration(60_000.0)
            .with_ttl(Some(120_000.0))
            .with_frame_rate(24.0),
        ..StreamingConfig::default()
    };
    config.axes.insert(
        AxisId::from("x"),
        RealtimeAxisOptions::default()
            .with_realtime(RealtimeOverrides {
                delay: Some(2_000.0),
                ..RealtimeOverrides::default()
            })
            .with_time(TimeAxisOptions {
                unit: Some(TimeUnit::Second),
                step_size: Some(5),
                source: TickSource::Data,
                ..TimeAxisOptions::default()
            }),
    );
    config
}

#[test]
fn contract_v1_roundtrips() {
    let json = config().to_json_contract_v1_pretty().expect("serialize");
    let payload: StreamingConfigJsonContractV1 = serde_json::from_str(&json).expect("payload");
    assert_eq!(payload.schema_version, STREAMING_CONFIG_JSON_SCHEMA_V1);

    let restored = StreamingConfig::from_json_compat_str(&json).expect("parse");
    assert_eq!(restored, config());
}

#[test]
fn bare_config_with_defaults_is_accepted() {
    let restored = StreamingConfig::from_json_compat_str(r#"{ "axes": { "x": {} } }"#)
        .expect("bare config");

    assert_eq!(restored.streaming, StreamingOptions::default());
    assert_eq!(
        restored.axes.get(&AxisId::from("x")),
        Some(&RealtimeAxisOptions::default())
    );
}

#[test]
fn units_and_sources_use_lowercase_names() {
    let json = r#"{
        "axes": {
            "x": { "time": { "unit": "minute", "round": "second", "source": "data", "iso_weekday": 1 } }
        }
    }"#;
    let restored = StreamingConfig::from_json_compat_str(json).expect("config");
    let time = restored.axes[&AxisId::from("x")].time;

    assert_eq!(time.unit, Some(TimeUnit::Minute));
    assert_eq!(time.round, Some(TimeUnit::Second));
    assert_eq!(time.source, TickSource::Data);
    assert_eq!(time.iso_weekday, Some(1));
    assert!(time.major_enabled);
}

#[test]
fn iso_weekday_flag_selects_monday() {
    let weekday = |value: &str| {
        let json = format!(r#"{{ "axes": {{ "x": {{ "time": {{ "iso_weekday": {value} }} }} }} }}"#);
        StreamingConfig::from_json_compat_str(&json).expect("config").axes[&AxisId::from("x")]
            .time
            .iso_weekday
    };

    assert_eq!(weekday("true"), Some(1));
    assert_eq!(weekday("false"), None);
    assert_eq!(weekday("null"), None);
    assert_eq!(weekday("3"), Some(3));
}

#[test]
fn unsupported_schema_version_is_rejected() {
    let json = r#"{ "schema_version": 7, "config": {} }"#;
    let err = StreamingConfig::from_json_compat_str(json).expect_err("version 7");
    assert!(err.to_string().contains("unsupported streaming config schema version"));
}

#[test]
fn invalid_values_are_rejected_after_parsing() {
    let zero_duration = r#"{ "streaming": { "duration": 0 } }"#;
    assert!(StreamingConfig::from_json_compat_str(zero_duration).is_err());

    let bad_weekday = r#"{ "axes": { "x": { "time": { "iso_weekday": 9 } } } }"#;
    assert!(StreamingConfig::from_json_compat_str(bad_weekday).is_err());

    let zero_step = r#"{ "axes": { "x": { "time": { "step_size": 0 } } } }"#;
    assert!(StreamingConfig::from_json_compat_str(zero_step).is_err());
}

#[test]
fn malformed_json_is_reported() {
    let err = StreamingConfig::from_json_compat_str("{ not json").expect_err("malformed");
    assert!(err.to_string().contains("failed to parse streaming config json"));
}
