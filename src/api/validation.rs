use crate::core::{AxisGeometry, iso_weekday};
use crate::error::{ChartError, ChartResult};

use super::{RealtimeAxisOptions, RealtimeOverrides, StreamingOptions, TimeAxisOptions};

pub(super) fn validate_streaming_options(options: StreamingOptions) -> ChartResult<StreamingOptions> {
    validate_duration(options.duration)?;
    validate_delay(options.delay)?;
    if let Some(ttl) = options.ttl {
        validate_ttl(ttl)?;
    }
    validate_refresh(options.refresh)?;
    validate_frame_rate(options.frame_rate)?;
    Ok(options)
}

pub(super) fn validate_realtime_axis_options(
    options: RealtimeAxisOptions,
) -> ChartResult<RealtimeAxisOptions> {
    validate_overrides(options.realtime)?;
    validate_time_axis_options(options.time)?;
    Ok(options)
}

pub(super) fn validate_axis_geometry(geometry: AxisGeometry) -> ChartResult<AxisGeometry> {
    geometry.validate()
}

fn validate_overrides(overrides: RealtimeOverrides) -> ChartResult<RealtimeOverrides> {
    if let Some(duration) = overrides.duration {
        validate_duration(duration)?;
    }
    if let Some(delay) = overrides.delay {
        validate_delay(delay)?;
    }
    if let Some(ttl) = overrides.ttl {
        validate_ttl(ttl)?;
    }
    if let Some(refresh) = overrides.refresh {
        validate_refresh(refresh)?;
    }
    if let Some(frame_rate) = overrides.frame_rate {
        validate_frame_rate(frame_rate)?;
    }
    Ok(overrides)
}

fn validate_time_axis_options(options: TimeAxisOptions) -> ChartResult<TimeAxisOptions> {
    if options.step_size == Some(0) {
        return Err(ChartError::InvalidData(
            "time-axis step size must be >= 1".to_owned(),
        ));
    }
    if let Some(weekday) = options.iso_weekday {
        if iso_weekday(weekday).is_none() {
            return Err(ChartError::InvalidData(
                "time-axis iso weekday must be between 1 and 7".to_owned(),
            ));
        }
    }
    Ok(options)
}

pub(super) fn validate_duration(duration: f64) -> ChartResult<f64> {
    if !duration.is_finite() || duration <= 0.0 {
        return Err(ChartError::InvalidData(
            "realtime duration must be finite and > 0".to_owned(),
        ));
    }
    Ok(duration)
}

pub(super) fn validate_delay(delay: f64) -> ChartResult<f64> {
    if !delay.is_finite() {
        return Err(ChartError::InvalidData(
            "realtime delay must be finite".to_owned(),
        ));
    }
    Ok(delay)
}

fn validate_ttl(ttl: f64) -> ChartResult<f64> {
    if !ttl.is_finite() || ttl < 0.0 {
        return Err(ChartError::InvalidData(
            "realtime ttl must be finite and >= 0".to_owned(),
        ));
    }
    Ok(ttl)
}

fn validate_refresh(refresh: f64) -> ChartResult<f64> {
    if !refresh.is_finite() || refresh < 0.0 {
        return Err(ChartError::InvalidData(
            "realtime refresh must be finite and >= 0".to_owned(),
        ));
    }
    Ok(refresh)
}

fn validate_frame_rate(frame_rate: f64) -> ChartResult<f64> {
    if !frame_rate.is_finite() || frame_rate <= 0.0 {
        return Err(ChartError::InvalidData(
            "realtime frame rate must be finite and > 0".to_owned(),
        ));
    }
    Ok(frame_rate)
}

#[cfg(test)]
mod tests {
    use super::{validate_realtime_axis_options, validate_streaming_options};
    use crate::api::{RealtimeAxisOptions, RealtimeOverrides, StreamingOptions, TimeAxisOptions};

    #[test]
    fn defaults_are_valid() {
        assert!(validate_streaming_options(StreamingOptions::default()).is_ok());
        assert!(validate_realtime_axis_options(RealtimeAxisOptions::default()).is_ok());
    }

    #[test]
    fn rejects_non_positive_duration_and_frame_rate() {
        assert!(validate_streaming_options(StreamingOptions::default().with_duration(0.0)).is_err());
        assert!(
            validate_streaming_options(StreamingOptions::default().with_frame_rate(f64::NAN))
                .is_err()
        );
    }

    #[test]
    fn rejects_out_of_range_weekday_and_zero_step() {
        let weekday = RealtimeAxisOptions::default().with_time(TimeAxisOptions {
            iso_weekday: Some(8),
            ..TimeAxisOptions::default()
        });
        assert!(validate_realtime_axis_options(weekday).is_err());

        let step = RealtimeAxisOptions::default().with_time(TimeAxisOptions {
            step_size: Some(0),
            ..TimeAxisOptions::default()
        });
        assert!(validate_realtime_axis_options(step).is_err());
    }

    #[test]
    fn rejects_negative_override_ttl() {
        let options = RealtimeAxisOptions::default().with_realtime(RealtimeOverrides {
            ttl: Some(-1.0),
            ..RealtimeOverrides::default()
        });
        assert!(validate_realtime_axis_options(options).is_err());
    }
}
