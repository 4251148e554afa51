use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

use super::StreamingConfig;
use super::validation::{validate_realtime_axis_options, validate_streaming_options};

pub const STREAMING_CONFIG_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamingConfigJsonContractV1 {
    pub schema_version: u32,
    pub config: StreamingConfig,
}

impl StreamingConfig {
    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = StreamingConfigJsonContractV1 {
            schema_version: STREAMING_CONFIG_JSON_SCHEMA_V1,
            config: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize streaming config contract v1: {e}"))
        })
    }

    /// Parses either a bare config or a versioned v1 contract, then validates it.
    pub fn from_json_compat_str(input: &str) -> ChartResult<Self> {
        let config = if let Ok(config) = serde_json::from_str::<Self>(input) {
            config
        } else {
            let payload: StreamingConfigJsonContractV1 =
                serde_json::from_str(input).map_err(|e| {
                    ChartError::InvalidData(format!("failed to parse streaming config json: {e}"))
                })?;
            if payload.schema_version != STREAMING_CONFIG_JSON_SCHEMA_V1 {
                return Err(ChartError::InvalidData(format!(
                    "unsupported streaming config schema version: {}",
                    payload.schema_version
                )));
            }
            payload.config
        };
        config.validate()
    }

    pub fn validate(self) -> ChartResult<Self> {
        validate_streaming_options(self.streaming)?;
        for options in self.axes.values() {
            validate_realtime_axis_options(*options)?;
        }
        Ok(self)
    }
}
