use shared_definitions::controller::ResponseTuneInput;

use crate::{
    communication_interfaces::bridge::BridgeConfig,
    drivers::motion_sampler::SamplerConfig,
    util::time::Millis,
};

use super::{
    constants::{
        CALIBRATION_TIMEOUT_MS, DEBUG_OVERLAY, REMOTE_CONTENT_URL, TELEMETRY_REPORT_INTERVAL_MS,
    },
    store::default_tune_input,
};

#[derive(Debug, Clone, PartialEq)]
pub struct HostConfig {
    pub tuning: ResponseTuneInput,
    pub sampler: SamplerConfig,
    pub calibration_timeout_ms: Millis,
    pub bridge: BridgeConfig,
    pub content_url: String,
    pub debug: bool,
    /// `None` disables the periodic telemetry log.
    pub telemetry_interval_ms: Option<Millis>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            tuning: default_tune_input(),
            sampler: SamplerConfig::default(),
            calibration_timeout_ms: CALIBRATION_TIMEOUT_MS,
            bridge: BridgeConfig::default(),
            content_url: REMOTE_CONTENT_URL.to_string(),
            debug: DEBUG_OVERLAY,
            telemetry_interval_ms: Some(TELEMETRY_REPORT_INTERVAL_MS),
        }
    }
}
