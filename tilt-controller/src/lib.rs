//! Turns device tilt into a virtual joystick for a game page running inside an
//! embedded web runtime.
//!
//! The motion service is sampled on a fixed period, the first reading after a
//! reset becomes the level baseline, and every following reading is shaped by
//! the response curve and written into the page's joystick state. The page
//! reports game events back through a message handler.

pub mod communication_interfaces;
pub mod config;
pub mod control;
pub mod drivers;
pub mod host;
pub mod output;
pub mod telemetry;
pub mod util;

pub use communication_interfaces::{
    bridge::{BridgeChannel, BridgeConfig},
    script_runtime::{ScriptCompletion, ScriptResult, ScriptRuntime},
};
pub use config::{host_config::HostConfig, store::ParameterStore};
pub use drivers::motion_sensors::{MotionSource, NoMotion};
pub use host::{CalibrationStart, TiltHost};
pub use output::feedback::{FeedbackDevice, NoFeedback};
pub use util::error::AppError;
