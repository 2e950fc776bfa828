// Response curve defaults, same for both axes
pub const DEFAULT_BASE_AMPLIFICATION: f64 = 4.9;
pub const DEFAULT_DECAY_FACTOR: f64 = 2.7;

// Tuning buttons
pub const TUNING_STEP: f64 = 0.1;
pub const TUNING_FLOOR: f64 = 0.1;

// Motion service
pub const MOTION_UPDATE_INTERVAL_MS: u64 = 20; // 50Hz
pub const CALIBRATION_TIMEOUT_MS: u64 = 1000;

// Diagnostics
pub const DEBUG_OVERLAY: bool = true;
pub const EVENT_BANNER_HOLD_MS: u64 = 500;
pub const TELEMETRY_REPORT_INTERVAL_MS: u64 = 1000;

// Page contract
pub const REMOTE_CONTENT_URL: &str = "https://fly.pieter.com";
pub const JOYSTICK_STATE_OBJECT: &str = "leftJoystickData";
pub const ROLL_CHANNEL_FIELD: &str = "y";
pub const PITCH_CHANNEL_FIELD: &str = "x";
pub const HOOKED_GAME_FUNCTION: &str = "shootMissile";
