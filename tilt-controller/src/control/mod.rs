pub mod calibration;
pub mod control_loops;
pub mod response_curve;
