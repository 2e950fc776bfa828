use crate::util::{time::Millis, vectors::RotationVector2D};

pub trait MotionSource {
    fn is_device_motion_available(&self) -> bool;

    /// Latest attitude, `None` while the service has nothing to report yet.
    fn read_attitude(&mut self) -> Option<RotationVector2D>;

    fn start_updates(&mut self, _interval_ms: Millis) {}

    fn stop_updates(&mut self) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoMotion;

impl MotionSource for NoMotion {
    fn is_device_motion_available(&self) -> bool {
        false
    }

    fn read_attitude(&mut self) -> Option<RotationVector2D> {
        None
    }
}
