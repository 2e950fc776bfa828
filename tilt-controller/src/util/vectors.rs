use std::ops::Sub;

use shared_definitions::controller::AttitudeSample;

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct RotationVector2D {
    pub roll: f64,
    pub pitch: f64,
}

impl RotationVector2D {
    pub const fn new(roll: f64, pitch: f64) -> Self {
        Self { roll, pitch }
    }
}

impl Sub<RotationVector2D> for RotationVector2D {
    type Output = RotationVector2D;

    fn sub(self, rhs: RotationVector2D) -> Self::Output {
        Self {
            roll: self.roll - rhs.roll,
            pitch: self.pitch - rhs.pitch,
        }
    }
}

impl From<&AttitudeSample> for RotationVector2D {
    fn from(sample: &AttitudeSample) -> Self {
        Self {
            roll: sample.roll,
            pitch: sample.pitch,
        }
    }
}
