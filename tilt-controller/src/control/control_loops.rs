use shared_definitions::controller::{AttitudeSample, ControlOutput, ResponseTuneInput};

use crate::util::vectors::RotationVector2D;

use super::{calibration::CalibrationBaseline, response_curve::apply_response_curve};

/// One tick of the tilt to joystick translation.
///
/// Roll is measured against the calibrated baseline and its curve output is
/// inverted before it leaves. Pitch has no baseline and is negated before the
/// curve. Both flips are part of the page contract.
pub fn compute_control_output(
    sample: &AttitudeSample,
    baseline: &CalibrationBaseline,
    tune: &ResponseTuneInput,
) -> ControlOutput {
    let neutral = RotationVector2D::new(baseline.roll_zero, 0.0);
    let deviation = RotationVector2D::from(sample) - neutral;

    let plane_rotation = apply_response_curve(deviation.roll, &tune.roll);
    let plane_tilt = apply_response_curve(-deviation.pitch, &tune.pitch);

    ControlOutput {
        x: -plane_rotation,
        y: plane_tilt,
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::config::store::default_tune_input;

    fn sample(roll: f64, pitch: f64) -> AttitudeSample {
        AttitudeSample {
            roll,
            pitch,
            timestamp: 0,
        }
    }

    #[test]
    fn level_at_baseline_is_centered() {
        let baseline = CalibrationBaseline { roll_zero: 0.31 };
        let output = compute_control_output(&sample(0.31, 0.0), &baseline, &default_tune_input());
        assert_eq!(output.x, 0.0);
        assert_eq!(output.y, 0.0);
    }

    #[test]
    fn roll_is_inverted_after_the_curve() {
        let baseline = CalibrationBaseline { roll_zero: 0.0 };
        let output = compute_control_output(&sample(0.5, 0.0), &baseline, &default_tune_input());
        assert_abs_diff_eq!(output.x, -0.635_14, epsilon = 1e-4);
        assert_eq!(output.y, 0.0);
    }

    #[test]
    fn pitch_is_negated_before_the_curve() {
        let baseline = CalibrationBaseline { roll_zero: 0.0 };
        let output = compute_control_output(&sample(0.0, 0.5), &baseline, &default_tune_input());
        assert_abs_diff_eq!(output.y, -0.635_14, epsilon = 1e-4);
    }

    #[test]
    fn pitch_ignores_roll_baseline() {
        let baseline = CalibrationBaseline { roll_zero: 1.2 };
        let output = compute_control_output(&sample(1.2, -0.2), &baseline, &default_tune_input());
        let unbiased = compute_control_output(
            &sample(0.0, -0.2),
            &CalibrationBaseline { roll_zero: 0.0 },
            &default_tune_input(),
        );
        assert_eq!(output.y, unbiased.y);
    }

    #[test]
    fn axes_use_their_own_parameters() {
        let mut tune = default_tune_input();
        tune.roll.base_amplification = 100.0;
        let baseline = CalibrationBaseline { roll_zero: 0.0 };
        let output = compute_control_output(&sample(0.5, -0.5), &baseline, &tune);
        assert_eq!(output.x, -1.0);
        assert_abs_diff_eq!(output.y, 0.635_14, epsilon = 1e-4);
    }
}
