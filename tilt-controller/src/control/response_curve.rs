use libm::{exp, fabs};
use shared_definitions::controller::AxisTuneConfig;

/// Maps a deviation from neutral (radians) to a joystick value in [-1, 1].
///
/// The gain is `base_amplification * e^(-decay_factor * |deviation|)`: steep
/// around neutral and fading out as the tilt grows, so the product stays
/// small for large tilts. The final clamp holds whatever the parameters are.
pub fn apply_response_curve(deviation: f64, tune: &AxisTuneConfig) -> f64 {
    // An infinite tilt has a zero limit, the product below would be NaN.
    if !deviation.is_finite() {
        return 0.0;
    }
    let multiplier = tune.base_amplification * exp(-tune.decay_factor * fabs(deviation));
    let output = deviation * multiplier;
    if output.is_nan() {
        return 0.0;
    }
    output.clamp(-1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn tune(base_amplification: f64, decay_factor: f64) -> AxisTuneConfig {
        AxisTuneConfig {
            base_amplification,
            decay_factor,
        }
    }

    #[test]
    fn neutral_maps_to_zero() {
        for (a, k) in [(0.1, 0.1), (4.9, 2.7), (50.0, 0.1), (0.1, 30.0)] {
            assert_eq!(apply_response_curve(0.0, &tune(a, k)), 0.0);
        }
    }

    #[test]
    fn half_radian_with_defaults() {
        let output = apply_response_curve(0.5, &tune(4.9, 2.7));
        // 4.9 * e^-1.35 = 1.2703..., times 0.5
        assert_abs_diff_eq!(output, 0.635_14, epsilon = 1e-4);
        assert_abs_diff_eq!(apply_response_curve(-0.5, &tune(4.9, 2.7)), -output);
    }

    #[test]
    fn decay_suppresses_large_deviation() {
        let output = apply_response_curve(5.0, &tune(4.9, 2.7));
        // 4.9 * e^-13.5 = 6.72e-6, times 5
        assert_abs_diff_eq!(output, 3.359e-5, epsilon = 1e-7);
        assert!(output < apply_response_curve(0.5, &tune(4.9, 2.7)));
    }

    #[test]
    fn output_is_bounded() {
        let parameters = [(0.1, 0.1), (4.9, 2.7), (100.0, 0.1), (1000.0, 0.1), (7.5, 12.0)];
        let mut deviation = -20.0;
        while deviation <= 20.0 {
            for (a, k) in parameters {
                let output = apply_response_curve(deviation, &tune(a, k));
                assert!((-1.0..=1.0).contains(&output), "{deviation} {a} {k} -> {output}");
            }
            deviation += 0.01;
        }
    }

    #[test]
    fn large_gain_saturates_at_the_clamp() {
        assert_eq!(apply_response_curve(0.5, &tune(100.0, 0.1)), 1.0);
        assert_eq!(apply_response_curve(-0.5, &tune(100.0, 0.1)), -1.0);
    }

    #[test]
    fn magnitude_grows_near_neutral() {
        let parameters = tune(4.9, 2.7);
        // The product peaks at 1 / decay, keep below that
        let mut previous = 0.0;
        let mut deviation = 0.0;
        while deviation < 1.0 / 2.7 {
            let output = apply_response_curve(deviation, &parameters);
            assert!(output >= previous);
            assert!(-apply_response_curve(-deviation, &parameters) >= previous);
            previous = output;
            deviation += 0.005;
        }
    }

    #[test]
    fn infinite_parameters_stay_bounded() {
        assert_eq!(apply_response_curve(0.0, &tune(f64::INFINITY, 2.7)), 0.0);
        assert_eq!(apply_response_curve(0.0, &tune(4.9, f64::INFINITY)), 0.0);
        assert_eq!(apply_response_curve(0.2, &tune(f64::INFINITY, 2.7)), 1.0);
        assert_eq!(apply_response_curve(-0.2, &tune(f64::INFINITY, 2.7)), -1.0);
    }

    #[test]
    fn non_finite_deviation_is_neutral() {
        assert_eq!(apply_response_curve(f64::INFINITY, &tune(4.9, 2.7)), 0.0);
        assert_eq!(apply_response_curve(f64::NEG_INFINITY, &tune(4.9, 2.7)), 0.0);
        assert_eq!(apply_response_curve(f64::NAN, &tune(4.9, 2.7)), 0.0);
    }
}
