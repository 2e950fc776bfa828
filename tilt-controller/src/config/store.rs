use shared_definitions::controller::{
    Axis, AxisTuneConfig, ResponseTuneInput, TuneDirection, TuneParameter, TuningAction,
};

use super::constants::{
    DEFAULT_BASE_AMPLIFICATION, DEFAULT_DECAY_FACTOR, TUNING_FLOOR, TUNING_STEP,
};

/// A single tunable scalar. Increases are unbounded, decreases saturate at
/// [`TUNING_FLOOR`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TunableParameter {
    value: f64,
    step: f64,
}

impl TunableParameter {
    pub fn new(value: f64) -> Self {
        Self::with_step(value, TUNING_STEP)
    }

    pub fn with_step(value: f64, step: f64) -> Self {
        let value = if value.is_finite() {
            value.max(TUNING_FLOOR)
        } else {
            log::warn!("Ignoring non-finite tuning value {}", value);
            TUNING_FLOOR
        };
        Self { value, step }
    }

    pub fn get(&self) -> f64 {
        self.value
    }

    pub fn increase(&mut self) -> f64 {
        self.value += self.step;
        self.value
    }

    pub fn decrease(&mut self) -> f64 {
        self.value = (self.value - self.step).max(TUNING_FLOOR);
        self.value
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisParameters {
    pub base_amplification: TunableParameter,
    pub decay_factor: TunableParameter,
}

impl AxisParameters {
    fn from_config(config: &AxisTuneConfig) -> Self {
        Self {
            base_amplification: TunableParameter::new(config.base_amplification),
            decay_factor: TunableParameter::new(config.decay_factor),
        }
    }

    pub fn map_to_tune_config(&self) -> AxisTuneConfig {
        AxisTuneConfig {
            base_amplification: self.base_amplification.get(),
            decay_factor: self.decay_factor.get(),
        }
    }
}

/// Session scoped response parameters, two per axis.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterStore {
    roll: AxisParameters,
    pitch: AxisParameters,
}

impl ParameterStore {
    pub fn new(initial: ResponseTuneInput) -> Self {
        Self {
            roll: AxisParameters::from_config(&initial.roll),
            pitch: AxisParameters::from_config(&initial.pitch),
        }
    }

    pub fn parameter_mut(&mut self, axis: Axis, parameter: TuneParameter) -> &mut TunableParameter {
        let axis_parameters = match axis {
            Axis::Roll => &mut self.roll,
            Axis::Pitch => &mut self.pitch,
        };
        match parameter {
            TuneParameter::BaseAmplification => &mut axis_parameters.base_amplification,
            TuneParameter::DecayFactor => &mut axis_parameters.decay_factor,
        }
    }

    pub fn apply(&mut self, action: TuningAction) -> f64 {
        let parameter = self.parameter_mut(action.axis, action.parameter);
        let value = match action.direction {
            TuneDirection::Increase => parameter.increase(),
            TuneDirection::Decrease => parameter.decrease(),
        };
        let verb = match action.direction {
            TuneDirection::Increase => "increased",
            TuneDirection::Decrease => "decreased",
        };
        log::info!(
            "{} {} to: {}",
            parameter_label(action.axis, action.parameter),
            verb,
            value
        );
        value
    }

    pub fn map_to_tune_input(&self) -> ResponseTuneInput {
        ResponseTuneInput {
            roll: self.roll.map_to_tune_config(),
            pitch: self.pitch.map_to_tune_config(),
        }
    }
}

impl Default for ParameterStore {
    fn default() -> Self {
        Self::new(default_tune_input())
    }
}

pub fn default_tune_input() -> ResponseTuneInput {
    let axis = AxisTuneConfig {
        base_amplification: DEFAULT_BASE_AMPLIFICATION,
        decay_factor: DEFAULT_DECAY_FACTOR,
    };
    ResponseTuneInput {
        roll: axis,
        pitch: axis,
    }
}

pub fn parameter_label(axis: Axis, parameter: TuneParameter) -> &'static str {
    match (axis, parameter) {
        (Axis::Roll, TuneParameter::BaseAmplification) => "Roll Base Amplification",
        (Axis::Roll, TuneParameter::DecayFactor) => "Roll Decay Factor",
        (Axis::Pitch, TuneParameter::BaseAmplification) => "Pitch Base Amplification",
        (Axis::Pitch, TuneParameter::DecayFactor) => "Pitch Decay Factor",
    }
}
