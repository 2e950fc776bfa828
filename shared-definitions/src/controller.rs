#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AttitudeSample {
    pub roll: f64,
    pub pitch: f64,
    pub timestamp: u64,
}

/// Joystick values pushed to the game every tick.
///
/// `x` is the roll channel (already sign inverted after the curve) and `y` is
/// the pitch channel. Both are kept inside [-1, 1].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ControlOutput {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisTuneConfig {
    pub base_amplification: f64,
    pub decay_factor: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResponseTuneInput {
    pub roll: AxisTuneConfig,
    pub pitch: AxisTuneConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Roll,
    Pitch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TuneParameter {
    BaseAmplification,
    DecayFactor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TuneDirection {
    Increase,
    Decrease,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TuningAction {
    pub axis: Axis,
    pub parameter: TuneParameter,
    pub direction: TuneDirection,
}

impl TuningAction {
    pub const fn new(axis: Axis, parameter: TuneParameter, direction: TuneDirection) -> Self {
        Self {
            axis,
            parameter,
            direction,
        }
    }

    pub const ALL: [TuningAction; 8] = [
        TuningAction::new(Axis::Roll, TuneParameter::BaseAmplification, TuneDirection::Increase),
        TuningAction::new(Axis::Roll, TuneParameter::BaseAmplification, TuneDirection::Decrease),
        TuningAction::new(Axis::Roll, TuneParameter::DecayFactor, TuneDirection::Increase),
        TuningAction::new(Axis::Roll, TuneParameter::DecayFactor, TuneDirection::Decrease),
        TuningAction::new(Axis::Pitch, TuneParameter::BaseAmplification, TuneDirection::Increase),
        TuningAction::new(Axis::Pitch, TuneParameter::BaseAmplification, TuneDirection::Decrease),
        TuningAction::new(Axis::Pitch, TuneParameter::DecayFactor, TuneDirection::Increase),
        TuningAction::new(Axis::Pitch, TuneParameter::DecayFactor, TuneDirection::Decrease),
    ];
}
