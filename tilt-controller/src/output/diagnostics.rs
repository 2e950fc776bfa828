use shared_definitions::controller::{ControlOutput, ResponseTuneInput};

/// Debug readout of the tuning values and the last joystick write.
///
/// Refreshed on every tick and on every event. An event banner stays until
/// the next tick or until its restore comes due, whichever is first.
#[derive(Debug, Default, Clone)]
pub struct DiagnosticOverlay {
    text: String,
    banner: u64,
    showing_banner: bool,
}

impl DiagnosticOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn show_outputs(&mut self, tune: &ResponseTuneInput, output: &ControlOutput) {
        self.showing_banner = false;
        self.text = format!(
            "{}\n-Clamped Roll: {:.2}\nClamped Pitch: {:.2}",
            parameter_lines(tune),
            output.x,
            output.y
        );
    }

    pub fn show_event(&mut self, tune: &ResponseTuneInput, label: &str) -> u64 {
        self.banner += 1;
        self.showing_banner = true;
        self.text = format!("{}\n{}", parameter_lines(tune), label);
        self.banner
    }

    /// Back to the parameter view with zeroed outputs if `banner` is still
    /// the one on screen.
    pub fn restore(&mut self, banner: u64, tune: &ResponseTuneInput) {
        if self.showing_banner && banner == self.banner {
            self.show_outputs(tune, &ControlOutput::default());
        }
    }
}

fn parameter_lines(tune: &ResponseTuneInput) -> String {
    format!(
        "Roll Base Amp: {:.2}\nRoll Decay: {:.2}\nPitch Base Amp: {:.2}\nPitch Decay: {:.2}",
        tune.roll.base_amplification,
        tune.roll.decay_factor,
        tune.pitch.base_amplification,
        tune.pitch.decay_factor
    )
}
