use shared_definitions::controller::ControlOutput;

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Telemetry {
    pub samples_processed: u64,
    pub writes_dispatched: u64,
    pub write_failures: u64,
    pub events_received: u64,
    pub calibrations_committed: u64,
    pub last_output: Option<ControlOutput>,
}

impl Telemetry {
    pub fn log_summary(&self) {
        log::debug!(
            "
                Samples: {}
                Writes: {} ({} failed)
                Events: {}
                Calibrations: {}
                Last output {:?}",
            self.samples_processed,
            self.writes_dispatched,
            self.write_failures,
            self.events_received,
            self.calibrations_committed,
            self.last_output,
        );
    }
}
