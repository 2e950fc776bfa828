use once_cell::unsync::OnceCell;
use shared_definitions::controller::AttitudeSample;

use crate::util::time::Millis;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationBaseline {
    pub roll_zero: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaselineSource {
    FirstSample,
    Timeout,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CalibrationState {
    Idle,
    Sampling {
        cycle: u64,
    },
    Calibrated {
        cycle: u64,
        baseline: CalibrationBaseline,
        source: BaselineSource,
    },
}

struct CalibrationCycle {
    id: u64,
    // Set at most once, whichever of first sample or timeout gets here first.
    committed: OnceCell<(CalibrationBaseline, BaselineSource)>,
}

/// One-shot protocol that fixes the neutral roll.
///
/// `begin` opens a cycle, then either the first attitude reading or the
/// timeout commits the baseline. The loser of that race finds the cell
/// already filled and does nothing. A new `begin` (or `reset`) throws the
/// whole cycle away, so nothing from an older baseline survives.
pub struct CalibrationController {
    cycle: Option<CalibrationCycle>,
    next_cycle_id: u64,
    timeout_ms: Millis,
}

impl CalibrationController {
    pub fn new(timeout_ms: Millis) -> Self {
        Self {
            cycle: None,
            next_cycle_id: 0,
            timeout_ms,
        }
    }

    pub fn timeout_ms(&self) -> Millis {
        self.timeout_ms
    }

    pub fn begin(&mut self) -> u64 {
        let id = self.next_cycle_id;
        self.next_cycle_id += 1;
        self.cycle = Some(CalibrationCycle {
            id,
            committed: OnceCell::new(),
        });
        log::info!("Calibration cycle {} started", id);
        id
    }

    pub fn reset(&mut self) {
        self.cycle = None;
    }

    pub fn on_sample(&mut self, sample: &AttitudeSample) -> Option<CalibrationBaseline> {
        let cycle = self.cycle.as_ref()?.id;
        self.commit(
            cycle,
            CalibrationBaseline {
                roll_zero: sample.roll,
            },
            BaselineSource::FirstSample,
        )
    }

    pub fn on_timeout(&mut self, cycle: u64) -> Option<CalibrationBaseline> {
        self.commit(
            cycle,
            CalibrationBaseline { roll_zero: 0.0 },
            BaselineSource::Timeout,
        )
    }

    fn commit(
        &mut self,
        cycle: u64,
        baseline: CalibrationBaseline,
        source: BaselineSource,
    ) -> Option<CalibrationBaseline> {
        let current = self.cycle.as_ref()?;
        if current.id != cycle {
            return None;
        }
        current.committed.set((baseline, source)).ok()?;
        log::info!(
            "Calibrated roll baseline {:.4} rad ({:?}, cycle {})",
            baseline.roll_zero,
            source,
            cycle
        );
        Some(baseline)
    }

    pub fn state(&self) -> CalibrationState {
        match &self.cycle {
            None => CalibrationState::Idle,
            Some(cycle) => match cycle.committed.get() {
                None => CalibrationState::Sampling { cycle: cycle.id },
                Some((baseline, source)) => CalibrationState::Calibrated {
                    cycle: cycle.id,
                    baseline: *baseline,
                    source: *source,
                },
            },
        }
    }

    pub fn baseline(&self) -> Option<CalibrationBaseline> {
        self.cycle
            .as_ref()
            .and_then(|cycle| cycle.committed.get())
            .map(|(baseline, _)| *baseline)
    }
}
