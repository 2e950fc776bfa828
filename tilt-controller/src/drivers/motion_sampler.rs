use shared_definitions::controller::AttitudeSample;

use crate::{
    config::constants::MOTION_UPDATE_INTERVAL_MS,
    util::{
        error::AppError,
        task_queue::{ScheduledTask, TaskQueue},
        time::Millis,
    },
};

use super::motion_sensors::MotionSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplerConfig {
    pub interval_ms: Millis,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            interval_ms: MOTION_UPDATE_INTERVAL_MS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplerMode {
    Stopped,
    Calibrating,
    Tracking,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplerCommand {
    Continue,
    StartTracking,
    Stop,
}

pub trait AttitudeHandler {
    fn on_attitude(&mut self, sample: AttitudeSample) -> SamplerCommand;
}

/// Pushes attitude samples on a fixed period while running.
///
/// Nothing is buffered: each tick reads whatever the service has right now
/// and hands it straight to the handler. Every start and stop moves to a new
/// generation, ticks scheduled for an older one are dropped when they fire.
pub struct MotionSampler<M: MotionSource> {
    source: M,
    interval_ms: Millis,
    generation: u64,
    mode: SamplerMode,
}

impl<M: MotionSource> MotionSampler<M> {
    pub fn new(source: M, config: SamplerConfig) -> Self {
        Self {
            source,
            interval_ms: config.interval_ms,
            generation: 0,
            mode: SamplerMode::Stopped,
        }
    }

    pub fn is_available(&self) -> bool {
        self.source.is_device_motion_available()
    }

    pub fn mode(&self) -> SamplerMode {
        self.mode
    }

    pub fn source(&self) -> &M {
        &self.source
    }

    pub fn start(&mut self, mode: SamplerMode, tasks: &mut TaskQueue) -> Result<(), AppError> {
        if !self.is_available() {
            return Err(AppError::MotionUnavailable);
        }
        self.stop();
        if mode == SamplerMode::Stopped {
            return Ok(());
        }
        self.mode = mode;
        self.source.start_updates(self.interval_ms);
        self.schedule_next(tasks);
        Ok(())
    }

    /// Takes effect immediately: no sample is delivered after this returns.
    pub fn stop(&mut self) {
        if self.mode != SamplerMode::Stopped {
            self.source.stop_updates();
            self.mode = SamplerMode::Stopped;
        }
        self.generation += 1;
    }

    /// Runs one tick. `until` is how far the context is catching up: a tick
    /// that is more than one period behind it is moved to `until`, so a stall
    /// yields a single fresh reading instead of a burst of stale ones.
    pub fn on_tick(
        &mut self,
        generation: u64,
        until: Millis,
        tasks: &mut TaskQueue,
        handler: &mut impl AttitudeHandler,
    ) {
        if generation != self.generation || self.mode == SamplerMode::Stopped {
            return;
        }
        let now = tasks.now();
        if now.saturating_add(self.interval_ms) < until {
            tasks.schedule_after(until - now, ScheduledTask::SampleTick { generation });
            return;
        }
        let attitude = match self.source.read_attitude() {
            Some(attitude) => attitude,
            None => {
                self.schedule_next(tasks);
                return;
            }
        };
        let sample = AttitudeSample {
            roll: attitude.roll,
            pitch: attitude.pitch,
            timestamp: tasks.now(),
        };
        match handler.on_attitude(sample) {
            SamplerCommand::Continue => self.schedule_next(tasks),
            SamplerCommand::StartTracking => {
                if let Err(error) = self.start(SamplerMode::Tracking, tasks) {
                    log::warn!("Could not start motion tracking: {}", error);
                }
            }
            SamplerCommand::Stop => self.stop(),
        }
    }

    fn schedule_next(&self, tasks: &mut TaskQueue) {
        tasks.schedule_after(
            self.interval_ms,
            ScheduledTask::SampleTick {
                generation: self.generation,
            },
        );
    }
}
