use shared_definitions::controller::{
    AttitudeSample, ControlOutput, ResponseTuneInput, TuningAction,
};

use crate::{
    communication_interfaces::{bridge::BridgeChannel, script_runtime::ScriptRuntime},
    config::{host_config::HostConfig, store::ParameterStore},
    control::{
        calibration::{CalibrationBaseline, CalibrationController, CalibrationState},
        control_loops::compute_control_output,
    },
    drivers::{
        motion_sampler::{AttitudeHandler, MotionSampler, SamplerCommand, SamplerMode},
        motion_sensors::MotionSource,
    },
    output::{feedback::FeedbackDevice, shell_feedback::ShellFeedback},
    telemetry::Telemetry,
    util::{
        task_queue::{ScheduledTask, TaskQueue},
        time::Millis,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalibrationStart {
    Armed { cycle: u64 },
    MotionUnavailable,
    ShutDown,
}

struct ControlPipeline<R: ScriptRuntime, F: FeedbackDevice> {
    calibration: CalibrationController,
    parameters: ParameterStore,
    bridge: BridgeChannel<R>,
    shell: ShellFeedback<F>,
    telemetry: Telemetry,
}

impl<R: ScriptRuntime, F: FeedbackDevice> ControlPipeline<R, F> {
    fn publish(&mut self, sample: &AttitudeSample, baseline: &CalibrationBaseline) {
        let tune = self.parameters.map_to_tune_input();
        let output = compute_control_output(sample, baseline, &tune);

        self.telemetry.samples_processed += 1;
        self.telemetry.last_output = Some(output);
        self.shell.on_tick(&tune, &output);

        if self.bridge.push_control(&output) {
            self.telemetry.writes_dispatched += 1;
        }
    }
}

impl<R: ScriptRuntime, F: FeedbackDevice> AttitudeHandler for ControlPipeline<R, F> {
    fn on_attitude(&mut self, sample: AttitudeSample) -> SamplerCommand {
        match self.calibration.state() {
            CalibrationState::Idle => SamplerCommand::Stop,
            CalibrationState::Sampling { .. } => match self.calibration.on_sample(&sample) {
                Some(_) => {
                    self.telemetry.calibrations_committed += 1;
                    SamplerCommand::StartTracking
                }
                None => SamplerCommand::Continue,
            },
            CalibrationState::Calibrated { baseline, .. } => {
                self.publish(&sample, &baseline);
                SamplerCommand::Continue
            }
        }
    }
}

/// Owns the motion sampler and the bridge for the lifetime of the shell and
/// runs every piece of the controller on one logical context.
///
/// Nothing here is driven by its own thread. The shell calls
/// [`TiltHost::advance_to`] with its clock and the host runs whatever came due
/// in between, in order: sampler ticks, the calibration timeout, overlay
/// restores and telemetry. Page events are handled once the clock is there.
pub struct TiltHost<M: MotionSource, R: ScriptRuntime, F: FeedbackDevice> {
    tasks: TaskQueue,
    sampler: MotionSampler<M>,
    pipeline: ControlPipeline<R, F>,
    content_url: String,
    telemetry_interval_ms: Option<Millis>,
    started: bool,
    shut_down: bool,
}

impl<M: MotionSource, R: ScriptRuntime, F: FeedbackDevice> TiltHost<M, R, F> {
    pub fn new(config: HostConfig, motion: M, runtime: R, feedback: F) -> Self {
        Self {
            tasks: TaskQueue::new(),
            sampler: MotionSampler::new(motion, config.sampler),
            pipeline: ControlPipeline {
                calibration: CalibrationController::new(config.calibration_timeout_ms),
                parameters: ParameterStore::new(config.tuning),
                bridge: BridgeChannel::new(runtime, config.bridge),
                shell: ShellFeedback::new(feedback, config.debug),
                telemetry: Telemetry::default(),
            },
            content_url: config.content_url,
            telemetry_interval_ms: config.telemetry_interval_ms,
            started: false,
            shut_down: false,
        }
    }

    pub fn start(&mut self) -> CalibrationStart {
        if self.shut_down {
            return CalibrationStart::ShutDown;
        }
        if !self.started {
            self.started = true;
            self.pipeline.bridge.subscribe();
            self.pipeline.bridge.load_content(&self.content_url);
            self.pipeline.shell.prepare();
            if let Some(interval) = self.telemetry_interval_ms {
                self.tasks.schedule_after(interval, ScheduledTask::TelemetryReport);
            }
        }
        self.reset_calibration()
    }

    /// The reset button. Stops tracking, forgets the baseline and runs the
    /// calibration protocol again.
    pub fn reset_calibration(&mut self) -> CalibrationStart {
        if self.shut_down {
            return CalibrationStart::ShutDown;
        }
        self.sampler.stop();
        self.pipeline.calibration.reset();

        if !self.sampler.is_available() {
            log::warn!("Device motion is not available, tilt control stays idle");
            return CalibrationStart::MotionUnavailable;
        }

        let cycle = self.pipeline.calibration.begin();
        if let Err(error) = self.sampler.start(SamplerMode::Calibrating, &mut self.tasks) {
            log::warn!("Calibration not started: {}", error);
            self.pipeline.calibration.reset();
            return CalibrationStart::MotionUnavailable;
        }
        self.tasks.schedule_after(
            self.pipeline.calibration.timeout_ms(),
            ScheduledTask::CalibrationTimeout { cycle },
        );
        CalibrationStart::Armed { cycle }
    }

    pub fn apply_tuning(&mut self, action: TuningAction) -> f64 {
        self.pipeline.parameters.apply(action)
    }

    pub fn advance_to(&mut self, until: Millis) {
        while let Some(task) = self.tasks.pop_due(until) {
            self.run_task(task, until);
            self.pump_completions();
        }
        self.tasks.advance_clock(until);
        self.pump_completions();
        self.pump_events();
    }

    pub fn advance_by(&mut self, delta: Millis) {
        self.advance_to(self.tasks.now().saturating_add(delta));
    }

    fn run_task(&mut self, task: ScheduledTask, until: Millis) {
        if self.shut_down {
            return;
        }
        match task {
            ScheduledTask::SampleTick { generation } => {
                self.sampler.on_tick(generation, until, &mut self.tasks, &mut self.pipeline);
            }
            ScheduledTask::CalibrationTimeout { cycle } => {
                if self.pipeline.calibration.on_timeout(cycle).is_some() {
                    self.pipeline.telemetry.calibrations_committed += 1;
                    if let Err(error) = self.sampler.start(SamplerMode::Tracking, &mut self.tasks) {
                        log::warn!("Could not start motion tracking: {}", error);
                    }
                }
            }
            ScheduledTask::OverlayRestore { banner } => {
                let tune = self.pipeline.parameters.map_to_tune_input();
                self.pipeline.shell.restore(banner, &tune);
            }
            ScheduledTask::TelemetryReport => {
                self.pipeline.telemetry.log_summary();
                if let Some(interval) = self.telemetry_interval_ms {
                    self.tasks.schedule_after(interval, ScheduledTask::TelemetryReport);
                }
            }
        }
    }

    fn pump_completions(&mut self) {
        let failures = self.pipeline.bridge.poll_completions();
        self.pipeline.telemetry.write_failures += failures as u64;
    }

    fn pump_events(&mut self) {
        let ControlPipeline {
            bridge,
            shell,
            telemetry,
            parameters,
            ..
        } = &mut self.pipeline;
        let tasks = &mut self.tasks;

        bridge.poll_events(|event| {
            telemetry.events_received += 1;
            shell.on_event(event, &parameters.map_to_tune_input(), tasks);
        });
    }

    /// Stops sampling and drops the page subscription. Runs once, later calls
    /// and `Drop` do nothing.
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.sampler.stop();
        self.pipeline.bridge.unsubscribe();
        self.shut_down = true;
        log::info!("Tilt controller shut down");
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }

    pub fn now(&self) -> Millis {
        self.tasks.now()
    }

    pub fn calibration_state(&self) -> CalibrationState {
        self.pipeline.calibration.state()
    }

    pub fn baseline(&self) -> Option<CalibrationBaseline> {
        self.pipeline.calibration.baseline()
    }

    pub fn sampler_mode(&self) -> SamplerMode {
        self.sampler.mode()
    }

    pub fn parameters(&self) -> ResponseTuneInput {
        self.pipeline.parameters.map_to_tune_input()
    }

    pub fn last_output(&self) -> Option<ControlOutput> {
        self.pipeline.telemetry.last_output
    }

    pub fn telemetry(&self) -> &Telemetry {
        &self.pipeline.telemetry
    }

    pub fn overlay_text(&self) -> Option<&str> {
        self.pipeline.shell.overlay_text()
    }

    pub fn motion(&self) -> &M {
        self.sampler.source()
    }

    pub fn runtime(&self) -> &R {
        self.pipeline.bridge.runtime()
    }

    pub fn runtime_mut(&mut self) -> &mut R {
        self.pipeline.bridge.runtime_mut()
    }

    pub fn feedback(&self) -> &F {
        self.pipeline.shell.device()
    }
}

impl<M: MotionSource, R: ScriptRuntime, F: FeedbackDevice> Drop for TiltHost<M, R, F> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
