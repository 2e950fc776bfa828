#![allow(dead_code)]

use std::{
    cell::RefCell,
    collections::{HashMap, VecDeque},
    rc::Rc,
    sync::mpsc::Sender,
};

use shared_definitions::bridge::payloads::BridgeEvent;
use tilt_controller::{
    util::vectors::RotationVector2D, AppError, FeedbackDevice, HostConfig, MotionSource,
    ScriptCompletion, ScriptRuntime, TiltHost,
};

/// Motion service replaying queued readings, then repeating `fallback`.
pub struct ScriptedMotion {
    pub available: bool,
    pub readings: VecDeque<RotationVector2D>,
    pub fallback: Option<RotationVector2D>,
    pub running: bool,
}

impl ScriptedMotion {
    pub fn steady(roll: f64, pitch: f64) -> Self {
        Self {
            available: true,
            readings: VecDeque::new(),
            fallback: Some(RotationVector2D::new(roll, pitch)),
            running: false,
        }
    }

    pub fn then(mut self, roll: f64, pitch: f64) -> Self {
        self.readings.push_back(RotationVector2D::new(roll, pitch));
        self
    }

    pub fn silent() -> Self {
        Self {
            available: true,
            readings: VecDeque::new(),
            fallback: None,
            running: false,
        }
    }

    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::silent()
        }
    }
}

impl MotionSource for ScriptedMotion {
    fn is_device_motion_available(&self) -> bool {
        self.available
    }

    fn read_attitude(&mut self) -> Option<RotationVector2D> {
        self.readings.pop_front().or(self.fallback)
    }

    fn start_updates(&mut self, _interval_ms: u64) {
        self.running = true;
    }

    fn stop_updates(&mut self) {
        self.running = false;
    }
}

#[derive(Default)]
pub struct RuntimeState {
    pub loaded_urls: Vec<String>,
    pub user_scripts: Vec<String>,
    pub scripts: Vec<String>,
    pub handlers: HashMap<String, Sender<BridgeEvent>>,
    pub pending: Vec<ScriptCompletion>,
    pub refuse_scripts: bool,
}

/// Web runtime that records everything and leaves completions to the test.
#[derive(Clone, Default)]
pub struct RecordingRuntime {
    state: Rc<RefCell<RuntimeState>>,
}

impl RecordingRuntime {
    pub fn state(&self) -> std::cell::Ref<'_, RuntimeState> {
        self.state.borrow()
    }

    pub fn state_mut(&self) -> std::cell::RefMut<'_, RuntimeState> {
        self.state.borrow_mut()
    }

    pub fn script_count(&self) -> usize {
        self.state().scripts.len()
    }

    pub fn last_script(&self) -> Option<String> {
        self.state().scripts.last().cloned()
    }

    /// What the page does when the hooked function runs. Returns whether a
    /// handler was there to receive it.
    pub fn post_message(&self, name: &str) -> bool {
        match self.state().handlers.get(name) {
            Some(sender) => sender.send(BridgeEvent::new(name)).is_ok(),
            None => false,
        }
    }

    pub fn complete_pending(&self) {
        let pending: Vec<_> = self.state_mut().pending.drain(..).collect();
        for completion in pending {
            completion.complete(Ok(()));
        }
    }

    pub fn fail_pending(&self, message: &str) {
        let pending: Vec<_> = self.state_mut().pending.drain(..).collect();
        for completion in pending {
            completion.complete(Err(AppError::script(message)));
        }
    }
}

impl ScriptRuntime for RecordingRuntime {
    fn load_url(&mut self, url: &str) {
        self.state_mut().loaded_urls.push(url.to_string());
    }

    fn add_user_script(&mut self, source: &str) {
        self.state_mut().user_scripts.push(source.to_string());
    }

    fn evaluate_script(
        &mut self,
        script: String,
        completion: ScriptCompletion,
    ) -> Result<(), AppError> {
        let mut state = self.state_mut();
        if state.refuse_scripts {
            return Err(AppError::RuntimeUnavailable);
        }
        state.scripts.push(script);
        state.pending.push(completion);
        Ok(())
    }

    fn add_message_handler(&mut self, name: &str, handler: Sender<BridgeEvent>) {
        self.state_mut().handlers.insert(name.to_string(), handler);
    }

    fn remove_message_handler(&mut self, name: &str) {
        self.state_mut().handlers.remove(name);
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct CountingFeedback {
    pub prepared: u32,
    pub impacts: u32,
}

impl FeedbackDevice for CountingFeedback {
    fn prepare(&mut self) {
        self.prepared += 1;
    }

    fn impact(&mut self) {
        self.impacts += 1;
    }
}

pub type TestHost = TiltHost<ScriptedMotion, RecordingRuntime, CountingFeedback>;

pub fn quiet_config() -> HostConfig {
    HostConfig {
        telemetry_interval_ms: None,
        ..HostConfig::default()
    }
}

/// A started host plus a handle on its runtime.
pub fn started_host(motion: ScriptedMotion) -> (TestHost, RecordingRuntime) {
    let runtime = RecordingRuntime::default();
    let mut host = TiltHost::new(
        quiet_config(),
        motion,
        runtime.clone(),
        CountingFeedback::default(),
    );
    host.start();
    (host, runtime)
}

/// Moves the clock in small steps, the way a shell driving the host every
/// frame would.
pub fn step_to(host: &mut TestHost, until: u64) {
    while host.now() < until {
        let next = (host.now() + 5).min(until);
        host.advance_to(next);
    }
}
