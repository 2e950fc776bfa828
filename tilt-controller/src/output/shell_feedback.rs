use shared_definitions::{
    bridge::payloads::BridgeEvent,
    controller::{ControlOutput, ResponseTuneInput},
};

use super::feedback::FeedbackDevice;
use crate::util::task_queue::TaskQueue;
#[cfg(feature = "diagnostics")]
use {
    super::diagnostics::DiagnosticOverlay, crate::config::constants::EVENT_BANNER_HOLD_MS,
    crate::util::task_queue::ScheduledTask, shared_definitions::bridge::payloads::ScriptMessages,
};

pub struct ShellFeedback<F: FeedbackDevice> {
    device: F,
    #[cfg_attr(not(feature = "diagnostics"), allow(dead_code))]
    debug: bool,
    #[cfg(feature = "diagnostics")]
    overlay: DiagnosticOverlay,
}

impl<F: FeedbackDevice> ShellFeedback<F> {
    pub fn new(device: F, debug: bool) -> Self {
        Self {
            device,
            debug,
            #[cfg(feature = "diagnostics")]
            overlay: DiagnosticOverlay::new(),
        }
    }

    pub fn device(&self) -> &F {
        &self.device
    }

    pub fn prepare(&mut self) {
        self.device.prepare();
    }

    pub fn on_event(
        &mut self,
        event: &BridgeEvent,
        tune: &ResponseTuneInput,
        tasks: &mut TaskQueue,
    ) {
        log::info!("{} received", event.name);
        self.device.impact();
        self.device.prepare();
        self.show_event_banner(event, tune, tasks);
    }

    #[cfg(feature = "diagnostics")]
    pub fn on_tick(&mut self, tune: &ResponseTuneInput, output: &ControlOutput) {
        if self.debug {
            self.overlay.show_outputs(tune, output);
        }
    }

    #[cfg(not(feature = "diagnostics"))]
    pub fn on_tick(&mut self, _tune: &ResponseTuneInput, _output: &ControlOutput) {}

    #[cfg(feature = "diagnostics")]
    fn show_event_banner(
        &mut self,
        event: &BridgeEvent,
        tune: &ResponseTuneInput,
        tasks: &mut TaskQueue,
    ) {
        if !self.debug {
            return;
        }
        let label = match ScriptMessages::try_from(event.name.as_str()) {
            Ok(message) => message.label().to_string(),
            Err(()) => format!("{} received", event.name),
        };
        let banner = self.overlay.show_event(tune, &label);
        tasks.schedule_after(EVENT_BANNER_HOLD_MS, ScheduledTask::OverlayRestore { banner });
    }

    #[cfg(not(feature = "diagnostics"))]
    fn show_event_banner(
        &mut self,
        _event: &BridgeEvent,
        _tune: &ResponseTuneInput,
        _tasks: &mut TaskQueue,
    ) {
    }

    #[cfg(feature = "diagnostics")]
    pub fn restore(&mut self, banner: u64, tune: &ResponseTuneInput) {
        self.overlay.restore(banner, tune);
    }

    #[cfg(not(feature = "diagnostics"))]
    pub fn restore(&mut self, _banner: u64, _tune: &ResponseTuneInput) {}

    #[cfg(feature = "diagnostics")]
    pub fn overlay_text(&self) -> Option<&str> {
        self.debug.then(|| self.overlay.text())
    }

    #[cfg(not(feature = "diagnostics"))]
    pub fn overlay_text(&self) -> Option<&str> {
        None
    }
}
