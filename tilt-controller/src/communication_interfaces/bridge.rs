use std::sync::mpsc::{self, Receiver, Sender};

use shared_definitions::{
    bridge::payloads::{BridgeEvent, ScriptMessages},
    controller::ControlOutput,
};

use crate::config::constants::{
    HOOKED_GAME_FUNCTION, JOYSTICK_STATE_OBJECT, PITCH_CHANNEL_FIELD, ROLL_CHANNEL_FIELD,
};

use super::script_runtime::{ScriptCompletion, ScriptResult, ScriptRuntime};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeConfig {
    pub state_object: String,
    /// Field receiving `ControlOutput::x`.
    pub roll_field: String,
    /// Field receiving `ControlOutput::y`.
    pub pitch_field: String,
    pub event_name: String,
    pub hooked_function: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            state_object: JOYSTICK_STATE_OBJECT.to_string(),
            roll_field: ROLL_CHANNEL_FIELD.to_string(),
            pitch_field: PITCH_CHANNEL_FIELD.to_string(),
            event_name: ScriptMessages::MissileFired.name().to_string(),
            hooked_function: HOOKED_GAME_FUNCTION.to_string(),
        }
    }
}

/// Outbound joystick writes and inbound page events.
///
/// Writes are dispatched and forgotten, each one overwrites the last on the
/// page so a lost write is simply replaced by the next tick. Failures are
/// logged when their completion shows up and never retried. Inbound events
/// and completions arrive over channels and are only looked at when the host
/// pumps them from its own context.
pub struct BridgeChannel<R: ScriptRuntime> {
    runtime: R,
    config: BridgeConfig,
    completion_sender: Sender<ScriptResult>,
    completion_receiver: Receiver<ScriptResult>,
    event_sender: Sender<BridgeEvent>,
    event_receiver: Receiver<BridgeEvent>,
    subscribed: bool,
}

impl<R: ScriptRuntime> BridgeChannel<R> {
    pub fn new(runtime: R, config: BridgeConfig) -> Self {
        let (completion_sender, completion_receiver) = mpsc::channel();
        let (event_sender, event_receiver) = mpsc::channel();
        Self {
            runtime,
            config,
            completion_sender,
            completion_receiver,
            event_sender,
            event_receiver,
            subscribed: false,
        }
    }

    pub fn runtime(&self) -> &R {
        &self.runtime
    }

    pub fn runtime_mut(&mut self) -> &mut R {
        &mut self.runtime
    }

    pub fn load_content(&mut self, url: &str) {
        log::info!("Loading {}", url);
        self.runtime.load_url(url);
    }

    pub fn subscribe(&mut self) {
        if self.subscribed {
            return;
        }
        self.runtime.add_user_script(&event_hook_script(&self.config));
        self.runtime
            .add_message_handler(&self.config.event_name, self.event_sender.clone());
        self.subscribed = true;
    }

    pub fn unsubscribe(&mut self) {
        if !self.subscribed {
            return;
        }
        self.runtime.remove_message_handler(&self.config.event_name);
        self.subscribed = false;
    }

    pub fn push_control(&mut self, output: &ControlOutput) -> bool {
        let script = joystick_write_script(&self.config, output);
        let completion = ScriptCompletion::new(self.completion_sender.clone());
        match self.runtime.evaluate_script(script, completion) {
            Ok(()) => true,
            Err(error) => {
                log::warn!("{}", error);
                false
            }
        }
    }

    pub fn poll_completions(&mut self) -> usize {
        let mut failures = 0;
        while let Ok(result) = self.completion_receiver.try_recv() {
            if let Err(error) = result {
                log::warn!("{}", error);
                failures += 1;
            }
        }
        failures
    }

    pub fn poll_events(&mut self, mut handler: impl FnMut(&BridgeEvent)) -> usize {
        let mut delivered = 0;
        while let Ok(event) = self.event_receiver.try_recv() {
            if !self.subscribed || event.name != self.config.event_name {
                log::debug!("Dropping unexpected message {:?}", event.name);
                continue;
            }
            handler(&event);
            delivered += 1;
        }
        delivered
    }
}

pub fn joystick_write_script(config: &BridgeConfig, output: &ControlOutput) -> String {
    format!(
        "if (typeof {object} !== 'undefined') {{ {object}.{pitch_field} = {pitch}; {object}.{roll_field} = {roll}; }}",
        object = config.state_object,
        pitch_field = config.pitch_field,
        pitch = output.y,
        roll_field = config.roll_field,
        roll = output.x,
    )
}

pub fn event_hook_script(config: &BridgeConfig) -> String {
    format!(
        r#"(function() {{
    const original = window.{function};
    window.{function} = function() {{
        if (typeof original === 'function') {{
            original.apply(this, arguments);
        }}
        if (window.webkit && webkit.messageHandlers && webkit.messageHandlers.{event}) {{
            webkit.messageHandlers.{event}.postMessage('{event}');
        }}
    }};
}})();"#,
        function = config.hooked_function,
        event = config.event_name,
    )
}
