use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, Ordering},
        mpsc::Sender,
        Arc,
    },
    thread,
    time::{Duration, Instant},
};

use shared_definitions::bridge::payloads::BridgeEvent;
use tilt_controller::{AppError, ScriptCompletion, ScriptResult, ScriptRuntime};

/// Stand-in for the embedded web view running the game.
///
/// Scripts are refused until a page is loaded and fail while it is still
/// loading. Once the event hook is installed and a handler registered, the
/// "player" fires a missile every `event_interval`, posted from the page's
/// own thread.
pub struct SimulatedGame {
    ready_after: Duration,
    event_interval: Duration,
    loaded_at: Option<Instant>,
    hooks_installed: usize,
    handlers: HashMap<String, Arc<AtomicBool>>,
    last_script: Option<String>,
}

impl SimulatedGame {
    pub fn new(ready_after: Duration, event_interval: Duration) -> Self {
        SimulatedGame {
            ready_after,
            event_interval,
            loaded_at: None,
            hooks_installed: 0,
            handlers: HashMap::new(),
            last_script: None,
        }
    }

    pub fn last_script(&self) -> Option<&str> {
        self.last_script.as_deref()
    }

    fn is_ready(&self) -> bool {
        self.loaded_at
            .map(|loaded_at| loaded_at.elapsed() >= self.ready_after)
            .unwrap_or(false)
    }
}

fn player_thread_fn(
    name: String,
    handler: Sender<BridgeEvent>,
    stop: Arc<AtomicBool>,
    first_after: Duration,
    interval: Duration,
) {
    thread::sleep(first_after);
    while !stop.load(Ordering::Acquire) {
        if handler.send(BridgeEvent::new(name.as_str())).is_err() {
            return;
        }
        thread::sleep(interval);
    }
}

impl ScriptRuntime for SimulatedGame {
    fn load_url(&mut self, url: &str) {
        log::debug!("Navigating to {}", url);
        self.loaded_at = Some(Instant::now());
    }

    fn add_user_script(&mut self, source: &str) {
        log::debug!("User script installed ({} bytes)", source.len());
        self.hooks_installed += 1;
    }

    fn evaluate_script(&mut self, script: String, completion: ScriptCompletion) -> ScriptResult {
        if self.loaded_at.is_none() {
            return Err(AppError::RuntimeUnavailable);
        }
        if self.is_ready() {
            self.last_script = Some(script);
            completion.complete(Ok(()));
        } else {
            completion.complete(Err(AppError::script("page is still loading")));
        }
        Ok(())
    }

    fn add_message_handler(&mut self, name: &str, handler: Sender<BridgeEvent>) {
        if self.hooks_installed == 0 {
            log::warn!("No hook installed, {} will never be posted", name);
            return;
        }
        let stop = Arc::new(AtomicBool::new(false));
        if let Some(previous) = self.handlers.insert(name.to_string(), stop.clone()) {
            previous.store(true, Ordering::Release);
        }

        let first_after = self.ready_after + self.event_interval;
        let interval = self.event_interval;
        let name = name.to_string();
        let spawned = thread::Builder::new()
            .name("game-player".to_string())
            .spawn(move || player_thread_fn(name, handler, stop, first_after, interval));
        if let Err(error) = spawned {
            log::warn!("Game player not started: {}", error);
        }
    }

    fn remove_message_handler(&mut self, name: &str) {
        if let Some(stop) = self.handlers.remove(name) {
            stop.store(true, Ordering::Release);
        }
    }
}

impl Drop for SimulatedGame {
    fn drop(&mut self) {
        for stop in self.handlers.values() {
            stop.store(true, Ordering::Release);
        }
    }
}
