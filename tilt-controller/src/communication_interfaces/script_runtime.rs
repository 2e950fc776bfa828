use std::sync::mpsc::Sender;

use shared_definitions::bridge::payloads::BridgeEvent;

use crate::util::error::AppError;

pub type ScriptResult = Result<(), AppError>;

#[derive(Debug, Clone)]
pub struct ScriptCompletion {
    sender: Sender<ScriptResult>,
}

impl ScriptCompletion {
    pub fn new(sender: Sender<ScriptResult>) -> Self {
        Self { sender }
    }

    pub fn complete(self, result: ScriptResult) {
        // The bridge may already be gone, nobody is waiting for the answer then.
        let _ = self.sender.send(result);
    }
}

pub trait ScriptRuntime {
    fn load_url(&mut self, url: &str);

    fn add_user_script(&mut self, source: &str);

    /// Fire and forget. An `Err` here means the script was never dispatched,
    /// evaluation errors come back through `completion`.
    fn evaluate_script(&mut self, script: String, completion: ScriptCompletion) -> ScriptResult;

    fn add_message_handler(&mut self, name: &str, handler: Sender<BridgeEvent>);

    fn remove_message_handler(&mut self, name: &str);
}
