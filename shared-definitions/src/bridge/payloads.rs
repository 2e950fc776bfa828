/// Names the page can post back to the native side through a message handler.
/// Only one channel exists for now, it carries no payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScriptMessages {
    MissileFired,
}

impl ScriptMessages {
    pub const fn name(&self) -> &'static str {
        match self {
            ScriptMessages::MissileFired => "missileFired",
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            ScriptMessages::MissileFired => "Missile Fired!",
        }
    }
}

impl TryFrom<&str> for ScriptMessages {
    type Error = ();

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            value if value == ScriptMessages::MissileFired.name() => {
                Ok(ScriptMessages::MissileFired)
            }
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeEvent {
    pub name: String,
    pub payload: Option<String>,
}

impl BridgeEvent {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            payload: None,
        }
    }
}
