use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    #[error("JavaScript injection error: {message}")]
    ScriptEvaluation { message: String },
    #[error("embedded runtime is not accepting scripts")]
    RuntimeUnavailable,
    #[error("device motion is not available on this platform")]
    MotionUnavailable,
}

impl AppError {
    pub fn script(message: impl Into<String>) -> Self {
        AppError::ScriptEvaluation {
            message: message.into(),
        }
    }
}
