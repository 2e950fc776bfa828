#[cfg(feature = "diagnostics")]
pub mod diagnostics;
pub mod feedback;
pub mod shell_feedback;
