pub mod bridge;
pub mod script_runtime;
