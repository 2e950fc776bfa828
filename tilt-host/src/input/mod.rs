pub mod commands;
pub mod motion;
