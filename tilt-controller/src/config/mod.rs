pub mod constants;
pub mod host_config;
pub mod store;
