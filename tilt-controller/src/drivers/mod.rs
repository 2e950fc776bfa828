pub mod motion_sampler;
pub mod motion_sensors;
