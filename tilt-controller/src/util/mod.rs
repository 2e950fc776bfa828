pub mod error;
pub mod task_queue;
pub mod time;
pub mod vectors;
