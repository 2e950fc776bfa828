use std::time::Instant;

pub type Millis = u64;

pub struct SystemClock {
    started: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    pub fn get_current_system_time_ms(&self) -> Millis {
        self.started.elapsed().as_millis() as Millis
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}
