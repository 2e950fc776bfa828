use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex,
    },
    thread,
    time::{Duration, Instant},
};

use tilt_controller::{util::vectors::RotationVector2D, MotionSource};

/// Stand-in for the platform motion service: a device gently rocked by hand.
///
/// The attitude is refreshed on its own thread at the requested period, the
/// host only ever reads the latest value.
#[derive(Clone)]
pub struct SimulatedMotion {
    available: bool,
    attitude: Arc<Mutex<Option<RotationVector2D>>>,
    generation: Arc<AtomicU64>,
    started: Instant,
}

impl SimulatedMotion {
    pub fn new(available: bool) -> Self {
        SimulatedMotion {
            available,
            attitude: Arc::new(Mutex::new(None)),
            generation: Arc::new(AtomicU64::new(0)),
            started: Instant::now(),
        }
    }

    fn update_thread_fn(&self, generation: u64, period: Duration) {
        while self.generation.load(Ordering::Acquire) == generation {
            let attitude = rocking_attitude(self.started.elapsed().as_secs_f64());
            match self.attitude.lock() {
                Ok(mut lock) => *lock = Some(attitude),
                Err(_) => return,
            }
            thread::sleep(period);
        }
    }
}

pub fn rocking_attitude(seconds: f64) -> RotationVector2D {
    RotationVector2D::new(
        0.1 + 0.4 * (seconds * 0.8).sin(),
        0.25 * (seconds * 0.5).sin(),
    )
}

impl MotionSource for SimulatedMotion {
    fn is_device_motion_available(&self) -> bool {
        self.available
    }

    fn read_attitude(&mut self) -> Option<RotationVector2D> {
        self.attitude.lock().ok().and_then(|lock| *lock)
    }

    fn start_updates(&mut self, interval_ms: u64) {
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        let period = Duration::from_millis(interval_ms.max(1));
        let cloned = self.clone();
        let spawned = thread::Builder::new()
            .name("motion-updates".to_string())
            .spawn(move || cloned.update_thread_fn(generation, period));
        if let Err(error) = spawned {
            log::warn!("Motion updates not started: {}", error);
        }
    }

    fn stop_updates(&mut self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
        if let Ok(mut lock) = self.attitude.lock() {
            *lock = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rocking_stays_within_a_hand_held_range() {
        for step in 0..500 {
            let attitude = rocking_attitude(step as f64 * 0.05);
            assert!(attitude.roll.abs() <= 0.5 + 1e-12);
            assert!(attitude.pitch.abs() <= 0.25 + 1e-12);
        }
    }

    #[test]
    fn nothing_to_read_until_updates_run() {
        let mut motion = SimulatedMotion::new(true);
        assert_eq!(motion.read_attitude(), None);
        motion.stop_updates();
        assert_eq!(motion.read_attitude(), None);
    }
}
