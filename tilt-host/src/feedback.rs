use tilt_controller::FeedbackDevice;

#[derive(Debug, Default)]
pub struct LogFeedback {
    impacts: u64,
}

impl FeedbackDevice for LogFeedback {
    fn prepare(&mut self) {
        log::trace!("Impact generator prepared");
    }

    fn impact(&mut self) {
        self.impacts += 1;
        log::info!("*bzzt* (impact {})", self.impacts);
    }
}
