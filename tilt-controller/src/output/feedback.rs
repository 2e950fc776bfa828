pub trait FeedbackDevice {
    fn prepare(&mut self);
    fn impact(&mut self);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoFeedback;

impl FeedbackDevice for NoFeedback {
    fn prepare(&mut self) {}

    fn impact(&mut self) {}
}
