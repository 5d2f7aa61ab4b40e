//! One assessment per reconsolidation/feedback event, fed into auto-tuning.

#[derive(Debug, Clone, Copy, Default)]
pub struct QualityAssessment {
    /// `evaluate_and_modify` was attempted but the window had already closed.
    pub window_missed: bool,
    /// This event was a `user_feedback_wrong` call.
    pub feedback_was_wrong: bool,
}
