//! Feedback loop every 100 events: adjust reconsolidation/integrity
//! thresholds, log adjustments to the audit trail.
//!
//! Adapted from the consolidation pipeline's quality-driven auto-tuner:
//! same shape (count events, inspect an outcome window, nudge a threshold,
//! log a `TuningAdjustment`), applied here to reconsolidation's window
//! length and the feedback subsystem's wrong-answer alert sensitivity
//! instead of clustering precision/compression.

use super::metrics::QualityAssessment;

/// Number of events between auto-tuning checks.
pub const TUNING_EVENT_INTERVAL: usize = 100;

/// Tunable thresholds for the reconsolidation/integrity pipeline.
#[derive(Debug, Clone)]
pub struct TunableThresholds {
    /// Reconsolidation window length (§6: `reconsolidation.window_seconds`).
    pub window_seconds: i64,
    /// Fraction of wrong feedback above which downstream alerting should
    /// fire more eagerly.
    pub wrong_feedback_alert_threshold: f64,
    pub events_since_tuning: usize,
}

impl Default for TunableThresholds {
    fn default() -> Self {
        Self {
            window_seconds: 30,
            wrong_feedback_alert_threshold: 0.3,
            events_since_tuning: 0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TuningAdjustment {
    pub parameter: String,
    pub old_value: f64,
    pub new_value: f64,
    pub reason: String,
}

/// Check if auto-tuning should run and apply adjustments if needed.
pub fn maybe_tune(
    thresholds: &mut TunableThresholds,
    recent_assessments: &[QualityAssessment],
) -> Vec<TuningAdjustment> {
    thresholds.events_since_tuning += 1;

    if thresholds.events_since_tuning < TUNING_EVENT_INTERVAL {
        return vec![];
    }

    thresholds.events_since_tuning = 0;
    tune(thresholds, recent_assessments)
}

fn tune(thresholds: &mut TunableThresholds, assessments: &[QualityAssessment]) -> Vec<TuningAdjustment> {
    if assessments.is_empty() {
        return vec![];
    }

    let mut adjustments = Vec::new();
    let total = assessments.len();

    let window_missed = assessments.iter().filter(|a| a.window_missed).count();
    if window_missed as f64 / total as f64 > 0.3 {
        let old = thresholds.window_seconds;
        thresholds.window_seconds = (old + 5).min(120);
        adjustments.push(TuningAdjustment {
            parameter: "window_seconds".to_string(),
            old_value: old as f64,
            new_value: thresholds.window_seconds as f64,
            reason: format!("window missed in {window_missed}/{total} reconsolidation attempts"),
        });
    }

    let wrong_feedback = assessments.iter().filter(|a| a.feedback_was_wrong).count();
    if wrong_feedback as f64 / total as f64 > 0.3 {
        let old = thresholds.wrong_feedback_alert_threshold;
        thresholds.wrong_feedback_alert_threshold = (old - 0.05).max(0.1);
        adjustments.push(TuningAdjustment {
            parameter: "wrong_feedback_alert_threshold".to_string(),
            old_value: old,
            new_value: thresholds.wrong_feedback_alert_threshold,
            reason: format!("wrong feedback in {wrong_feedback}/{total} events"),
        });
    }

    adjustments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_tuning_before_interval() {
        let mut thresholds = TunableThresholds::default();
        let adjustments = maybe_tune(&mut thresholds, &[]);
        assert!(adjustments.is_empty());
        assert_eq!(thresholds.events_since_tuning, 1);
    }

    #[test]
    fn widens_window_when_frequently_missed() {
        let mut thresholds = TunableThresholds {
            events_since_tuning: TUNING_EVENT_INTERVAL - 1,
            ..Default::default()
        };
        let assessments: Vec<QualityAssessment> = (0..10)
            .map(|_| QualityAssessment {
                window_missed: true,
                feedback_was_wrong: false,
            })
            .collect();

        let adjustments = maybe_tune(&mut thresholds, &assessments);
        assert!(!adjustments.is_empty());
        assert!(thresholds.window_seconds > 30);
    }

    #[test]
    fn lowers_alert_threshold_on_frequent_wrong_feedback() {
        let mut thresholds = TunableThresholds::default();
        let assessments: Vec<QualityAssessment> = (0..10)
            .map(|_| QualityAssessment {
                window_missed: false,
                feedback_was_wrong: true,
            })
            .collect();

        let adjustments = tune(&mut thresholds, &assessments);
        assert!(!adjustments.is_empty());
        assert!(thresholds.wrong_feedback_alert_threshold < 0.3);
    }

    #[test]
    fn window_seconds_caps_at_120() {
        let mut thresholds = TunableThresholds {
            window_seconds: 118,
            ..Default::default()
        };
        let assessments: Vec<QualityAssessment> = (0..10)
            .map(|_| QualityAssessment {
                window_missed: true,
                feedback_was_wrong: false,
            })
            .collect();
        tune(&mut thresholds, &assessments);
        assert_eq!(thresholds.window_seconds, 120);
    }
}
