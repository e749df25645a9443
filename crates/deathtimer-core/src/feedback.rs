//! User-feedback cues (haptics on devices that have them).
//!
//! Passed explicitly to whoever emits cues; there is no global instance.

use std::sync::Mutex;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImpactStyle {
    Light,
    Medium,
    Heavy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Warning,
    Error,
}

pub trait Feedback: Send + Sync {
    fn impact(&self, style: ImpactStyle);
    fn notification(&self, kind: NotificationKind);
    fn selection(&self);
}

/// Discards every cue.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopFeedback;

impl Feedback for NoopFeedback {
    fn impact(&self, _style: ImpactStyle) {}
    fn notification(&self, _kind: NotificationKind) {}
    fn selection(&self) {}
}

/// Logs each cue at trace level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingFeedback;

impl Feedback for TracingFeedback {
    fn impact(&self, style: ImpactStyle) {
        tracing::trace!(?style, "feedback: impact");
    }

    fn notification(&self, kind: NotificationKind) {
        tracing::trace!(?kind, "feedback: notification");
    }

    fn selection(&self) {
        tracing::trace!("feedback: selection");
    }
}

/// A cue as recorded by [`RecordingFeedback`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Impact(ImpactStyle),
    Notification(NotificationKind),
    Selection,
}

/// Keeps every cue in order; for tests.
#[derive(Debug, Default)]
pub struct RecordingFeedback {
    cues: Mutex<Vec<Cue>>,
}

impl RecordingFeedback {
    pub fn cues(&self) -> Vec<Cue> {
        self.cues.lock().unwrap_or_else(|p| p.into_inner()).clone()
    }

    fn push(&self, cue: Cue) {
        self.cues.lock().unwrap_or_else(|p| p.into_inner()).push(cue);
    }
}

impl Feedback for RecordingFeedback {
    fn impact(&self, style: ImpactStyle) {
        self.push(Cue::Impact(style));
    }

    fn notification(&self, kind: NotificationKind) {
        self.push(Cue::Notification(kind));
    }

    fn selection(&self) {
        self.push(Cue::Selection);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_keeps_order() {
        let fb = RecordingFeedback::default();
        fb.selection();
        fb.impact(ImpactStyle::Heavy);
        fb.notification(NotificationKind::Warning);
        assert_eq!(
            fb.cues(),
            vec![
                Cue::Selection,
                Cue::Impact(ImpactStyle::Heavy),
                Cue::Notification(NotificationKind::Warning)
            ]
        );
    }
}
