//! Playback health state machine.
//!
//! Pure transitions only; the controller decides what side effects (play
//! requests, recovery nudges, timer cancellation) accompany each one.

#[cfg(test)]
#[path = "health_test.rs"]
mod health_test;

/// Current operating state of the background video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackHealth {
    #[default]
    Loading,
    Playing,
    /// Expected to run but the play-head is not moving.
    Stalled,
    /// Hard error. Terminal for the mount.
    Errored,
}

/// Inputs that drive [`PlaybackHealth::next`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthSignal {
    /// `canplay` from the element.
    Ready,
    /// `error` from the element.
    HardError,
    /// `stalled`, `suspend`, or an unexpected `pause` while running.
    StallEvent,
    /// A poll saw the play-head where the previous poll left it.
    PollUnchanged,
    /// A poll saw the play-head move.
    PollAdvanced,
}

impl PlaybackHealth {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        self == Self::Errored
    }

    /// Whether the element is expected to be advancing.
    #[must_use]
    pub fn expects_running(self) -> bool {
        matches!(self, Self::Playing | Self::Stalled)
    }

    #[must_use]
    pub fn next(self, signal: HealthSignal) -> Self {
        match (self, signal) {
            (Self::Errored, _) | (_, HealthSignal::HardError) => Self::Errored,
            (Self::Loading, HealthSignal::Ready) => Self::Playing,
            (Self::Loading, _) => Self::Loading,
            (Self::Playing, HealthSignal::StallEvent | HealthSignal::PollUnchanged) => Self::Stalled,
            (Self::Playing, _) => Self::Playing,
            (Self::Stalled, HealthSignal::PollAdvanced) => Self::Playing,
            (Self::Stalled, _) => Self::Stalled,
        }
    }
}
