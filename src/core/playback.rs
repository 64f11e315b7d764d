//! Playback state machine.
//!
//! ```text
//!            play                 pause
//! Stopped ---------> Playing <----------> Paused
//!    ^               |   ^   resume       |
//!    |     stop      |   |  play (other)  |
//!    +---------------+---+----------------+
//! ```
//!
//! Only video ids are tracked here; the player resolves them against the
//! library. Transitions that are not allowed return an error and leave the
//! state untouched.

use super::error::{PlayerError, Result};

/// What the player is doing right now
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PlaybackState {
    /// Nothing is playing
    #[default]
    Stopped,

    /// A video is playing
    Playing(String),

    /// A video is loaded but paused
    Paused(String),
}

/// Result of a `pause` request that did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseOutcome {
    Paused,
    AlreadyPaused,
}

impl PlaybackState {
    /// Id of the current video, paused or not
    pub fn current(&self) -> Option<&str> {
        match self {
            Self::Stopped => None,
            Self::Playing(id) | Self::Paused(id) => Some(id),
        }
    }

    pub fn is_paused(&self) -> bool {
        matches!(self, Self::Paused(_))
    }

    pub fn is_stopped(&self) -> bool {
        matches!(self, Self::Stopped)
    }

    /// Start `video_id`, returning the id that was implicitly stopped (if any)
    pub fn play(&mut self, video_id: impl Into<String>) -> Option<String> {
        let previous = self.take();
        *self = Self::Playing(video_id.into());
        previous
    }

    /// Pause the current video
    pub fn pause(&mut self) -> Result<PauseOutcome> {
        match self {
            Self::Stopped => Err(PlayerError::NothingPlaying),
            Self::Paused(_) => Ok(PauseOutcome::AlreadyPaused),
            Self::Playing(id) => {
                *self = Self::Paused(std::mem::take(id));
                Ok(PauseOutcome::Paused)
            }
        }
    }

    /// Resume a paused video
    pub fn resume(&mut self) -> Result<()> {
        match self {
            Self::Stopped => Err(PlayerError::NothingPlaying),
            Self::Playing(_) => Err(PlayerError::NotPaused),
            Self::Paused(id) => {
                *self = Self::Playing(std::mem::take(id));
                Ok(())
            }
        }
    }

    /// Stop playback, returning the id that was current
    pub fn stop(&mut self) -> Result<String> {
        self.take().ok_or(PlayerError::NothingPlaying)
    }

    fn take(&mut self) -> Option<String> {
        match std::mem::take(self) {
            Self::Stopped => None,
            Self::Playing(id) | Self::Paused(id) => Some(id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_stopped() {
        let state = PlaybackState::default();
        assert!(state.is_stopped());
        assert_eq!(state.current(), None);
        assert!(!state.is_paused());
    }

    #[test]
    fn test_play_replaces_current() {
        let mut state = PlaybackState::default();

        assert_eq!(state.play("v1"), None);
        assert_eq!(state.current(), Some("v1"));

        state.pause().unwrap();
        assert_eq!(state.play("v2"), Some("v1".to_string()));
        assert_eq!(state, PlaybackState::Playing("v2".to_string()));
    }

    #[test]
    fn test_pause_and_resume() {
        let mut state = PlaybackState::default();
        assert_eq!(state.pause(), Err(PlayerError::NothingPlaying));
        assert_eq!(state.resume(), Err(PlayerError::NothingPlaying));

        state.play("v1");
        assert_eq!(state.resume(), Err(PlayerError::NotPaused));

        assert_eq!(state.pause(), Ok(PauseOutcome::Paused));
        assert_eq!(state.pause(), Ok(PauseOutcome::AlreadyPaused));
        assert_eq!(state, PlaybackState::Paused("v1".to_string()));

        state.resume().unwrap();
        assert_eq!(state, PlaybackState::Playing("v1".to_string()));
    }

    #[test]
    fn test_stop_twice() {
        let mut state = PlaybackState::default();
        state.play("v1");
        state.pause().unwrap();

        assert_eq!(state.stop(), Ok("v1".to_string()));
        assert!(!state.is_paused());
        assert_eq!(state.stop(), Err(PlayerError::NothingPlaying));
    }
}
