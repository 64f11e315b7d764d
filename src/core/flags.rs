//! Flagged videos.
//!
//! A flagged video stays in the library but cannot be played, added to a
//! playlist or found by search until it is allowed again.

use std::collections::HashMap;

use super::error::{PlayerError, Result};

/// Reason recorded when none is given
pub const DEFAULT_FLAG_REASON: &str = "Not supplied";

/// video id -> flag reason
#[derive(Debug, Clone, Default)]
pub struct FlagRegistry {
    reasons: HashMap<String, String>,
}

impl FlagRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flag a video. Blank reasons are recorded as `Not supplied`.
    pub fn flag(&mut self, video_id: &str, reason: Option<&str>) -> Result<&str> {
        if self.reasons.contains_key(video_id) {
            return Err(PlayerError::AlreadyFlagged);
        }

        let reason = reason
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .unwrap_or(DEFAULT_FLAG_REASON);

        Ok(self
            .reasons
            .entry(video_id.to_string())
            .or_insert_with(|| reason.to_string())
            .as_str())
    }

    /// Remove a flag
    pub fn allow(&mut self, video_id: &str) -> Result<String> {
        self.reasons.remove(video_id).ok_or(PlayerError::NotFlagged)
    }

    /// Reason a video is flagged for, if it is
    pub fn reason(&self, video_id: &str) -> Option<&str> {
        self.reasons.get(video_id).map(String::as_str)
    }

    pub fn is_flagged(&self, video_id: &str) -> bool {
        self.reasons.contains_key(video_id)
    }

    /// Fail with `VideoFlagged` if the video is flagged
    pub fn ensure_allowed(&self, video_id: &str) -> Result<()> {
        match self.reason(video_id) {
            Some(reason) => Err(PlayerError::VideoFlagged {
                reason: reason.to_string(),
            }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_and_allow() {
        let mut flags = FlagRegistry::new();

        assert_eq!(flags.flag("v1", Some("dont_like_cats")), Ok("dont_like_cats"));
        assert!(flags.is_flagged("v1"));
        assert_eq!(flags.flag("v1", None), Err(PlayerError::AlreadyFlagged));
        assert_eq!(flags.reason("v1"), Some("dont_like_cats"));

        assert_eq!(flags.allow("v1"), Ok("dont_like_cats".to_string()));
        assert_eq!(flags.allow("v1"), Err(PlayerError::NotFlagged));
        assert!(flags.ensure_allowed("v1").is_ok());
    }

    #[test]
    fn test_default_reason() {
        let mut flags = FlagRegistry::new();
        assert_eq!(flags.flag("v1", None), Ok(DEFAULT_FLAG_REASON));
        assert_eq!(flags.flag("v2", Some("   ")), Ok(DEFAULT_FLAG_REASON));

        assert_eq!(
            flags.ensure_allowed("v2"),
            Err(PlayerError::VideoFlagged {
                reason: DEFAULT_FLAG_REASON.to_string()
            })
        );
    }
}
