//! Errors returned by player and playlist operations.
//!
//! The `Display` text is the reason only; callers prefix it with the
//! operation that failed (`Cannot play video: Video does not exist`).
//! None of these are fatal and none leave state half-changed.

use thiserror::Error;

/// Why a player operation was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlayerError {
    #[error("Playlist does not exist")]
    PlaylistNotFound,

    #[error("Video does not exist")]
    VideoNotFound,

    #[error("A playlist with the same name already exists")]
    DuplicateName,

    #[error("Video already added")]
    AlreadyPresent,

    #[error("Video is not in playlist")]
    NotInPlaylist,

    #[error("No video is currently playing")]
    NothingPlaying,

    #[error("Video is not paused")]
    NotPaused,

    #[error("No videos available")]
    LibraryEmpty,

    #[error("No search results")]
    NoMatches,

    #[error("Video is currently flagged (reason: {reason})")]
    VideoFlagged { reason: String },

    #[error("Video is already flagged")]
    AlreadyFlagged,

    #[error("Video is not flagged")]
    NotFlagged,
}

pub type Result<T, E = PlayerError> = std::result::Result<T, E>;
