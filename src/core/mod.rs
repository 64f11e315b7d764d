//! Core player logic.
//!
//! This module contains:
//! - PlaylistStore: Named playlists with case-insensitive lookup
//! - PlaybackState: The stopped/playing/paused state machine
//! - FlagRegistry: Flagged videos and their reasons
//! - Search: Title and tag search, plus follow-up selection
//! - Player: Orchestrates all of the above over one library

pub mod error;
pub mod flags;
pub mod playback;
pub mod player;
pub mod playlist;
pub mod search;

// Re-export commonly used types
pub use error::PlayerError;
pub use flags::{FlagRegistry, DEFAULT_FLAG_REASON};
pub use playback::{PauseOutcome, PlaybackState};
pub use player::{FlagOutcome, PlayOutcome, Player, PlaylistChange, PlaylistView, Status, VideoEntry};
pub use playlist::{Playlist, PlaylistStore};
pub use search::{search_by_tag, search_by_title, select_from_results, SearchField};
