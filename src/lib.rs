//! vidplay - In-memory video catalog, playback and playlist manager
//!
//! Tracks a fixed library of videos, a single playback state
//! (playing/paused/stopped), flags, and named playlists, all driven by one
//! text command per line.
//!
//! # Architecture
//!
//! The player is one in-process state tree, manipulated sequentially:
//! - The library is loaded once and never mutated
//! - Playlists, playback state and flags are owned by the `Player`
//! - Every operation validates before it mutates, so failures change nothing
//!
//! # Modules
//!
//! - `library`: Video records and library loading
//! - `core`: Playlists, playback, flags, search and the `Player`
//! - `cli`: Command parsing, the shell and the command-line interface
//! - `config`: Configuration discovery
//!
//! # Usage
//!
//! ```bash
//! # Interactive session with the bundled library
//! vidplay
//!
//! # Run a command file against a custom library
//! vidplay --library videos.json run commands.txt
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod library;

// Re-export main types at crate root for convenience
pub use crate::core::{PlaybackState, Player, PlayerError, Playlist, PlaylistStore};
pub use library::{Video, VideoLibrary};
