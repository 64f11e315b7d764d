//! Video library: the static, read-only set of all known videos.
//!
//! The library is loaded once at startup (from a data file or the bundled
//! default) and never mutated afterwards. Flags live in the player, not here.

pub mod catalog;
pub mod video;

pub use catalog::VideoLibrary;
pub use video::Video;
