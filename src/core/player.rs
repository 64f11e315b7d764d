//! The player: playback, playlists, flags and search over one library.
//!
//! Every operation validates fully before touching any state, so a rejected
//! request never leaves a half-applied change behind. Outcomes are returned
//! as values; turning them into text is the shell's job.

use std::fmt;

use rand::seq::IndexedRandom;
use rand::Rng;
use tracing::{debug, info, instrument};

use crate::library::{Video, VideoLibrary};

use super::error::{PlayerError, Result};
use super::flags::FlagRegistry;
use super::playback::{PauseOutcome, PlaybackState};
use super::playlist::PlaylistStore;
use super::search::{self, SearchField};

/// A video together with its flag reason, if flagged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoEntry<'a> {
    pub video: &'a Video,
    pub flag: Option<&'a str>,
}

impl fmt::Display for VideoEntry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.video)?;
        if let Some(reason) = self.flag {
            write!(f, " - FLAGGED (reason: {})", reason)?;
        }
        Ok(())
    }
}

/// Result of starting a video
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayOutcome {
    /// Video that was implicitly stopped first
    pub stopped: Option<Video>,

    /// Video now playing
    pub playing: Video,
}

/// What `status` reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status<'a> {
    Stopped,
    Playing { video: &'a Video, paused: bool },
}

/// A video added to or removed from a playlist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistChange {
    /// Stored display name of the playlist
    pub playlist: String,
    pub video: Video,
}

/// Contents of one playlist, resolved against the library
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistView<'a> {
    pub name: &'a str,
    pub videos: Vec<VideoEntry<'a>>,
}

/// Result of flagging a video
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagOutcome {
    pub video: Video,
    pub reason: String,

    /// Set when the flagged video was the current one
    pub stopped: Option<Video>,
}

/// Single-user video player
#[derive(Debug, Clone)]
pub struct Player {
    library: VideoLibrary,
    playlists: PlaylistStore,
    playback: PlaybackState,
    flags: FlagRegistry,
}

impl Player {
    /// Create a player over a loaded library, with no playlists and nothing
    /// playing
    pub fn new(library: VideoLibrary) -> Self {
        Self {
            library,
            playlists: PlaylistStore::new(),
            playback: PlaybackState::default(),
            flags: FlagRegistry::new(),
        }
    }

    pub fn library(&self) -> &VideoLibrary {
        &self.library
    }

    pub fn playlists(&self) -> &PlaylistStore {
        &self.playlists
    }

    pub fn playback(&self) -> &PlaybackState {
        &self.playback
    }

    pub fn flags(&self) -> &FlagRegistry {
        &self.flags
    }

    fn video(&self, video_id: &str) -> Result<&Video> {
        self.library.get(video_id).ok_or(PlayerError::VideoNotFound)
    }

    fn entry<'a>(&'a self, video: &'a Video) -> VideoEntry<'a> {
        VideoEntry {
            video,
            flag: self.flags.reason(&video.id),
        }
    }

    // ------------------------------------------------------------------
    // Library
    // ------------------------------------------------------------------

    pub fn number_of_videos(&self) -> usize {
        self.library.len()
    }

    /// Every video, sorted by title, with flags
    pub fn all_videos(&self) -> Vec<VideoEntry<'_>> {
        self.library
            .sorted_by_title()
            .into_iter()
            .map(|video| self.entry(video))
            .collect()
    }

    // ------------------------------------------------------------------
    // Playback
    // ------------------------------------------------------------------

    /// Play a video, stopping whatever is current first
    #[instrument(skip(self))]
    pub fn play(&mut self, video_id: &str) -> Result<PlayOutcome> {
        let playing = self.video(video_id)?.clone();
        self.flags.ensure_allowed(video_id)?;

        let stopped = self
            .playback
            .play(video_id)
            .and_then(|id| self.library.get(&id).cloned());

        info!(video = %playing.id, "Playing video");
        Ok(PlayOutcome { stopped, playing })
    }

    /// Play a random non-flagged video
    pub fn play_random(&mut self) -> Result<PlayOutcome> {
        let mut rng = rand::rng();
        self.play_random_with(&mut rng)
    }

    /// Play a random non-flagged video using the given RNG
    pub fn play_random_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<PlayOutcome> {
        let candidates: Vec<&Video> = self
            .library
            .all()
            .iter()
            .filter(|video| !self.flags.is_flagged(&video.id))
            .collect();

        let video_id = candidates
            .choose(rng)
            .map(|video| video.id.clone())
            .ok_or(PlayerError::LibraryEmpty)?;

        debug!(candidates = candidates.len(), video = %video_id, "Picked random video");
        self.play(&video_id)
    }

    /// Stop the current video
    pub fn stop(&mut self) -> Result<Video> {
        let current = self.playback.current().ok_or(PlayerError::NothingPlaying)?;
        let video = self.video(current)?.clone();
        self.playback.stop()?;

        info!(video = %video.id, "Stopped video");
        Ok(video)
    }

    /// Pause the current video. Pausing twice is not an error.
    pub fn pause(&mut self) -> Result<(PauseOutcome, Video)> {
        let current = self.playback.current().ok_or(PlayerError::NothingPlaying)?;
        let video = self.video(current)?.clone();
        let outcome = self.playback.pause()?;

        debug!(video = %video.id, ?outcome, "Pause requested");
        Ok((outcome, video))
    }

    /// Continue a paused video
    pub fn resume(&mut self) -> Result<Video> {
        let current = self.playback.current().ok_or(PlayerError::NothingPlaying)?;
        let video = self.video(current)?.clone();
        self.playback.resume()?;

        debug!(video = %video.id, "Resumed video");
        Ok(video)
    }

    pub fn status(&self) -> Status<'_> {
        match self
            .playback
            .current()
            .and_then(|id| self.library.get(id))
        {
            Some(video) => Status::Playing {
                video,
                paused: self.playback.is_paused(),
            },
            None => Status::Stopped,
        }
    }

    // ------------------------------------------------------------------
    // Playlists
    // ------------------------------------------------------------------

    /// Create a playlist, returning its display name
    pub fn create_playlist(&mut self, name: &str) -> Result<String> {
        let playlist = self.playlists.create(name)?;
        Ok(playlist.name().to_string())
    }

    /// Add a library video to a playlist.
    ///
    /// Checks, in order: the playlist exists, the video exists, the video is
    /// not flagged, the video is not already in the playlist.
    pub fn add_to_playlist(&mut self, name: &str, video_id: &str) -> Result<PlaylistChange> {
        self.playlists.get(name)?;
        let video = self.video(video_id)?.clone();
        self.flags.ensure_allowed(video_id)?;

        let playlist = self.playlists.add_video(name, video_id)?;
        debug!(playlist = playlist.name(), video = video_id, "Added video to playlist");

        Ok(PlaylistChange {
            playlist: playlist.name().to_string(),
            video,
        })
    }

    /// Remove a library video from a playlist
    pub fn remove_from_playlist(&mut self, name: &str, video_id: &str) -> Result<PlaylistChange> {
        self.playlists.get(name)?;
        let video = self.video(video_id)?.clone();

        let playlist = self.playlists.remove_video(name, video_id)?;
        debug!(playlist = playlist.name(), video = video_id, "Removed video from playlist");

        Ok(PlaylistChange {
            playlist: playlist.name().to_string(),
            video,
        })
    }

    /// Empty a playlist, returning its display name
    pub fn clear_playlist(&mut self, name: &str) -> Result<String> {
        let playlist = self.playlists.clear(name)?;
        Ok(playlist.name().to_string())
    }

    /// Delete a playlist, returning its display name
    pub fn delete_playlist(&mut self, name: &str) -> Result<String> {
        let playlist = self.playlists.delete(name)?;
        Ok(playlist.name().to_string())
    }

    /// Playlist contents resolved to videos
    pub fn show_playlist(&self, name: &str) -> Result<PlaylistView<'_>> {
        let playlist = self.playlists.get(name)?;
        let videos = playlist
            .video_ids()
            .iter()
            .filter_map(|id| self.library.get(id))
            .map(|video| self.entry(video))
            .collect();

        Ok(PlaylistView {
            name: playlist.name(),
            videos,
        })
    }

    /// Playlist names, sorted case-insensitively
    pub fn playlist_names(&self) -> Vec<&str> {
        self.playlists.list()
    }

    // ------------------------------------------------------------------
    // Search
    // ------------------------------------------------------------------

    pub fn search(&self, field: SearchField, term: &str) -> Result<Vec<&Video>> {
        search::search(&self.library, &self.flags, field, term)
    }

    pub fn search_videos(&self, term: &str) -> Result<Vec<&Video>> {
        self.search(SearchField::Title, term)
    }

    pub fn search_videos_with_tag(&self, tag: &str) -> Result<Vec<&Video>> {
        self.search(SearchField::Tag, tag)
    }

    // ------------------------------------------------------------------
    // Flags
    // ------------------------------------------------------------------

    /// Flag a video, stopping it first if it is the current one
    pub fn flag_video(&mut self, video_id: &str, reason: Option<&str>) -> Result<FlagOutcome> {
        let video = self.video(video_id)?.clone();
        if self.flags.is_flagged(video_id) {
            return Err(PlayerError::AlreadyFlagged);
        }

        let stopped = if self.playback.current() == Some(video_id) {
            self.stop().ok()
        } else {
            None
        };

        let reason = self.flags.flag(video_id, reason)?.to_string();
        info!(video = video_id, %reason, "Flagged video");

        Ok(FlagOutcome {
            video,
            reason,
            stopped,
        })
    }

    /// Remove the flag from a video
    pub fn allow_video(&mut self, video_id: &str) -> Result<Video> {
        let video = self.video(video_id)?.clone();
        self.flags.allow(video_id)?;

        info!(video = video_id, "Allowed video");
        Ok(video)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> Player {
        let library = VideoLibrary::from_videos(vec![
            Video::new("v1", "Cat video").with_tag("funny"),
            Video::new("v2", "Dog video").with_tags(["funny", "cute"]),
        ])
        .unwrap();
        Player::new(library)
    }

    #[test]
    fn test_play_unknown_video_keeps_state() {
        let mut player = player();
        player.play("v1").unwrap();

        assert_eq!(player.play("nope"), Err(PlayerError::VideoNotFound));
        assert_eq!(player.playback().current(), Some("v1"));
    }

    #[test]
    fn test_status_reports_pause() {
        let mut player = player();
        assert_eq!(player.status(), Status::Stopped);

        player.play("v2").unwrap();
        player.pause().unwrap();

        match player.status() {
            Status::Playing { video, paused } => {
                assert_eq!(video.id, "v2");
                assert!(paused);
            }
            Status::Stopped => panic!("Expected a paused video"),
        }
    }

    #[test]
    fn test_flag_current_video_stops_it() {
        let mut player = player();
        player.play("v1").unwrap();

        let outcome = player.flag_video("v1", Some("dont_like_cats")).unwrap();
        assert_eq!(outcome.stopped.map(|v| v.id), Some("v1".to_string()));
        assert_eq!(outcome.reason, "dont_like_cats");
        assert!(player.playback().is_stopped());

        assert_eq!(
            player.play("v1"),
            Err(PlayerError::VideoFlagged {
                reason: "dont_like_cats".to_string()
            })
        );
    }

    #[test]
    fn test_flag_other_video_keeps_playing() {
        let mut player = player();
        player.play("v2").unwrap();

        let outcome = player.flag_video("v1", None).unwrap();
        assert!(outcome.stopped.is_none());
        assert_eq!(player.playback().current(), Some("v2"));
    }

    #[test]
    fn test_all_videos_show_flags() {
        let mut player = player();
        player.flag_video("v2", None).unwrap();

        let lines: Vec<String> = player.all_videos().iter().map(ToString::to_string).collect();
        assert_eq!(
            lines,
            vec![
                "Cat video (v1) [funny]".to_string(),
                "Dog video (v2) [funny cute] - FLAGGED (reason: Not supplied)".to_string(),
            ]
        );
    }

    #[test]
    fn test_show_playlist_uses_stored_name() {
        let mut player = player();
        player.create_playlist("Weekend").unwrap();
        player.add_to_playlist("WEEKEND", "v2").unwrap();

        let view = player.show_playlist("weekend").unwrap();
        assert_eq!(view.name, "Weekend");
        assert_eq!(view.videos.len(), 1);
        assert_eq!(view.videos[0].video.id, "v2");
    }
}
