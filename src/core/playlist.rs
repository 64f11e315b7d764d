//! Named playlists.
//!
//! Names are matched case-insensitively through a lowercased key, while the
//! name given at creation time is kept verbatim for display. Playlists keep
//! their creation order; `list` sorts names for presentation.

use std::collections::HashMap;

use tracing::debug;

use super::error::{PlayerError, Result};

/// A named, ordered sequence of video ids without duplicates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playlist {
    /// Display name, as given at creation
    name: String,

    /// Video ids in insertion order
    video_ids: Vec<String>,
}

impl Playlist {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            video_ids: Vec::new(),
        }
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Video ids in insertion order
    pub fn video_ids(&self) -> &[String] {
        &self.video_ids
    }

    /// Check if a video id is in this playlist
    pub fn contains(&self, video_id: &str) -> bool {
        self.video_ids.iter().any(|id| id == video_id)
    }

    pub fn len(&self) -> usize {
        self.video_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.video_ids.is_empty()
    }
}

/// Lookup key for a playlist name
fn normalize(name: &str) -> String {
    name.to_lowercase()
}

/// All playlists, keyed by normalized name
#[derive(Debug, Clone, Default)]
pub struct PlaylistStore {
    /// normalized name -> playlist
    playlists: HashMap<String, Playlist>,

    /// Normalized names in creation order
    order: Vec<String>,
}

impl PlaylistStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty playlist.
    ///
    /// Fails with `DuplicateName` if a playlist with the same name, ignoring
    /// case, already exists.
    pub fn create(&mut self, name: &str) -> Result<&Playlist> {
        let key = normalize(name);
        if self.playlists.contains_key(&key) {
            return Err(PlayerError::DuplicateName);
        }

        debug!(playlist = name, "Creating playlist");
        self.order.push(key.clone());
        Ok(&*self.playlists.entry(key).or_insert_with(|| Playlist::new(name)))
    }

    /// Delete a playlist, returning it
    pub fn delete(&mut self, name: &str) -> Result<Playlist> {
        let key = normalize(name);
        let playlist = self
            .playlists
            .remove(&key)
            .ok_or(PlayerError::PlaylistNotFound)?;
        self.order.retain(|k| *k != key);

        debug!(playlist = %playlist.name, "Deleted playlist");
        Ok(playlist)
    }

    /// Append a video id to the end of a playlist
    pub fn add_video(&mut self, name: &str, video_id: &str) -> Result<&Playlist> {
        let playlist = self.get_mut(name)?;
        if playlist.contains(video_id) {
            return Err(PlayerError::AlreadyPresent);
        }

        playlist.video_ids.push(video_id.to_string());
        Ok(&*playlist)
    }

    /// Remove a video id from a playlist
    pub fn remove_video(&mut self, name: &str, video_id: &str) -> Result<&Playlist> {
        let playlist = self.get_mut(name)?;
        let pos = playlist
            .video_ids
            .iter()
            .position(|id| id == video_id)
            .ok_or(PlayerError::NotInPlaylist)?;

        playlist.video_ids.remove(pos);
        Ok(&*playlist)
    }

    /// Empty a playlist, keeping the playlist itself
    pub fn clear(&mut self, name: &str) -> Result<&Playlist> {
        let playlist = self.get_mut(name)?;
        playlist.video_ids = Vec::new();
        Ok(&*playlist)
    }

    /// Look up a playlist by name, ignoring case
    pub fn get(&self, name: &str) -> Result<&Playlist> {
        self.playlists
            .get(&normalize(name))
            .ok_or(PlayerError::PlaylistNotFound)
    }

    fn get_mut(&mut self, name: &str) -> Result<&mut Playlist> {
        self.playlists
            .get_mut(&normalize(name))
            .ok_or(PlayerError::PlaylistNotFound)
    }

    /// Display names sorted case-insensitively (ties broken by raw name)
    pub fn list(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.iter().map(Playlist::name).collect();
        names.sort_by(|a, b| {
            a.to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| a.cmp(b))
        });
        names
    }

    /// Playlists in creation order
    pub fn iter(&self) -> impl Iterator<Item = &Playlist> {
        self.order.iter().filter_map(|key| self.playlists.get(key))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
