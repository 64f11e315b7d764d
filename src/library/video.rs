//! Video records held by the library.

use serde::{Deserialize, Serialize};

/// A single video in the library
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    /// Unique video identifier
    pub id: String,

    /// Human-readable title
    pub title: String,

    /// Tags, in the order they were declared
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Video {
    /// Create a new video without tags
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            tags: Vec::new(),
        }
    }

    /// Add a tag
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Add multiple tags
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Check whether any tag equals `tag`, ignoring case
    pub fn has_tag(&self, tag: &str) -> bool {
        let tag = tag.to_lowercase();
        self.tags.iter().any(|t| t.to_lowercase() == tag)
    }
}

impl std::fmt::Display for Video {
    /// `title (id) [tag1 tag2]`
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}) [{}]", self.title, self.id, self.tags.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_tags() {
        let video = Video::new("amazing_cats_video_id", "Amazing Cats")
            .with_tags(["#cat", "#animal"]);

        assert_eq!(
            video.to_string(),
            "Amazing Cats (amazing_cats_video_id) [#cat #animal]"
        );
    }

    #[test]
    fn test_display_without_tags() {
        let video = Video::new("nothing_video_id", "Video about nothing");
        assert_eq!(video.to_string(), "Video about nothing (nothing_video_id) []");
    }

    #[test]
    fn test_has_tag_is_case_insensitive_and_exact() {
        let video = Video::new("v1", "Cat video").with_tag("#Funny");

        assert!(video.has_tag("#funny"));
        assert!(video.has_tag("#FUNNY"));
        assert!(!video.has_tag("#fun"));
        assert!(!video.has_tag("funny"));
    }
}
