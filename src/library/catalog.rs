//! The video library: every video known to the player.
//!
//! Loaded once at startup and read-only afterwards. Three on-disk formats are
//! accepted, picked by file extension:
//!
//! - `.json` - array of `{ "id", "title", "tags" }`
//! - `.yaml` / `.yml` - the same schema
//! - anything else - one video per line: `title | id | tag1, tag2`

use std::collections::HashMap;
use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing::{debug, info};

use super::video::Video;

/// Library bundled into the binary, used when no library file is configured
const BUILTIN_LIBRARY: &str = include_str!("../../data/videos.txt");

/// Immutable collection of videos, indexed by id
#[derive(Debug, Clone, Default)]
pub struct VideoLibrary {
    /// Videos in load order
    videos: Vec<Video>,

    /// id -> position in `videos`
    index: HashMap<String, usize>,
}

impl VideoLibrary {
    /// Build a library from a list of videos.
    ///
    /// Fails if two videos share an id.
    pub fn from_videos(videos: Vec<Video>) -> Result<Self> {
        let mut index = HashMap::with_capacity(videos.len());

        for (pos, video) in videos.iter().enumerate() {
            if index.insert(video.id.clone(), pos).is_some() {
                bail!("Duplicate video id in library: {}", video.id);
            }
        }

        Ok(Self { videos, index })
    }

    /// The library shipped with the binary
    pub fn builtin() -> Result<Self> {
        let videos = parse_lines(BUILTIN_LIBRARY).context("Failed to parse builtin library")?;
        Self::from_videos(videos)
    }

    /// Load a library file, choosing the parser from the extension
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read library: {}", path.display()))?;

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        let videos: Vec<Video> = match extension.as_deref() {
            Some("json") => serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse library JSON: {}", path.display()))?,
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse library YAML: {}", path.display()))?,
            _ => parse_lines(&content)
                .with_context(|| format!("Failed to parse library: {}", path.display()))?,
        };

        let library = Self::from_videos(videos)?;
        info!(path = %path.display(), videos = library.len(), "Loaded video library");
        Ok(library)
    }

    /// Load `path` if given, otherwise the builtin library
    pub fn load_or_builtin(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                debug!("No library file configured, using builtin library");
                Self::builtin()
            }
        }
    }

    /// Get a video by ID
    pub fn get(&self, id: &str) -> Option<&Video> {
        self.index.get(id).map(|&pos| &self.videos[pos])
    }

    /// Check whether a video id is known
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// All videos in load order
    pub fn all(&self) -> &[Video] {
        &self.videos
    }

    /// All videos sorted by title (ties broken by id)
    pub fn sorted_by_title(&self) -> Vec<&Video> {
        let mut videos: Vec<_> = self.videos.iter().collect();
        sort_by_title(&mut videos);
        videos
    }

    /// Get the number of videos
    pub fn len(&self) -> usize {
        self.videos.len()
    }

    /// Check if the library is empty
    pub fn is_empty(&self) -> bool {
        self.videos.is_empty()
    }
}

/// Sort videos by title, then id
pub fn sort_by_title(videos: &mut [&Video]) {
    videos.sort_by(|a, b| a.title.cmp(&b.title).then_with(|| a.id.cmp(&b.id)));
}

/// Parse the line format: `title | id | tag1, tag2`
///
/// Blank lines are skipped. The tag column may be missing or empty.
pub fn parse_lines(content: &str) -> Result<Vec<Video>> {
    let mut videos = Vec::new();

    for (lineno, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let mut fields = line.split('|').map(str::trim);
        let title = fields.next().unwrap_or_default();
        let id = fields.next().unwrap_or_default();
        let tags = fields.next().unwrap_or_default();

        if title.is_empty() || id.is_empty() || fields.next().is_some() {
            bail!("Malformed library line {}: {:?}", lineno + 1, line);
        }

        let tags = tags
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty());

        videos.push(Video::new(id, title).with_tags(tags));
    }

    Ok(videos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_builtin_library() {
        let library = VideoLibrary::builtin().unwrap();

        assert_eq!(library.len(), 5);
        let cats = library.get("amazing_cats_video_id").unwrap();
        assert_eq!(cats.title, "Amazing Cats");
        assert_eq!(cats.tags, vec!["#cat", "#animal"]);

        let nothing = library.get("nothing_video_id").unwrap();
        assert!(nothing.tags.is_empty());
    }

    #[test]
    fn test_parse_lines() {
        let videos = parse_lines(
            "Cat video | v1 | funny\n\n  Dog video|v2|funny ,cute  \nBare | v3\n",
        )
        .unwrap();

        assert_eq!(videos.len(), 3);
        assert_eq!(videos[1].id, "v2");
        assert_eq!(videos[1].tags, vec!["funny", "cute"]);
        assert!(videos[2].tags.is_empty());
    }

    #[test]
    fn test_parse_lines_rejects_malformed() {
        let err = parse_lines("ok | v1 | a\njust a title\n").unwrap_err();
        assert!(err.to_string().contains("line 2"));

        assert!(parse_lines("a | b | c | d").is_err());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let result = VideoLibrary::from_videos(vec![
            Video::new("v1", "First"),
            Video::new("v1", "Second"),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_json_and_yaml() {
        let temp = TempDir::new().unwrap();

        let json_path = temp.path().join("videos.json");
        std::fs::write(
            &json_path,
            r#"[{"id": "v1", "title": "Cat video", "tags": ["funny"]}, {"id": "v2", "title": "Dog video"}]"#,
        )
        .unwrap();
        let library = VideoLibrary::load(&json_path).unwrap();
        assert_eq!(library.len(), 2);
        assert!(library.get("v2").unwrap().tags.is_empty());

        let yaml_path = temp.path().join("videos.yml");
        let mut file = std::fs::File::create(&yaml_path).unwrap();
        writeln!(
            file,
            r#"
- id: v1
  title: Cat video
  tags: [funny]
"#
        )
        .unwrap();
        let library = VideoLibrary::load(&yaml_path).unwrap();
        assert_eq!(library.get("v1").unwrap().tags, vec!["funny"]);
    }

    #[test]
    fn test_sorted_by_title() {
        let library = VideoLibrary::builtin().unwrap();
        let titles: Vec<_> = library
            .sorted_by_title()
            .into_iter()
            .map(|v| v.title.as_str())
            .collect();

        assert_eq!(
            titles,
            vec![
                "Amazing Cats",
                "Another Cat Video",
                "Funny Dogs",
                "Life at Google",
                "Video about nothing",
            ]
        );
    }
}
