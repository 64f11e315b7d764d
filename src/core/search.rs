//! Title and tag search over the library.
//!
//! Flagged videos never appear in results. Results are sorted by title.

use crate::library::catalog::sort_by_title;
use crate::library::{Video, VideoLibrary};

use super::error::{PlayerError, Result};
use super::flags::FlagRegistry;

/// What to search on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    /// Case-insensitive substring of the title
    Title,

    /// Case-insensitive exact match against any tag
    Tag,
}

impl SearchField {
    fn matches(self, video: &Video, term: &str) -> bool {
        match self {
            Self::Title => video.title.to_lowercase().contains(&term.to_lowercase()),
            Self::Tag => video.has_tag(term),
        }
    }
}

/// Search the library, skipping flagged videos.
///
/// Fails with `NoMatches` when nothing matches.
pub fn search<'a>(
    library: &'a VideoLibrary,
    flags: &FlagRegistry,
    field: SearchField,
    term: &str,
) -> Result<Vec<&'a Video>> {
    let mut results: Vec<&Video> = library
        .all()
        .iter()
        .filter(|video| !flags.is_flagged(&video.id))
        .filter(|video| field.matches(video, term))
        .collect();

    if results.is_empty() {
        return Err(PlayerError::NoMatches);
    }

    sort_by_title(&mut results);
    Ok(results)
}

pub fn search_by_title<'a>(
    library: &'a VideoLibrary,
    flags: &FlagRegistry,
    term: &str,
) -> Result<Vec<&'a Video>> {
    search(library, flags, SearchField::Title, term)
}

pub fn search_by_tag<'a>(
    library: &'a VideoLibrary,
    flags: &FlagRegistry,
    tag: &str,
) -> Result<Vec<&'a Video>> {
    search(library, flags, SearchField::Tag, tag)
}

/// Map a follow-up answer to one of the numbered results.
///
/// Numbers are 1-based. Anything that is not a number in range is `None`.
pub fn select_from_results<'a>(results: &[&'a Video], raw_input: &str) -> Option<&'a Video> {
    let choice: usize = raw_input.trim().parse().ok()?;
    results.get(choice.checked_sub(1)?).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn library() -> VideoLibrary {
        VideoLibrary::from_videos(vec![
            Video::new("v2", "Dog video").with_tags(["funny", "cute"]),
            Video::new("v1", "Cat video").with_tag("funny"),
            Video::new("v3", "Cooking basics").with_tag("Food"),
        ])
        .unwrap()
    }

    fn ids(videos: &[&Video]) -> Vec<String> {
        videos.iter().map(|v| v.id.clone()).collect()
    }

    #[test]
    fn test_search_by_tag_sorted_by_title() {
        let library = library();
        let flags = FlagRegistry::new();

        let results = search_by_tag(&library, &flags, "funny").unwrap();
        assert_eq!(ids(&results), vec!["v1", "v2"]);

        let results = search_by_tag(&library, &flags, "FOOD").unwrap();
        assert_eq!(ids(&results), vec!["v3"]);
    }

    #[test]
    fn test_search_by_tag_is_exact() {
        let library = library();
        let flags = FlagRegistry::new();

        assert_eq!(
            search_by_tag(&library, &flags, "fun"),
            Err(PlayerError::NoMatches)
        );
    }

    #[test]
    fn test_search_by_title_substring() {
        let library = library();
        let flags = FlagRegistry::new();

        let results = search_by_title(&library, &flags, "VIDEO").unwrap();
        assert_eq!(ids(&results), vec!["v1", "v2"]);

        let results = search_by_title(&library, &flags, "ok").unwrap();
        assert_eq!(ids(&results), vec!["v3"]);

        assert_eq!(
            search_by_title(&library, &flags, "blockchain"),
            Err(PlayerError::NoMatches)
        );
    }

    #[test]
    fn test_search_skips_flagged() {
        let library = library();
        let mut flags = FlagRegistry::new();
        flags.flag("v1", None).unwrap();

        let results = search_by_tag(&library, &flags, "funny").unwrap();
        assert_eq!(ids(&results), vec!["v2"]);
    }

    #[test]
    fn test_select_from_results() {
        let library = library();
        let flags = FlagRegistry::new();
        let results = search_by_tag(&library, &flags, "funny").unwrap();

        assert_eq!(select_from_results(&results, "2").unwrap().id, "v2");
        assert_eq!(select_from_results(&results, " 1\n").unwrap().id, "v1");
        assert!(select_from_results(&results, "0").is_none());
        assert!(select_from_results(&results, "3").is_none());
        assert!(select_from_results(&results, "-1").is_none());
        assert!(select_from_results(&results, "no").is_none());
        assert!(select_from_results(&results, "").is_none());
    }
}
