//! Parsing of shell command lines.
//!
//! One command per line: a case-insensitive keyword followed by
//! whitespace-separated arguments.

use thiserror::Error;

/// A parsed shell command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    NumberOfVideos,
    ShowAllVideos,
    Play { video_id: String },
    Stop,
    Pause,
    Continue,
    ShowPlaying,
    PlayRandom,
    CreatePlaylist { name: String },
    AddToPlaylist { name: String, video_id: String },
    RemoveFromPlaylist { name: String, video_id: String },
    ClearPlaylist { name: String },
    DeletePlaylist { name: String },
    ShowPlaylist { name: String },
    ShowAllPlaylists,
    SearchVideos { term: String },
    SearchVideosWithTag { tag: String },
    FlagVideo { video_id: String, reason: Option<String> },
    AllowVideo { video_id: String },
    Help,
    Exit,
}

/// A line that is not a valid command
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Please enter a valid command, type HELP for a list of available commands.")]
    Unknown(String),

    #[error("Usage: {0}")]
    Usage(&'static str),
}

/// Keyword, usage and description of every command, in HELP order
pub const COMMANDS: &[(&str, &str, &str)] = &[
    ("NUMBER_OF_VIDEOS", "NUMBER_OF_VIDEOS", "Shows how many videos are in the library."),
    ("SHOW_ALL_VIDEOS", "SHOW_ALL_VIDEOS", "Lists all videos from the library."),
    ("PLAY", "PLAY <video_id>", "Plays specified video."),
    ("PLAY_RANDOM", "PLAY_RANDOM", "Plays a random video from the library."),
    ("STOP", "STOP", "Stop the current video."),
    ("PAUSE", "PAUSE", "Pause the current video."),
    ("CONTINUE", "CONTINUE", "Resume the current paused video."),
    ("SHOW_PLAYING", "SHOW_PLAYING", "Displays the title, video_id and tags of the current video."),
    ("CREATE_PLAYLIST", "CREATE_PLAYLIST <playlist_name>", "Creates a new (empty) playlist with the provided name."),
    ("ADD_TO_PLAYLIST", "ADD_TO_PLAYLIST <playlist_name> <video_id>", "Adds the requested video to the playlist."),
    ("REMOVE_FROM_PLAYLIST", "REMOVE_FROM_PLAYLIST <playlist_name> <video_id>", "Removes the specified video from the specified playlist."),
    ("CLEAR_PLAYLIST", "CLEAR_PLAYLIST <playlist_name>", "Removes all the videos from the playlist."),
    ("DELETE_PLAYLIST", "DELETE_PLAYLIST <playlist_name>", "Deletes the playlist."),
    ("SHOW_PLAYLIST", "SHOW_PLAYLIST <playlist_name>", "List all the videos in this playlist."),
    ("SHOW_ALL_PLAYLISTS", "SHOW_ALL_PLAYLISTS", "Display all the available playlists."),
    ("SEARCH_VIDEOS", "SEARCH_VIDEOS <search_term>", "Display all the videos whose titles contain the search_term."),
    ("SEARCH_VIDEOS_WITH_TAG", "SEARCH_VIDEOS_WITH_TAG <tag_name>", "Display all videos whose tags contains the provided tag."),
    ("FLAG_VIDEO", "FLAG_VIDEO <video_id> [flag_reason]", "Mark a video as flagged."),
    ("ALLOW_VIDEO", "ALLOW_VIDEO <video_id>", "Removes a flag from a video."),
    ("HELP", "HELP", "Displays help."),
    ("EXIT", "EXIT", "Terminates the program execution."),
];

fn usage(keyword: &str) -> &'static str {
    COMMANDS
        .iter()
        .find(|(k, _, _)| *k == keyword)
        .map(|(_, usage, _)| *usage)
        .unwrap_or("HELP")
}

impl Command {
    /// Parse one line. Blank lines give `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, ParseError> {
        let mut words = line.split_whitespace();
        let Some(keyword) = words.next() else {
            return Ok(None);
        };
        let keyword = keyword.to_uppercase();
        let args: Vec<&str> = words.collect();

        let command = match (keyword.as_str(), args.as_slice()) {
            ("NUMBER_OF_VIDEOS", []) => Self::NumberOfVideos,
            ("SHOW_ALL_VIDEOS", []) => Self::ShowAllVideos,
            ("PLAY", [video_id]) => Self::Play {
                video_id: video_id.to_string(),
            },
            ("STOP", []) => Self::Stop,
            ("PAUSE", []) => Self::Pause,
            ("CONTINUE", []) => Self::Continue,
            ("SHOW_PLAYING", []) => Self::ShowPlaying,
            ("PLAY_RANDOM", []) => Self::PlayRandom,
            ("CREATE_PLAYLIST", [name]) => Self::CreatePlaylist {
                name: name.to_string(),
            },
            ("ADD_TO_PLAYLIST", [name, video_id]) => Self::AddToPlaylist {
                name: name.to_string(),
                video_id: video_id.to_string(),
            },
            ("REMOVE_FROM_PLAYLIST", [name, video_id]) => Self::RemoveFromPlaylist {
                name: name.to_string(),
                video_id: video_id.to_string(),
            },
            ("CLEAR_PLAYLIST", [name]) => Self::ClearPlaylist {
                name: name.to_string(),
            },
            ("DELETE_PLAYLIST", [name]) => Self::DeletePlaylist {
                name: name.to_string(),
            },
            ("SHOW_PLAYLIST", [name]) => Self::ShowPlaylist {
                name: name.to_string(),
            },
            ("SHOW_ALL_PLAYLISTS", []) => Self::ShowAllPlaylists,
            ("SEARCH_VIDEOS", [_, ..]) => Self::SearchVideos {
                term: args.join(" "),
            },
            ("SEARCH_VIDEOS_WITH_TAG", [tag]) => Self::SearchVideosWithTag {
                tag: tag.to_string(),
            },
            ("FLAG_VIDEO", [video_id, reason @ ..]) => Self::FlagVideo {
                video_id: video_id.to_string(),
                reason: (!reason.is_empty()).then(|| reason.join(" ")),
            },
            ("ALLOW_VIDEO", [video_id]) => Self::AllowVideo {
                video_id: video_id.to_string(),
            },
            ("HELP", _) => Self::Help,
            ("EXIT", _) => Self::Exit,
            (keyword, _) if COMMANDS.iter().any(|(k, _, _)| *k == keyword) => {
                return Err(ParseError::Usage(usage(keyword)));
            }
            (keyword, _) => return Err(ParseError::Unknown(keyword.to_string())),
        };

        Ok(Some(command))
    }
}
