//! Line-oriented command shell around a [`Player`].
//!
//! Reads commands from any `BufRead`, writes human-readable output to any
//! `Write`. The same loop serves the interactive prompt and script files;
//! the post-search question reads the next line from the same input.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use tracing::debug;

use crate::config::ShellSettings;
use crate::core::{
    select_from_results, PauseOutcome, PlayOutcome, Player, PlayerError, SearchField, Status,
};

use super::command::{Command, COMMANDS};

/// Whether the loop should keep reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Command shell
pub struct Shell {
    player: Player,
    settings: ShellSettings,
}

impl Shell {
    pub fn new(player: Player, settings: ShellSettings) -> Self {
        Self { player, settings }
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    /// Interactive session: banner, prompt before every command, farewell
    pub fn run_interactive<R: BufRead, W: Write>(&mut self, mut input: R, mut out: W) -> Result<()> {
        writeln!(out, "Hello and welcome to vidplay, what would you like to do?")?;
        writeln!(out, "    Enter HELP for list of available commands or EXIT to terminate.")?;

        loop {
            write!(out, "{}", self.settings.prompt)?;
            out.flush()?;

            let Some(line) = read_line(&mut input)? else {
                writeln!(out)?;
                break;
            };
            if self.execute_line(&line, &mut input, &mut out)? == Flow::Exit {
                break;
            }
        }

        writeln!(out, "vidplay has now terminated its execution. Thank you and goodbye!")?;
        Ok(())
    }

    /// Run every command from `input` until EOF or EXIT
    pub fn run_script<R: BufRead, W: Write>(&mut self, mut input: R, mut out: W) -> Result<()> {
        while let Some(line) = read_line(&mut input)? {
            if self.settings.echo_commands && !line.trim().is_empty() {
                writeln!(out, "{}{}", self.settings.prompt, line.trim())?;
            }
            if self.execute_line(&line, &mut input, &mut out)? == Flow::Exit {
                break;
            }
        }
        Ok(())
    }

    /// Parse and execute one line
    pub fn execute_line<R: BufRead, W: Write>(
        &mut self,
        line: &str,
        input: &mut R,
        out: &mut W,
    ) -> Result<Flow> {
        match Command::parse(line) {
            Ok(Some(command)) => self.execute(command, input, out),
            Ok(None) => Ok(Flow::Continue),
            Err(e) => {
                debug!(line, error = %e, "Rejected command line");
                writeln!(out, "{}", e)?;
                Ok(Flow::Continue)
            }
        }
    }

    /// Execute one command, writing its output
    pub fn execute<R: BufRead, W: Write>(
        &mut self,
        command: Command,
        input: &mut R,
        out: &mut W,
    ) -> Result<Flow> {
        debug!(?command, "Executing command");

        match command {
            Command::NumberOfVideos => {
                writeln!(out, "{} videos in the library", self.player.number_of_videos())?;
            }
            Command::ShowAllVideos => {
                writeln!(out, "Here's a list of all available videos:")?;
                for entry in self.player.all_videos() {
                    writeln!(out, "  {}", entry)?;
                }
            }
            Command::Play { video_id } => {
                let result = self.player.play(&video_id);
                write_play(out, result, "Cannot play video")?;
            }
            Command::PlayRandom => {
                let result = self.player.play_random();
                write_play(out, result, "Cannot play random video")?;
            }
            Command::Stop => match self.player.stop() {
                Ok(video) => writeln!(out, "Stopping video: {}", video.title)?,
                Err(e) => writeln!(out, "Cannot stop video: {}", e)?,
            },
            Command::Pause => match self.player.pause() {
                Ok((PauseOutcome::Paused, video)) => {
                    writeln!(out, "Pausing video: {}", video.title)?
                }
                Ok((PauseOutcome::AlreadyPaused, video)) => {
                    writeln!(out, "Video already paused: {}", video.title)?
                }
                Err(e) => writeln!(out, "Cannot pause video: {}", e)?,
            },
            Command::Continue => match self.player.resume() {
                Ok(video) => writeln!(out, "Continuing video: {}", video.title)?,
                Err(e) => writeln!(out, "Cannot continue video: {}", e)?,
            },
            Command::ShowPlaying => match self.player.status() {
                Status::Stopped => writeln!(out, "No video is currently playing")?,
                Status::Playing { video, paused } => {
                    let suffix = if paused { " - PAUSED" } else { "" };
                    writeln!(out, "Currently playing: {}{}", video, suffix)?
                }
            },
            Command::CreatePlaylist { name } => match self.player.create_playlist(&name) {
                Ok(name) => writeln!(out, "Successfully created new playlist: {}", name)?,
                Err(e) => writeln!(out, "Cannot create playlist: {}", e)?,
            },
            Command::AddToPlaylist { name, video_id } => {
                match self.player.add_to_playlist(&name, &video_id) {
                    Ok(change) => writeln!(
                        out,
                        "Added video to {}: {}",
                        change.playlist, change.video.title
                    )?,
                    Err(e) => writeln!(out, "Cannot add video to {}: {}", name, e)?,
                }
            }
            Command::RemoveFromPlaylist { name, video_id } => {
                match self.player.remove_from_playlist(&name, &video_id) {
                    Ok(change) => writeln!(
                        out,
                        "Removed video from {}: {}",
                        change.playlist, change.video.title
                    )?,
                    Err(e) => writeln!(out, "Cannot remove video from {}: {}", name, e)?,
                }
            }
            Command::ClearPlaylist { name } => match self.player.clear_playlist(&name) {
                Ok(name) => writeln!(out, "Successfully removed all videos from {}", name)?,
                Err(e) => writeln!(out, "Cannot clear playlist {}: {}", name, e)?,
            },
            Command::DeletePlaylist { name } => match self.player.delete_playlist(&name) {
                Ok(name) => writeln!(out, "Deleted playlist: {}", name)?,
                Err(e) => writeln!(out, "Cannot delete playlist {}: {}", name, e)?,
            },
            Command::ShowPlaylist { name } => match self.player.show_playlist(&name) {
                Ok(view) => {
                    writeln!(out, "Showing playlist: {}", view.name)?;
                    if view.videos.is_empty() {
                        writeln!(out, "  No videos here yet")?;
                    }
                    for entry in &view.videos {
                        writeln!(out, "  {}", entry)?;
                    }
                }
                Err(e) => writeln!(out, "Cannot show playlist {}: {}", name, e)?,
            },
            Command::ShowAllPlaylists => {
                let names = self.player.playlist_names();
                if names.is_empty() {
                    writeln!(out, "No playlists exist yet")?;
                } else {
                    writeln!(out, "Showing all playlists:")?;
                    for name in names {
                        writeln!(out, "  {}", name)?;
                    }
                }
            }
            Command::SearchVideos { term } => {
                self.search(SearchField::Title, &term, input, out)?;
            }
            Command::SearchVideosWithTag { tag } => {
                self.search(SearchField::Tag, &tag, input, out)?;
            }
            Command::FlagVideo { video_id, reason } => {
                match self.player.flag_video(&video_id, reason.as_deref()) {
                    Ok(outcome) => {
                        if let Some(stopped) = outcome.stopped {
                            writeln!(out, "Stopping video: {}", stopped.title)?;
                        }
                        writeln!(
                            out,
                            "Successfully flagged video: {} (reason: {})",
                            outcome.video.title, outcome.reason
                        )?;
                    }
                    Err(e) => writeln!(out, "Cannot flag video: {}", e)?,
                }
            }
            Command::AllowVideo { video_id } => match self.player.allow_video(&video_id) {
                Ok(video) => writeln!(out, "Successfully removed flag from video: {}", video.title)?,
                Err(e) => writeln!(out, "Cannot remove flag from video: {}", e)?,
            },
            Command::Help => write_help(out)?,
            Command::Exit => return Ok(Flow::Exit),
        }

        Ok(Flow::Continue)
    }

    /// Print numbered results and offer to play one of them
    fn search<R: BufRead, W: Write>(
        &mut self,
        field: SearchField,
        term: &str,
        input: &mut R,
        out: &mut W,
    ) -> Result<()> {
        let selected = {
            let results = match self.player.search(field, term) {
                Ok(results) => results,
                Err(PlayerError::NoMatches) => {
                    writeln!(out, "No search results for {}", term)?;
                    return Ok(());
                }
                Err(e) => {
                    writeln!(out, "Cannot search videos: {}", e)?;
                    return Ok(());
                }
            };

            writeln!(out, "Here are the results for {}:", term)?;
            for (i, video) in results.iter().enumerate() {
                writeln!(out, "  {}) {}", i + 1, video)?;
            }
            writeln!(
                out,
                "Would you like to play any of the above? If yes, specify the number of the video."
            )?;
            writeln!(out, "If your answer is not a valid number, we will assume it's a no.")?;
            out.flush()?;

            let answer = read_line(input)?.unwrap_or_default();
            if self.settings.echo_commands && !answer.trim().is_empty() {
                writeln!(out, "{}{}", self.settings.prompt, answer.trim())?;
            }
            select_from_results(&results, &answer).map(|video| video.id.clone())
        };

        if let Some(video_id) = selected {
            let result = self.player.play(&video_id);
            write_play(out, result, "Cannot play video")?;
        }
        Ok(())
    }
}

/// Read one line without its terminator; `None` at EOF
fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    let read = input.read_line(&mut line).context("Failed to read input")?;
    if read == 0 {
        return Ok(None);
    }

    let trimmed = line.trim_end_matches(['\n', '\r']);
    Ok(Some(trimmed.to_string()))
}

fn write_play<W: Write>(
    out: &mut W,
    result: Result<PlayOutcome, PlayerError>,
    context: &str,
) -> Result<()> {
    match result {
        Ok(outcome) => {
            if let Some(stopped) = outcome.stopped {
                writeln!(out, "Stopping video: {}", stopped.title)?;
            }
            writeln!(out, "Playing video: {}", outcome.playing.title)?;
        }
        Err(e) => {
            debug!(error = %e, "{}", context);
            writeln!(out, "{}: {}", context, e)?;
        }
    }
    Ok(())
}

fn write_help<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "Available commands:")?;
    for (_, usage, description) in COMMANDS {
        writeln!(out, "    {:<48} {}", usage, description)?;
    }
    Ok(())
}
