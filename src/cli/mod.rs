//! Command-line interface for vidplay.
//!
//! Provides the interactive shell, script execution, a library listing and
//! a configuration dump.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use crate::config::{self, ResolvedConfig, LIBRARY_ENV};
use crate::core::Player;
use crate::library::VideoLibrary;

pub mod command;
pub mod shell;

pub use command::{Command, ParseError};
pub use shell::{Flow, Shell};

/// vidplay - In-memory video catalog, playback and playlist manager
#[derive(Parser, Debug)]
#[command(name = "vidplay")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Library file (.json, .yaml or `title | id | tags` lines)
    #[arg(short, long, global = true, env = LIBRARY_ENV)]
    pub library: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start an interactive session (default)
    Shell,

    /// Run commands from a file, one per line ("-" reads stdin)
    Run {
        /// Script file
        script: PathBuf,
    },

    /// List the videos in the library
    Videos,

    /// Show resolved configuration (debug)
    Config,
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        let cfg = config::config()?.clone().with_library(self.library);

        match self.command.unwrap_or(Commands::Shell) {
            Commands::Shell => run_shell(&cfg),
            Commands::Run { script } => run_script(&cfg, &script),
            Commands::Videos => list_videos(&cfg),
            Commands::Config => show_config(&cfg),
        }
    }
}

/// Load the configured library and wrap it in a shell
fn build_shell(cfg: &ResolvedConfig) -> Result<Shell> {
    let library = VideoLibrary::load_or_builtin(cfg.library.as_deref())?;
    info!(videos = library.len(), "Library ready");
    Ok(Shell::new(Player::new(library), cfg.shell.clone()))
}

/// Interactive session on stdin/stdout
fn run_shell(cfg: &ResolvedConfig) -> Result<()> {
    let mut shell = build_shell(cfg)?;
    shell.run_interactive(io::stdin().lock(), io::stdout().lock())
}

/// Execute a command file
fn run_script(cfg: &ResolvedConfig, script: &Path) -> Result<()> {
    let mut shell = build_shell(cfg)?;

    if script.to_str() == Some("-") {
        return shell.run_script(io::stdin().lock(), io::stdout().lock());
    }

    let file = File::open(script)
        .with_context(|| format!("Failed to open script: {}", script.display()))?;
    shell.run_script(BufReader::new(file), io::stdout().lock())
}

/// Print every video in the library
fn list_videos(cfg: &ResolvedConfig) -> Result<()> {
    let library = VideoLibrary::load_or_builtin(cfg.library.as_deref())?;

    if library.is_empty() {
        println!("Library is empty.");
        return Ok(());
    }

    println!("{:<28} {:<30} {}", "ID", "TITLE", "TAGS");
    println!("{}", "-".repeat(80));

    for video in library.sorted_by_title() {
        let title_truncated = if video.title.chars().count() > 27 {
            format!("{}...", video.title.chars().take(27).collect::<String>())
        } else {
            video.title.clone()
        };
        println!("{:<28} {:<30} {}", video.id, title_truncated, video.tags.join(" "));
    }

    println!("\nTotal: {} videos", library.len());
    Ok(())
}

/// Show the resolved configuration (for debugging)
fn show_config(cfg: &ResolvedConfig) -> Result<()> {
    println!("vidplay configuration");
    println!();
    println!(
        "Config file: {}",
        cfg.config_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none - using defaults)".to_string())
    );
    println!(
        "Library:     {}",
        cfg.library
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(builtin)".to_string())
    );
    println!();
    println!("Shell:");
    println!("  Prompt:        {:?}", cfg.shell.prompt);
    println!("  Echo commands: {}", cfg.shell.echo_commands);

    Ok(())
}
