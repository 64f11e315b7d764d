//! Configuration for vidplay.
//!
//! Configuration sources (highest priority first):
//! 1. `--library` on the command line
//! 2. Environment variable (VIDPLAY_LIBRARY)
//! 3. Config file (.vidplay/config.yaml)
//! 4. Defaults (builtin library, `vidplay> ` prompt)
//!
//! Config file discovery:
//! - Searches current directory and parents for .vidplay/config.yaml
//! - Falls back to ~/.vidplay/config.yaml
//! - The library path in a config file is relative to the directory that
//!   contains `.vidplay/`

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

/// Environment variable overriding the library path
pub const LIBRARY_ENV: &str = "VIDPLAY_LIBRARY";

const CONFIG_DIR: &str = ".vidplay";
const CONFIG_FILE: &str = "config.yaml";
const DEFAULT_PROMPT: &str = "vidplay> ";

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    /// Library data file (relative to the project root)
    pub library: Option<String>,
    #[serde(default)]
    pub shell: Option<ShellConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShellConfig {
    pub prompt: Option<String>,
    pub echo_commands: Option<bool>,
}

/// Resolved configuration with absolute paths
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Library data file; `None` means the builtin library
    pub library: Option<PathBuf>,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
    /// Shell settings
    pub shell: ShellSettings,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellSettings {
    /// Prompt printed before each interactive command
    pub prompt: String,
    /// Echo each command before its output (useful for scripts)
    pub echo_commands: bool,
}

impl Default for ShellSettings {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_string(),
            echo_commands: false,
        }
    }
}

impl ResolvedConfig {
    /// Replace the library path (command-line override)
    pub fn with_library(mut self, library: Option<PathBuf>) -> Self {
        if library.is_some() {
            self.library = library;
        }
        self
    }
}

/// Find config file by searching `start` and its parents, then the home directory
fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_DIR).join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    let home_config = dirs::home_dir()?.join(CONFIG_DIR).join(CONFIG_FILE);
    home_config.exists().then_some(home_config)
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to the config file's project root
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
            .canonicalize()
            .unwrap_or_else(|_| base.join(path_str))
    }
}

/// Resolve configuration from an optional config file and env override
fn resolve(config_file: Option<PathBuf>, env_library: Option<String>) -> Result<ResolvedConfig> {
    let (file_library, shell) = if let Some(ref config_path) = config_file {
        let config = load_config_file(config_path)?;

        // Base directory is the parent of .vidplay/ (i.e., grandparent of config.yaml)
        let base_dir = config_path
            .parent()
            .and_then(|p| p.parent())
            .unwrap_or(Path::new("."));

        let library = config
            .library
            .as_deref()
            .map(|lib| resolve_path(base_dir, lib));

        let defaults = ShellSettings::default();
        let shell = match config.shell {
            Some(shell) => ShellSettings {
                prompt: shell.prompt.unwrap_or(defaults.prompt),
                echo_commands: shell.echo_commands.unwrap_or(defaults.echo_commands),
            },
            None => defaults,
        };

        (library, shell)
    } else {
        (None, ShellSettings::default())
    };

    let library = env_library
        .filter(|lib| !lib.trim().is_empty())
        .map(PathBuf::from)
        .or(file_library);

    debug!(?config_file, ?library, "Resolved configuration");

    Ok(ResolvedConfig {
        library,
        config_file,
        shell,
    })
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    let cwd = std::env::current_dir().context("Failed to determine current directory")?;
    resolve(find_config_file(&cwd), std::env::var(LIBRARY_ENV).ok())
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| format!("{:#}", e)));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_config(root: &Path, body: &str) -> PathBuf {
        let dir = root.join(CONFIG_DIR);
        std::fs::create_dir_all(&dir).unwrap();

        let config_path = dir.join(CONFIG_FILE);
        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "{}", body).unwrap();
        config_path
    }

    #[test]
    fn test_defaults_without_file() {
        let config = resolve(None, None).unwrap();

        assert!(config.library.is_none());
        assert!(config.config_file.is_none());
        assert_eq!(config.shell, ShellSettings::default());
        assert_eq!(config.shell.prompt, "vidplay> ");
    }

    #[test]
    fn test_config_file_parsing() {
        let temp = TempDir::new().unwrap();
        let config_path = write_config(
            temp.path(),
            r#"
version: "1.0"
library: data/videos.json
shell:
  prompt: "yt> "
  echo_commands: true
"#,
        );

        let config = load_config_file(&config_path).unwrap();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.library, Some("data/videos.json".to_string()));
        let shell = config.shell.unwrap();
        assert_eq!(shell.prompt, Some("yt> ".to_string()));
        assert_eq!(shell.echo_commands, Some(true));
    }

    #[test]
    fn test_library_relative_to_project_root() {
        let temp = TempDir::new().unwrap();
        let config_path = write_config(
            temp.path(),
            r#"
version: "1.0"
library: videos.txt
"#,
        );

        let config = resolve(Some(config_path.clone()), None).unwrap();
        assert_eq!(config.library, Some(temp.path().join("videos.txt")));
        assert_eq!(config.config_file, Some(config_path));
        assert_eq!(config.shell.prompt, DEFAULT_PROMPT);
    }

    #[test]
    fn test_env_and_cli_override_file() {
        let temp = TempDir::new().unwrap();
        let config_path = write_config(
            temp.path(),
            r#"
version: "1.0"
library: videos.txt
"#,
        );

        let config = resolve(Some(config_path), Some("/env/videos.json".to_string())).unwrap();
        assert_eq!(config.library, Some(PathBuf::from("/env/videos.json")));

        let config = config.with_library(Some(PathBuf::from("/cli/videos.yaml")));
        assert_eq!(config.library, Some(PathBuf::from("/cli/videos.yaml")));

        let config = config.with_library(None);
        assert_eq!(config.library, Some(PathBuf::from("/cli/videos.yaml")));
    }

    #[test]
    fn test_find_config_file_in_parent() {
        let temp = TempDir::new().unwrap();
        let config_path = write_config(temp.path(), "version: \"1.0\"");
        let nested = temp.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_config_file(&nested), Some(config_path));
    }

    #[test]
    fn test_resolve_relative_path() {
        let base = PathBuf::from("/home/user/project");

        assert_eq!(
            resolve_path(&base, "./subdir"),
            PathBuf::from("/home/user/project/subdir")
        );
        assert_eq!(
            resolve_path(&base, "/absolute/path"),
            PathBuf::from("/absolute/path")
        );
    }
}
