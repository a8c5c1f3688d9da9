use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use library::Traversal;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PORT: u16 = 8000;

/// Serve the tags of the audio files under a music directory.
#[derive(Debug, Parser)]
#[command(name = "tagshelf", version)]
pub struct Cli {
    /// Music directory to scan on every catalog request.
    pub root: Option<PathBuf>,

    /// Optional YAML config file; command-line values take precedence.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub port: Option<u16>,

    /// Address to bind, without the port.
    #[arg(long, value_name = "ADDR")]
    pub bind: Option<String>,

    /// Directory holding index.html, elm.js and style.css.
    #[arg(long, value_name = "DIR")]
    pub web_root: Option<PathBuf>,

    /// Only scan the immediate children of the music directory.
    #[arg(long)]
    pub flat: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub music_root: String,
    pub port: u16,
    pub bind_addr: String,
    pub web_root: String,
    pub traversal: Traversal,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            music_root: "".to_string(),
            port: DEFAULT_PORT,
            bind_addr: "0.0.0.0".to_string(),
            web_root: "web".to_string(),
            traversal: Traversal::Recursive,
        }
    }
}

/// Startup settings after merging the config file and the command line.
#[derive(Clone, Debug)]
pub struct Settings {
    pub music_root: PathBuf,
    pub bind_addr: String,
    pub web_root: PathBuf,
    pub traversal: Traversal,
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Yaml(serde_yaml::Error),
    MissingRoot,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "io error: {}", err),
            ConfigError::Yaml(err) => write!(f, "yaml error: {}", err),
            ConfigError::MissingRoot => {
                write!(f, "no music directory given (pass ROOT or set music_root)")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::Yaml(err)
    }
}

pub fn load_config(path: &Path) -> Result<ServerConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let mut config: ServerConfig = serde_yaml::from_str(&contents)?;
    if config.port == 0 {
        config.port = DEFAULT_PORT;
    }
    if config.bind_addr.trim().is_empty() {
        config.bind_addr = "0.0.0.0".to_string();
    }
    if config.web_root.trim().is_empty() {
        config.web_root = "web".to_string();
    }
    Ok(config)
}

impl Settings {
    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        let config = match cli.config.as_deref() {
            Some(path) => load_config(path)?,
            None => ServerConfig::default(),
        };
        let file_path = |value: &str| match cli.config.as_deref() {
            Some(config_path) => resolve_path(config_path, value),
            None => PathBuf::from(value),
        };

        let music_root = match cli.root {
            Some(root) => root,
            None if !config.music_root.trim().is_empty() => file_path(config.music_root.trim()),
            None => return Err(ConfigError::MissingRoot),
        };
        let port = cli.port.filter(|p| *p != 0).unwrap_or(config.port);
        let host = cli.bind.unwrap_or(config.bind_addr);
        let web_root = cli.web_root.unwrap_or_else(|| file_path(&config.web_root));
        let traversal = if cli.flat { Traversal::Flat } else { config.traversal };

        Ok(Self {
            music_root,
            bind_addr: format!("{}:{}", host, port),
            web_root,
            traversal,
        })
    }
}

/// Resolves `value` against the directory holding the config file.
pub fn resolve_path(config_path: &Path, value: &str) -> PathBuf {
    let raw = PathBuf::from(value);
    if raw.is_absolute() {
        return raw;
    }
    let base = config_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    base.join(raw)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::{Path, PathBuf};

    use clap::Parser;
    use library::Traversal;

    use super::{load_config, resolve_path, Cli, ConfigError, Settings, DEFAULT_PORT};

    fn settings(args: &[&str]) -> Result<Settings, ConfigError> {
        Settings::from_cli(Cli::try_parse_from(args).unwrap())
    }

    #[test]
    fn positional_root_with_defaults() {
        let settings = settings(&["tagshelf", "/music"]).unwrap();
        assert_eq!(settings.music_root, PathBuf::from("/music"));
        assert_eq!(settings.bind_addr, format!("0.0.0.0:{}", DEFAULT_PORT));
        assert_eq!(settings.web_root, PathBuf::from("web"));
        assert_eq!(settings.traversal, Traversal::Recursive);
    }

    #[test]
    fn missing_root_is_an_error() {
        assert!(matches!(settings(&["tagshelf"]), Err(ConfigError::MissingRoot)));
    }

    #[test]
    fn flags_override_defaults() {
        let settings = settings(&[
            "tagshelf",
            "--port",
            "9000",
            "--bind",
            "127.0.0.1",
            "--web-root",
            "/srv/web",
            "--flat",
            "/music",
        ])
        .unwrap();
        assert_eq!(settings.bind_addr, "127.0.0.1:9000");
        assert_eq!(settings.web_root, PathBuf::from("/srv/web"));
        assert_eq!(settings.traversal, Traversal::Flat);
    }

    #[test]
    fn config_file_fills_gaps_and_resolves_relative_paths() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("tagshelf.yaml");
        fs::write(
            &config_path,
            "music_root: music\nport: 8080\ntraversal: flat\n",
        )
        .unwrap();
        let config_arg = config_path.to_string_lossy().into_owned();

        let settings = settings(&["tagshelf", "--config", &config_arg]).unwrap();
        assert_eq!(settings.music_root, dir.path().join("music"));
        assert_eq!(settings.web_root, dir.path().join("web"));
        assert_eq!(settings.bind_addr, "0.0.0.0:8080");
        assert_eq!(settings.traversal, Traversal::Flat);

        let settings =
            self::settings(&["tagshelf", "--config", &config_arg, "--port", "7000", "/other"])
                .unwrap();
        assert_eq!(settings.music_root, PathBuf::from("/other"));
        assert_eq!(settings.bind_addr, "0.0.0.0:7000");
    }

    #[test]
    fn invalid_config_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("bad.yaml");
        fs::write(&config_path, "port: [not, a, number]\n").unwrap();
        assert!(matches!(load_config(&config_path), Err(ConfigError::Yaml(_))));
        assert!(matches!(
            load_config(&dir.path().join("absent.yaml")),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn resolve_path_keeps_absolute_values() {
        let config_path = Path::new("/etc/tagshelf/config.yaml");
        assert_eq!(resolve_path(config_path, "/music"), PathBuf::from("/music"));
        assert_eq!(
            resolve_path(config_path, "web"),
            PathBuf::from("/etc/tagshelf/web")
        );
        assert_eq!(
            resolve_path(Path::new("config.yaml"), "web"),
            PathBuf::from("./web")
        );
    }
}
