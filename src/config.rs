use crate::highscore::FileStore;
use crate::settings::GameSettings;
use log::LevelFilter;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Program configuration read from a configuration file
#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct Config {
    /// Game settings preselected in the main menu
    pub(crate) settings: GameSettings,

    /// Settings about data files
    pub(crate) files: FileConfig,

    pub(crate) logging: LoggingConfig,
}

impl Config {
    /// Return the default configuration file path
    pub(crate) fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join("gridsnake").join("config.toml"))
            .ok_or(ConfigError::NoPath)
    }

    /// Read configuration from a file on disk.  If the file does not exist and
    /// `allow_missing` is true, a default `Config` value is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read or if the file's contents
    /// could not be deserialized.
    pub(crate) fn load(path: &Path, allow_missing: bool) -> Result<Config, ConfigError> {
        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
                return Ok(Config::default())
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        toml::from_str(&content).map_err(Into::into)
    }

    /// The file in which the high score is kept: the one given in the
    /// configuration, or else the default location.  `None` if neither is
    /// available.
    pub(crate) fn high_score_path(&self) -> Option<PathBuf> {
        self.files
            .high_score_file
            .clone()
            .or_else(FileStore::default_path)
    }

    /// The file to log to, if any
    pub(crate) fn log_path(&self) -> Option<PathBuf> {
        self.files.log_file.clone().or_else(|| {
            dirs::data_local_dir().map(|p| p.join("gridsnake").join("gridsnake.log"))
        })
    }
}

#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct FileConfig {
    /// Path at which the high score is stored
    pub(crate) high_score_file: Option<PathBuf>,

    /// Path to write log messages to
    pub(crate) log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct LoggingConfig {
    pub(crate) level: LevelFilter,
}

impl Default for LoggingConfig {
    fn default() -> LoggingConfig {
        LoggingConfig {
            level: LevelFilter::Info,
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to determine path to local configuration directory")]
    NoPath,
    #[error("failed to read configuration file")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{GridSize, Speed};
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn load_str(src: &str) -> Result<Config, ConfigError> {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(src.as_bytes()).unwrap();
        file.flush().unwrap();
        Config::load(file.path(), false)
    }

    #[test]
    fn empty_file() {
        assert_eq!(load_str("").unwrap(), Config::default());
    }

    #[test]
    fn full_file() {
        let cfg = load_str(concat!(
            "[settings]\n",
            "speed = 150\n",
            "grid-size = 12\n",
            "borderless = true\n",
            "sound = false\n",
            "\n",
            "[files]\n",
            "high-score-file = \"/var/games/snakeHighScore\"\n",
            "log-file = \"/tmp/gridsnake.log\"\n",
            "\n",
            "[logging]\n",
            "level = \"debug\"\n",
        ))
        .unwrap();
        assert_eq!(
            cfg,
            Config {
                settings: GameSettings {
                    speed: Speed::from(150),
                    grid_size: GridSize::from(12),
                    borderless: true,
                    sound: false,
                },
                files: FileConfig {
                    high_score_file: Some(PathBuf::from("/var/games/snakeHighScore")),
                    log_file: Some(PathBuf::from("/tmp/gridsnake.log")),
                },
                logging: LoggingConfig {
                    level: LevelFilter::Debug,
                },
            }
        );
        assert_eq!(
            cfg.high_score_path(),
            Some(PathBuf::from("/var/games/snakeHighScore"))
        );
        assert_eq!(cfg.log_path(), Some(PathBuf::from("/tmp/gridsnake.log")));
    }

    #[test]
    fn partial_settings() {
        let cfg = load_str("[settings]\nborderless = true\n").unwrap();
        assert_eq!(
            cfg.settings,
            GameSettings {
                borderless: true,
                ..GameSettings::default()
            }
        );
        assert_eq!(cfg.logging.level, LevelFilter::Info);
    }

    #[test]
    fn out_of_range_settings_are_clamped() {
        let cfg = load_str("[settings]\nspeed = 5\ngrid-size = 500\n").unwrap();
        assert_eq!(cfg.settings.speed, Speed::from(50));
        assert_eq!(cfg.settings.grid_size, GridSize::from(20));
    }

    #[test]
    fn bad_toml() {
        assert!(matches!(
            load_str("[settings\n"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn bad_level() {
        assert!(matches!(
            load_str("[logging]\nlevel = \"loud\"\n"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn missing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        assert_eq!(Config::load(&path, true).unwrap(), Config::default());
        assert!(matches!(
            Config::load(&path, false),
            Err(ConfigError::Read(_))
        ));
    }
}
