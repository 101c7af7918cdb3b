use crate::consts;
use log::{debug, warn};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Where the high score lives between sessions.
///
/// Storage failures never reach the game: `load()` falls back to 0 and a
/// failed `save()` is only logged.
pub(crate) trait HighScoreStore {
    fn load(&self) -> u32;
    fn save(&mut self, score: u32);
}

/// A [`HighScoreStore`] that keeps the score as a base-10 integer in a file
/// named after [`HIGH_SCORE_KEY`][consts::HIGH_SCORE_KEY]
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct FileStore {
    /// `None` if no location could be determined, in which case nothing is
    /// ever persisted
    path: Option<PathBuf>,
}

impl FileStore {
    pub(crate) fn new(path: Option<PathBuf>) -> FileStore {
        FileStore { path }
    }

    /// Return the default path to the high score file, inside the local data
    /// directory
    pub(crate) fn default_path() -> Option<PathBuf> {
        dirs::data_local_dir().map(|p| p.join("gridsnake").join(consts::HIGH_SCORE_KEY))
    }

    fn path(&self) -> Result<&Path, StoreErrorSource> {
        self.path.as_deref().ok_or(StoreErrorSource::NoPath)
    }

    fn try_load(&self) -> Result<u32, LoadError> {
        let path = self.path().map_err(LoadError)?;
        let src = match fs_err::read_to_string(path) {
            Ok(src) => src,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(LoadError(StoreErrorSource::Io(e))),
        };
        src.trim()
            .parse::<u32>()
            .map_err(|e| LoadError(StoreErrorSource::Parse(e)))
    }

    fn try_save(&self, score: u32) -> Result<(), SaveError> {
        let path = self.path().map_err(SaveError)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs_err::create_dir_all(parent).map_err(|e| SaveError(StoreErrorSource::Io(e)))?;
        }
        fs_err::write(path, score.to_string()).map_err(|e| SaveError(StoreErrorSource::Io(e)))
    }
}

impl HighScoreStore for FileStore {
    fn load(&self) -> u32 {
        match self.try_load() {
            Ok(score) => {
                debug!("Loaded high score {score}");
                score
            }
            Err(e) => {
                warn!("{e}: {}; starting from 0", e.0);
                0
            }
        }
    }

    fn save(&mut self, score: u32) {
        match self.try_save(score) {
            Ok(()) => debug!("Saved high score {score}"),
            Err(e) => warn!("{e}: {}", e.0),
        }
    }
}

/// In-memory store that records how often it was written to
#[cfg(test)]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct MemoryStore {
    pub(crate) value: u32,
    pub(crate) saves: usize,
}

#[cfg(test)]
impl HighScoreStore for MemoryStore {
    fn load(&self) -> u32 {
        self.value
    }

    fn save(&mut self, score: u32) {
        self.value = score;
        self.saves += 1;
    }
}

#[derive(Debug, Error)]
#[error("Failed to read high score")]
pub(crate) struct LoadError(#[source] StoreErrorSource);

#[derive(Debug, Error)]
#[error("Failed to save high score")]
pub(crate) struct SaveError(#[source] StoreErrorSource);

#[derive(Debug, Error)]
enum StoreErrorSource {
    #[error("failed to determine path to local data directory")]
    NoPath,
    #[error("I/O error")]
    Io(#[source] std::io::Error),
    #[error("stored value is not a valid score")]
    Parse(#[source] std::num::ParseIntError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_loads_as_zero() {
        let tmp = tempdir().unwrap();
        let store = FileStore::new(Some(tmp.path().join(consts::HIGH_SCORE_KEY)));
        assert_eq!(store.load(), 0);
    }

    #[test]
    fn save_then_load() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("nested").join(consts::HIGH_SCORE_KEY);
        let mut store = FileStore::new(Some(path.clone()));
        store.save(120);
        assert_eq!(fs_err::read_to_string(&path).unwrap(), "120");
        assert_eq!(store.load(), 120);
        store.save(250);
        assert_eq!(FileStore::new(Some(path)).load(), 250);
    }

    #[test]
    fn garbage_loads_as_zero() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join(consts::HIGH_SCORE_KEY);
        fs_err::write(&path, "not a number").unwrap();
        let store = FileStore::new(Some(path));
        assert!(store.try_load().is_err());
        assert_eq!(store.load(), 0);
    }

    #[test]
    fn surrounding_whitespace_is_tolerated() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join(consts::HIGH_SCORE_KEY);
        fs_err::write(&path, " 40\n").unwrap();
        assert_eq!(FileStore::new(Some(path)).load(), 40);
    }

    #[test]
    fn no_path() {
        let mut store = FileStore::new(None);
        assert_eq!(store.load(), 0);
        store.save(10);
        assert!(store.try_save(10).is_err());
        assert_eq!(store.load(), 0);
    }
}
