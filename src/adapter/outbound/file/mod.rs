//! JSON-file watch-list repository.
//!
//! The file holds a JSON array of address strings. Saves write a sibling
//! temporary file and rename it over the target, so a crash mid-write
//! leaves either the old or the new list, never a truncated one.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::TraderAddress;
use crate::error::{Error, Result};
use crate::port::WatchListRepository;

/// Watch-list persisted as a JSON array in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "watchlist".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl WatchListRepository for JsonFileRepository {
    fn load(&self) -> Result<Vec<TraderAddress>> {
        let content = fs::read_to_string(&self.path)?;
        let addresses: Vec<TraderAddress> = serde_json::from_str(&content)?;
        debug!(path = %self.path.display(), count = addresses.len(), "Watch-list file read");
        Ok(addresses)
    }

    fn save(&self, addresses: &[TraderAddress]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_vec(addresses)?;
        let temp = self.temp_path();
        let write = || -> std::io::Result<()> {
            let mut file = fs::File::create(&temp)?;
            file.write_all(&json)?;
            file.sync_all()?;
            fs::rename(&temp, &self.path)
        };

        write().map_err(|e| {
            let _ = fs::remove_file(&temp);
            Error::Storage(format!("failed to write {}: {e}", self.path.display()))
        })?;

        debug!(path = %self.path.display(), count = addresses.len(), "Watch-list file written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(raw: &str) -> TraderAddress {
        TraderAddress::parse(raw).unwrap()
    }

    #[test]
    fn save_then_load_returns_same_list() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileRepository::new(dir.path().join("traders.json"));
        let addresses = vec![addr("0xb"), addr("0xa")];

        repo.save(&addresses).unwrap();

        assert_eq!(repo.load().unwrap(), addresses);
    }

    #[test]
    fn save_writes_plain_json_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("traders.json");
        let repo = JsonFileRepository::new(&path);

        repo.save(&[addr("0xABC")]).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), r#"["0xabc"]"#);
        assert!(!repo.temp_path().exists());
    }

    #[test]
    fn load_accepts_mixed_case_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("traders.json");
        fs::write(&path, r#"["0xAbC", "0xdef"]"#).unwrap();

        let loaded = JsonFileRepository::new(&path).load().unwrap();
        assert_eq!(loaded, vec![addr("0xabc"), addr("0xdef")]);
    }

    #[test]
    fn load_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileRepository::new(dir.path().join("absent.json"));
        assert!(matches!(repo.load(), Err(Error::Io(_))));
    }

    #[test]
    fn load_malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("traders.json");
        fs::write(&path, "{not json").unwrap();

        assert!(matches!(
            JsonFileRepository::new(&path).load(),
            Err(Error::Json(_))
        ));
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/state/traders.json");
        let repo = JsonFileRepository::new(&path);

        repo.save(&[addr("0xa")]).unwrap();
        assert!(path.exists());
    }
}
