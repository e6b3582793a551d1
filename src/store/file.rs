use super::render::{parse_table, render_table};
use crate::core::error::StoreError;
use crate::core::ranking::{RankingTable, TableStore};
use chrono::Utc;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Ranking table persisted as a standalone HTML file.
pub struct FileTableStore {
    path: PathBuf,
}

impl FileTableStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn directory(&self) -> &Path {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        }
    }
}

impl TableStore for FileTableStore {
    fn load(&self) -> Result<Option<RankingTable>, StoreError> {
        let html = match fs::read_to_string(&self.path) {
            Ok(html) => html,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No existing ranking table");
                return Ok(None);
            }
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };
        parse_table(&html, &self.location()).map(Some)
    }

    /// Writes to a temporary file beside the target, then renames it over
    /// the target. The temporary file is removed if anything fails first.
    fn save(&self, table: &RankingTable) -> Result<(), StoreError> {
        let dir = self.directory();
        fs::create_dir_all(dir).map_err(|e| StoreError::io(dir, e))?;

        let html = render_table(table, Utc::now())?;
        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| StoreError::io(dir, e))?;
        tmp.write_all(html.as_bytes())
            .and_then(|_| tmp.flush())
            .and_then(|_| tmp.as_file().sync_all())
            .map_err(|e| StoreError::io(tmp.path(), e))?;
        tmp.persist(&self.path)
            .map_err(|e| StoreError::io(&self.path, e.error))?;

        debug!(path = %self.path.display(), rows = table.len(), "Ranking table written");
        Ok(())
    }

    fn reset(&self) -> Result<bool, StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                info!(path = %self.path.display(), "Removed existing ranking table");
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StoreError::io(&self.path, e)),
        }
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
