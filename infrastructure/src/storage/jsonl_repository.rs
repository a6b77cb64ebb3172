//! JSONL file store for completed assessments.
//!
//! Each [`AssessmentRecord`] is serialized as one JSON line and appended to
//! the file. Reads scan the whole file; lines that fail to parse are skipped
//! with a warning.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, warn};
use triage_application::ports::assessment_repository::{
    AssessmentId, AssessmentRecord, AssessmentRepository, RepositoryError,
};

/// Append-only JSONL assessment store.
///
/// Thread-safe within one process via an internal `Mutex`.
pub struct JsonlAssessmentRepository {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonlAssessmentRepository {
    /// Create a store at `path`. The file is created on the first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// `$XDG_DATA_HOME/triage-consensus/assessments.jsonl` or the platform equivalent
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|d| d.join("triage-consensus").join("assessments.jsonl"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn guard(&self) -> Result<MutexGuard<'_, ()>, RepositoryError> {
        self.lock
            .lock()
            .map_err(|_| RepositoryError::Unavailable("store lock poisoned".to_string()))
    }

    fn read_all(&self) -> Result<Vec<AssessmentRecord>, RepositoryError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let reader = BufReader::new(File::open(&self.path)?);
        let mut records = Vec::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<AssessmentRecord>(&line) {
                Ok(record) => records.push(record),
                Err(e) => warn!(
                    "Skipping unreadable record at {}:{}: {}",
                    self.path.display(),
                    index + 1,
                    e
                ),
            }
        }
        Ok(records)
    }
}

impl AssessmentRepository for JsonlAssessmentRepository {
    fn save(&self, record: &AssessmentRecord) -> Result<(), RepositoryError> {
        let line =
            serde_json::to_string(record).map_err(|e| RepositoryError::Corrupt(e.to_string()))?;

        let _guard = self.guard()?;
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", line)?;
        file.flush()?;

        debug!(id = %record.id, path = %self.path.display(), "Appended assessment");
        Ok(())
    }

    fn find(&self, id: &AssessmentId) -> Result<Option<AssessmentRecord>, RepositoryError> {
        let _guard = self.guard()?;
        Ok(self.read_all()?.into_iter().find(|r| r.id == *id))
    }

    fn list(&self) -> Result<Vec<AssessmentRecord>, RepositoryError> {
        let _guard = self.guard()?;
        let mut records = self.read_all()?;
        records.reverse();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }

    fn clear(&self) -> Result<usize, RepositoryError> {
        let _guard = self.guard()?;
        let count = self.read_all()?.len();
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(count)
    }
}
