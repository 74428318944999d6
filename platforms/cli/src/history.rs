//! Run-history persistence: one JSON record per line, appended after each
//! completed run. The core machine knows nothing about this file; records
//! are built from the observation interface alone.

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// The outcome of one completed run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunRecord {
    pub word: String,
    pub is_palindrome: bool,
    pub steps: usize,
    pub created_at: DateTime<Utc>,
}

impl RunRecord {
    pub fn new(word: &str, is_palindrome: bool, steps: usize) -> Self {
        Self {
            word: word.to_string(),
            is_palindrome,
            steps,
            created_at: Utc::now(),
        }
    }
}

/// An append-only store of [`RunRecord`]s backed by a JSON-lines file.
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Appends one record, creating the file if it does not exist yet.
    pub fn append(&self, record: &RunRecord) -> anyhow::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("failed to open history file {}", self.path.display()))?;

        let line = serde_json::to_string(record).context("failed to serialize run record")?;
        writeln!(file, "{}", line)
            .with_context(|| format!("failed to write to {}", self.path.display()))?;

        tracing::debug!(word = %record.word, steps = record.steps, "recorded run");
        Ok(())
    }

    /// Returns up to `limit` records, newest first. A missing history file
    /// yields an empty list. Lines that fail to parse are skipped.
    pub fn recent(&self, limit: usize) -> anyhow::Result<Vec<RunRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read history file {}", self.path.display()))?;

        let mut records: Vec<RunRecord> = content
            .lines()
            .filter_map(|line| serde_json::from_str(line).ok())
            .collect();

        records.reverse();
        records.truncate(limit);
        Ok(records)
    }
}
