//! CSV conversation log.
//!
//! One row per turn under a `User Input,Chatbot Response` header. The log
//! sits outside the matching path; front ends write to it after responding.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{BiofeastError, Result};

const HEADER: [&str; 2] = ["User Input", "Chatbot Response"];

/// One logged exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    /// What the user typed.
    pub user_input: String,
    /// What the responder answered.
    pub response: String,
}

/// Append-only conversation log backed by a CSV file.
#[derive(Debug, Clone)]
pub struct ChatLog {
    path: PathBuf,
}

impl ChatLog {
    /// Refers to a log without touching the filesystem.
    ///
    /// Enough for [`history`](Self::history); writers should [`open`](Self::open).
    pub fn at<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Opens the log, creating it with a header row if it does not exist.
    pub fn open<P: Into<PathBuf>>(path: P) -> Result<Self> {
        let log = Self::at(path);
        if !log.path.exists() {
            if let Some(parent) = log.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(|e| log.error(e))?;
            }
            let mut writer = csv::Writer::from_path(&log.path).map_err(|e| log.error(e))?;
            writer.write_record(HEADER).map_err(|e| log.error(e))?;
            writer.flush().map_err(|e| log.error(e))?;
            tracing::info!(path = %log.path.display(), "Created chat log");
        }
        Ok(log)
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one turn.
    pub fn append(&self, user_input: &str, response: &str) -> Result<()> {
        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)
            .map_err(|e| self.error(e))?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        writer
            .write_record([user_input, response])
            .map_err(|e| self.error(e))?;
        writer.flush().map_err(|e| self.error(e))?;
        Ok(())
    }

    /// Every logged turn in order. A missing file is an empty history.
    pub fn history(&self) -> Result<Vec<ChatTurn>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(&self.path)
            .map_err(|e| self.error(e))?;

        let mut turns = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| self.error(e))?;
            turns.push(ChatTurn {
                user_input: record.get(0).unwrap_or_default().to_string(),
                response: record.get(1).unwrap_or_default().to_string(),
            });
        }
        Ok(turns)
    }

    fn error(&self, err: impl std::fmt::Display) -> BiofeastError {
        BiofeastError::chat_log(self.path.display().to_string(), err.to_string())
    }
}
