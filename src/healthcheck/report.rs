//! Healthcheck artifacts: the append-only text log and the JSON report.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::error::AppError;

/// Outcome of one checked condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CheckStatus {
    Pass,
    Fail,
}

impl std::fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pass => f.write_str("PASS"),
            Self::Fail => f.write_str("FAIL"),
        }
    }
}

/// Accumulated check outcomes, serialized as a flat JSON object mapping each
/// condition to `"PASS"`/`"FAIL"` plus a terminal `_summary` field.
#[derive(Debug, Default)]
pub struct Report {
    entries: Vec<(String, CheckStatus)>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, condition: impl Into<String>, status: CheckStatus) {
        self.entries.push((condition.into(), status));
    }

    pub fn status_of(&self, condition: &str) -> Option<CheckStatus> {
        self.entries
            .iter()
            .find(|(name, _)| name == condition)
            .map(|(_, status)| *status)
    }

    pub fn passed(&self) -> usize {
        self.entries
            .iter()
            .filter(|(_, status)| *status == CheckStatus::Pass)
            .count()
    }

    pub fn total(&self) -> usize {
        self.entries.len()
    }

    pub fn all_passed(&self) -> bool {
        self.passed() == self.total()
    }

    pub fn summary(&self) -> String {
        format!("{}/{} checks passed", self.passed(), self.total())
    }

    /// Flat JSON object in recording order with `_summary` last.
    pub fn to_json(&self) -> serde_json::Value {
        let mut map = serde_json::Map::new();
        for (condition, status) in &self.entries {
            map.insert(
                condition.clone(),
                serde_json::Value::String(status.to_string()),
            );
        }
        map.insert(
            "_summary".to_string(),
            serde_json::Value::String(self.summary()),
        );
        serde_json::Value::Object(map)
    }

    /// Writes the JSON report, replacing any previous run's report.
    pub fn write_to(&self, path: &Path) -> Result<(), AppError> {
        let mut file = File::create(path)?;
        serde_json::to_writer_pretty(&mut file, &self.to_json())
            .map_err(|e| AppError::Io(e.into()))?;
        file.write_all(b"\n")?;
        Ok(())
    }
}

/// Append-only human-readable log.
///
/// Each run appends to the same file; nothing is ever truncated.
pub struct HealthLog {
    file: File,
}

impl HealthLog {
    pub fn open(path: &Path) -> Result<Self, AppError> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self { file })
    }

    fn timestamp() -> String {
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
    }

    /// One header line marking the start of a stage.
    pub fn header(&mut self, title: &str) -> Result<(), AppError> {
        writeln!(self.file, "=== [{}] {} ===", Self::timestamp(), title)?;
        Ok(())
    }

    pub fn line(&mut self, message: &str) -> Result<(), AppError> {
        writeln!(self.file, "[{}] {}", Self::timestamp(), message)?;
        Ok(())
    }

    /// Verbatim block, used for dumped service logs.
    pub fn block(&mut self, content: &str) -> Result<(), AppError> {
        for line in content.lines() {
            writeln!(self.file, "    {}", line)?;
        }
        Ok(())
    }
}
