//! Append-only audit trail (§4.5): one JSON-lines file per UTC calendar
//! day, sensitive values redacted before they ever touch disk. Write
//! failures never propagate — audit logging must not be able to break a
//! call it's merely observing.

mod config;
mod redact;

pub use config::AuditConfig;
pub use redact::redact_sensitive;

use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use chrono::{NaiveDate, Utc};
use serde_json::Value;

use kernel_types::{AuditAction, AuditEntry};

/// Assemble an `AuditEntry` with the current UTC timestamp filled in
/// (`buildEntry`, §4.5).
#[allow(clippy::too_many_arguments)]
pub fn build_entry(
    tool: impl Into<String>,
    action: AuditAction,
    parameters: BTreeMap<String, Value>,
    user_id: impl Into<String>,
    session_id: impl Into<String>,
    role: impl Into<String>,
    success: Option<bool>,
    duration_ms: Option<u64>,
) -> AuditEntry {
    AuditEntry {
        tool: tool.into(),
        action,
        parameters,
        user_id: user_id.into(),
        session_id: session_id.into(),
        role: role.into(),
        timestamp: Utc::now().to_rfc3339(),
        success,
        duration_ms,
        error_type: None,
    }
}

/// Writer/reader for the append-only audit trail.
#[derive(Debug, Clone)]
pub struct AuditLog {
    config: AuditConfig,
}

impl AuditLog {
    pub fn new(config: AuditConfig) -> Self {
        Self { config }
    }

    pub fn from_env() -> Self {
        Self::new(AuditConfig::from_env())
    }

    pub fn log_request(&self, entry: &AuditEntry) {
        self.write_entry(entry);
    }

    pub fn log_response(&self, entry: &AuditEntry) {
        self.write_entry(entry);
    }

    pub fn log_error(&self, entry: &AuditEntry) {
        self.write_entry(entry);
    }

    pub fn log_denial(&self, entry: &AuditEntry) {
        self.write_entry(entry);
    }

    /// Read back every entry logged on `date` (UTC), or today's if `None`.
    /// Returns an empty list when disabled, on a missing file, or on any
    /// read/parse failure — this path exists for tests, not for recovery.
    pub fn get_entries(&self, date: Option<NaiveDate>) -> Vec<AuditEntry> {
        if !self.config.enabled {
            return Vec::new();
        }
        let path = self.file_path(date.unwrap_or_else(|| Utc::now().date_naive()));
        let Ok(contents) = fs::read_to_string(&path) else {
            return Vec::new();
        };
        contents
            .lines()
            .filter(|line| !line.trim().is_empty())
            .filter_map(|line| serde_json::from_str(line).ok())
            .collect()
    }

    fn file_path(&self, date: NaiveDate) -> PathBuf {
        self.config.path.join(format!("{}.jsonl", date.format("%Y-%m-%d")))
    }

    fn write_entry(&self, entry: &AuditEntry) {
        if !self.config.enabled {
            return;
        }
        let _ = self.try_write_entry(entry);
    }

    fn try_write_entry(&self, entry: &AuditEntry) -> std::io::Result<()> {
        let redacted = redact_entry(entry);
        let line = serde_json::to_string(&redacted)?;

        fs::create_dir_all(&self.config.path)?;
        let path = self.file_path(Utc::now().date_naive());
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        writeln!(file, "{line}")
    }
}

fn redact_entry(entry: &AuditEntry) -> AuditEntry {
    let mut redacted = entry.clone();
    redacted.parameters = redacted
        .parameters
        .into_iter()
        .map(|(k, v)| (k, redact_sensitive(&v)))
        .collect();
    redacted
}
