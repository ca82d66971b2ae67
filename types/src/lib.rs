//! Shared record and display types for QueueZero
//!
//! This crate contains the serializable types that are shared between the
//! native core (queuezero-core) and any front end rendering the board,
//! including WASM builds that talk to the browser's storage directly.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Persisted Records
// ─────────────────────────────────────────────────────────────────────────────

/// A place people queue at, with every wait reported for it.
///
/// This is the only persisted entity. The serialized field set
/// (`name`, `waits`, `lastUpdated`) is the storage format and must not change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Display label and selection key. Never renamed after creation.
    pub name: String,
    /// Reported waits in minutes, oldest first. Append-only.
    pub waits: Vec<i64>,
    /// Milliseconds since the Unix epoch of the latest report (or creation).
    #[serde(rename = "lastUpdated")]
    pub last_updated: i64,
}

impl Location {
    /// Create a location with a single seed wait.
    pub fn new(name: impl Into<String>, seed_wait: i64, created_at: i64) -> Self {
        Self {
            name: name.into(),
            waits: vec![seed_wait],
            last_updated: created_at,
        }
    }

    /// Number of waits reported so far
    pub fn submissions(&self) -> usize {
        self.waits.len()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Derived Display Values
// ─────────────────────────────────────────────────────────────────────────────

/// How busy a location is, bucketed from its average wait.
///
/// Drives both the color of the average and the busy badge, so the two can
/// never disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    /// Badge text shown next to the average
    pub fn busy_label(&self) -> &'static str {
        match self {
            Severity::Low => "Quiet",
            Severity::Medium => "Moderate",
            Severity::High => "Busy",
        }
    }

    /// Text color class for the average and the badge
    pub fn color_class(&self) -> &'static str {
        match self {
            Severity::Low => "text-green-600",
            Severity::Medium => "text-yellow-500",
            Severity::High => "text-red-600",
        }
    }
}

/// Trust in an average, derived only from how many waits back it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    pub fn label(&self) -> &'static str {
        match self {
            Confidence::Low => "Low confidence",
            Confidence::Medium => "Medium confidence",
            Confidence::High => "High confidence",
        }
    }

    pub fn color_class(&self) -> &'static str {
        match self {
            Confidence::Low => "text-slate-400",
            Confidence::Medium => "text-yellow-500",
            Confidence::High => "text-green-500",
        }
    }
}

/// One rendered row of the board.
///
/// Built fresh from a [`Location`] on every render and never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationSummary {
    pub name: String,
    pub average: i64,
    pub severity: Severity,
    pub confidence: Confidence,
    pub submissions: usize,
    pub staleness: String,
}

impl LocationSummary {
    /// e.g. "12 min avg wait"
    pub fn average_text(&self) -> String {
        format!("{} min avg wait", self.average)
    }

    /// e.g. "1 submission", "4 submissions"
    pub fn submissions_text(&self) -> String {
        if self.submissions == 1 {
            "1 submission".to_string()
        } else {
            format!("{} submissions", self.submissions)
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Board Config
// ─────────────────────────────────────────────────────────────────────────────

fn default_storage_file() -> String {
    "storage.json".to_string()
}

/// User configuration, persisted separately from the board data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Directory holding the file-backed storage slot
    pub data_directory: String,
    /// File name of the key-value store inside `data_directory`
    #[serde(default = "default_storage_file")]
    pub storage_file: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            data_directory: String::new(),
            storage_file: default_storage_file(),
        }
    }
}

impl BoardConfig {
    pub fn with_data_directory(data_directory: String) -> Self {
        Self {
            data_directory,
            ..Self::default()
        }
    }
}
