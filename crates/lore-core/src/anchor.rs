//! Anchors: recorded associations between a learning and a file path.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// How an anchor addresses its file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum AnchorType {
    #[default]
    File,
    Glob,
    Symbol,
    LineRange,
}

impl AnchorType {
    pub const ALL: [AnchorType; 4] = [Self::File, Self::Glob, Self::Symbol, Self::LineRange];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Glob => "glob",
            Self::Symbol => "symbol",
            Self::LineRange => "line_range",
        }
    }
}

impl FromStr for AnchorType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown anchor type: {s}"))
    }
}

/// Validity of an anchor. Only `Valid` anchors seed file-based expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum AnchorStatus {
    #[default]
    Valid,
    Invalid,
    /// The anchored code changed since the anchor was verified.
    Drifted,
}

impl AnchorStatus {
    pub const ALL: [AnchorStatus; 3] = [Self::Valid, Self::Invalid, Self::Drifted];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Valid => "valid",
            Self::Invalid => "invalid",
            Self::Drifted => "drifted",
        }
    }
}

impl fmt::Display for AnchorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnchorStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown anchor status: {s}"))
    }
}

/// A learning anchored to a file path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Anchor {
    pub id: String,
    pub learning_id: String,
    pub file_path: String,
    pub anchor_type: AnchorType,
    /// Symbol name, glob or line range, depending on `anchor_type`.
    pub anchor_value: Option<String>,
    pub status: AnchorStatus,
    /// Why the status last changed.
    pub status_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub verified_at: Option<DateTime<Utc>>,
}

impl Anchor {
    pub fn new(learning_id: impl Into<String>, file_path: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            learning_id: learning_id.into(),
            file_path: file_path.into(),
            anchor_type: AnchorType::File,
            anchor_value: None,
            status: AnchorStatus::Valid,
            status_reason: None,
            created_at: Utc::now(),
            verified_at: None,
        }
    }

    pub fn with_type(mut self, anchor_type: AnchorType, value: Option<String>) -> Self {
        self.anchor_type = anchor_type;
        self.anchor_value = value;
        self
    }

    pub fn with_status(mut self, status: AnchorStatus) -> Self {
        self.status = status;
        self
    }

    pub fn is_valid(&self) -> bool {
        self.status == AnchorStatus::Valid
    }
}
