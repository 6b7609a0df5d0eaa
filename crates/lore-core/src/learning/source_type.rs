use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Where a learning came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    /// Written explicitly by a person or agent.
    #[default]
    Manual,
    /// Produced from other learnings.
    Derived,
    /// Extracted while compacting a conversation transcript.
    Compaction,
    /// Captured from the output of an automation run.
    Run,
    /// Imported from a project instruction file.
    ClaudeMd,
}

impl SourceType {
    pub const ALL: [SourceType; 5] = [
        Self::Manual,
        Self::Derived,
        Self::Compaction,
        Self::Run,
        Self::ClaudeMd,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::Derived => "derived",
            Self::Compaction => "compaction",
            Self::Run => "run",
            Self::ClaudeMd => "claude_md",
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown source type: {s}"))
    }
}
