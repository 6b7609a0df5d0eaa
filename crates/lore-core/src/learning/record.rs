use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::source_type::SourceType;

/// A short textual fact the system can recall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Learning {
    /// Stable identifier (UUID v4 unless the caller supplies one).
    pub id: String,
    pub content: String,
    pub category: Option<String>,
    pub source_type: SourceType,
    /// Free-form reference to the origin (run id, file, transcript).
    pub source_ref: Option<String>,
    /// Deduplicated, order-preserving keyword list.
    pub keywords: Vec<String>,
    /// Times this learning was returned by a task-context retrieval. Never decreases.
    #[ts(type = "number")]
    pub usage_count: u64,
    pub last_used_at: Option<DateTime<Utc>>,
    /// Observed usefulness in [0.0, 1.0], if any outcome was reported.
    pub outcome_score: Option<f64>,
    pub active: bool,
    /// Soft-delete flag.
    pub deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Learning {
    /// Create a manual, active learning with a fresh id.
    pub fn new(content: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            content: content.into(),
            category: None,
            source_type: SourceType::Manual,
            source_ref: None,
            keywords: Vec::new(),
            usage_count: 0,
            last_used_at: None,
            outcome_score: None,
            active: true,
            deleted: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_source_type(mut self, source_type: SourceType) -> Self {
        self.source_type = source_type;
        self
    }

    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out: Vec<String> = Vec::new();
        for k in keywords {
            let k = k.into();
            if !k.is_empty() && !out.contains(&k) {
                out.push(k);
            }
        }
        self.keywords = out;
        self
    }

    /// Whether this learning may appear in results or be traversed.
    pub fn is_retrievable(&self) -> bool {
        self.active && !self.deleted
    }

    /// The instant recency is measured from: last use, falling back to creation.
    pub fn recency_anchor(&self) -> DateTime<Utc> {
        self.last_used_at.unwrap_or(self.created_at)
    }

    /// blake3 hash of the content, used to deduplicate embeddings.
    pub fn content_hash(&self) -> String {
        compute_content_hash(&self.content)
    }
}

/// blake3 hex digest of a text.
pub fn compute_content_hash(text: &str) -> String {
    blake3::hash(text.as_bytes()).to_hex().to_string()
}
