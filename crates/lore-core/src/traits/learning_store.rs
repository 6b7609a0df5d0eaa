use chrono::{DateTime, Utc};

use crate::errors::LoreResult;
use crate::learning::Learning;
use crate::models::LexicalHit;

/// Persistence and lexical search for learnings.
pub trait ILearningStore: Send + Sync {
    // --- CRUD ---
    fn create(&self, learning: &Learning) -> LoreResult<()>;
    /// Returns soft-deleted rows too; callers check `is_retrievable`.
    fn get(&self, id: &str) -> LoreResult<Option<Learning>>;
    /// Missing ids are skipped. Any malformed row fails the whole call.
    fn get_bulk(&self, ids: &[String]) -> LoreResult<Vec<Learning>>;
    /// All non-deleted learnings, oldest first.
    fn list(&self) -> LoreResult<Vec<Learning>>;
    /// `NotFound` when the id does not exist.
    fn update(&self, learning: &Learning) -> LoreResult<()>;
    /// Physical delete. Edges touching the learning and its anchors go with it.
    fn remove(&self, id: &str) -> LoreResult<()>;

    // --- Lifecycle ---
    fn soft_delete(&self, id: &str) -> LoreResult<()>;
    fn set_active(&self, id: &str, active: bool) -> LoreResult<()>;
    /// Increments `usage_count` and sets `last_used_at` for every existing id.
    /// Returns the number of rows touched.
    fn record_usage(&self, ids: &[String], at: DateTime<Utc>) -> LoreResult<usize>;
    fn update_outcome(&self, id: &str, score: f64) -> LoreResult<()>;

    // --- Search ---
    /// BM25 search over active, non-deleted learnings. Rank 1 is the best hit.
    fn lexical_search(&self, query: &str, limit: usize) -> LoreResult<Vec<LexicalHit>>;
}
