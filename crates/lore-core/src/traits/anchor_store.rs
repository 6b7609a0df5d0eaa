use crate::anchor::{Anchor, AnchorStatus};
use crate::errors::LoreResult;

/// Links between learnings and file paths.
pub trait IAnchorStore: Send + Sync {
    fn create_anchor(&self, anchor: &Anchor) -> LoreResult<()>;
    fn get_anchor(&self, id: &str) -> LoreResult<Option<Anchor>>;
    /// Sets status and reason, stamping `verified_at`. `NotFound` for unknown ids.
    fn update_anchor_status(
        &self,
        id: &str,
        status: AnchorStatus,
        reason: Option<&str>,
    ) -> LoreResult<()>;
    /// Anchors with status `valid` on exactly this path.
    fn valid_anchors_for_file(&self, file_path: &str) -> LoreResult<Vec<Anchor>>;
    fn anchors_for_learning(&self, learning_id: &str) -> LoreResult<Vec<Anchor>>;
}
