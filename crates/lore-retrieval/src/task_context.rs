//! Context for a task: query search merged with file-anchored learnings.

use std::collections::HashSet;
use std::time::Instant;

use chrono::Utc;
use lore_core::constants::MAX_USAGE_BATCH_SIZE;
use lore_core::errors::LoreResult;
use lore_core::models::{SearchResult, TaskContext, TaskContextResult};
use lore_observability::expansion_span;
use tracing::{debug, info};

use crate::engine::{sort_by_relevance, RetrievalEngine};
use crate::options::SearchOptions;

impl RetrievalEngine<'_> {
    /// Learnings relevant to `task`, and mark each returned learning as used.
    ///
    /// The query comes from the task title and description. When the task
    /// names files, learnings anchored to them (and to files reachable over
    /// file edges) are merged in. A task with neither text nor files yields
    /// an empty result and records nothing.
    pub fn context_for_task(
        &self,
        task: &TaskContext,
        options: &SearchOptions,
    ) -> LoreResult<TaskContextResult> {
        options.validate()?;
        let file_options = &options.graph_expansion.options;
        if !task.files.is_empty() {
            file_options.validate()?;
        }

        let start = Instant::now();
        let query = task.query();
        let (mut learnings, trace) = self.search_validated(&query, options)?;
        self.observe(&query, start, &learnings, trace);

        let mut file_stats = None;
        if !task.files.is_empty() {
            let expansion = {
                let _span = expansion_span!(task.files.len(), file_options.depth).entered();
                self.expansion_engine()
                    .expand_from_files(&task.files, file_options)?
            };

            let now = Utc::now();
            let mut present: HashSet<String> = learnings.iter().map(|r| r.id.clone()).collect();
            for node in expansion.all {
                if !present.insert(node.id().to_string()) {
                    continue;
                }
                let boost = self.weights.boost(&node.learning, now);
                let mut result = SearchResult::expanded(node.learning, node.decayed_score, node.hops);
                result.relevance_score += boost;
                learnings.push(result);
            }
            file_stats = Some(expansion.stats);

            sort_by_relevance(&mut learnings);
            if let Some(min_score) = options.min_score {
                learnings.retain(|r| r.relevance_score >= min_score);
            }
            learnings.truncate(options.limit);
        }

        let used = self.record_usage(&learnings)?;
        info!(
            task_id = task.task_id.as_deref().unwrap_or(""),
            learnings = learnings.len(),
            used,
            "task context assembled"
        );

        Ok(TaskContextResult {
            task_id: task.task_id.clone(),
            query,
            learnings,
            file_stats,
        })
    }

    fn record_usage(&self, results: &[SearchResult]) -> LoreResult<usize> {
        if results.is_empty() {
            return Ok(0);
        }
        let ids: Vec<String> = results.iter().map(|r| r.id.clone()).collect();
        let now = Utc::now();
        let mut updated = 0;
        for chunk in ids.chunks(MAX_USAGE_BATCH_SIZE) {
            updated += self.learnings.record_usage(chunk, now)?;
        }
        debug!(requested = ids.len(), updated, "usage recorded");
        Ok(updated)
    }
}
