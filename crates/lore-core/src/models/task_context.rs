use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::expansion::FileExpansionStats;
use super::search::SearchResult;

/// The slice of a task that retrieval needs. Task bookkeeping lives elsewhere.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaskContext {
    pub task_id: Option<String>,
    pub title: String,
    pub description: String,
    /// Files the task is expected to touch.
    pub files: Vec<String>,
}

impl TaskContext {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            task_id: None,
            title: title.into(),
            description: description.into(),
            files: Vec::new(),
        }
    }

    pub fn with_files<I, S>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.files = files.into_iter().map(Into::into).collect();
        self
    }

    /// Query text used for retrieval: title and description joined.
    pub fn query(&self) -> String {
        let title = self.title.trim();
        let description = self.description.trim();
        match (title.is_empty(), description.is_empty()) {
            (false, false) => format!("{title} {description}"),
            (false, true) => title.to_string(),
            (true, false) => description.to_string(),
            (true, true) => String::new(),
        }
    }
}

/// Learnings retrieved for a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaskContextResult {
    pub task_id: Option<String>,
    pub query: String,
    pub learnings: Vec<SearchResult>,
    /// Present when the task named files.
    pub file_stats: Option<FileExpansionStats>,
}
