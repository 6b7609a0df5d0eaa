//! StorageEngine: owns the connection pool and implements every store trait.

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::Connection;

use lore_core::anchor::{Anchor, AnchorStatus};
use lore_core::config::StorageConfig;
use lore_core::errors::LoreResult;
use lore_core::graph::{Direction, Edge, EdgeFilter, NodeRef};
use lore_core::learning::Learning;
use lore_core::models::LexicalHit;
use lore_core::traits::{IAnchorStore, IEdgeStore, ILearningStore, IVectorStore};

use crate::migrations;
use crate::pool::{pragmas, ConnectionPool};
use crate::queries::{anchor_ops, edge_ops, learning_crud, learning_search, vector_search};

/// The main storage engine.
pub struct StorageEngine {
    pool: ConnectionPool,
}

impl StorageEngine {
    /// Open a file-backed engine with default settings.
    pub fn open(path: &Path) -> LoreResult<Self> {
        Self::open_with_config(path, &StorageConfig::default())
    }

    /// Open a file-backed engine. Reads use the pooled read-only connections.
    pub fn open_with_config(path: &Path, config: &StorageConfig) -> LoreResult<Self> {
        let pool = ConnectionPool::open(path, config)?;
        pool.writer.with_conn_sync(migrations::run_migrations)?;
        tracing::info!(path = %path.display(), readers = config.read_pool_size, "storage opened");
        Ok(Self { pool })
    }

    /// Open an in-memory engine. All reads are routed through the writer
    /// because extra in-memory connections would be separate databases.
    pub fn open_in_memory() -> LoreResult<Self> {
        let pool = ConnectionPool::open_in_memory(&StorageConfig::default())?;
        pool.writer.with_conn_sync(migrations::run_migrations)?;
        Ok(Self { pool })
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }

    /// Current schema version.
    pub fn schema_version(&self) -> LoreResult<u32> {
        self.with_reader(migrations::current_version)
    }

    /// Whether the writer runs in WAL mode.
    pub fn is_wal(&self) -> LoreResult<bool> {
        self.pool.writer.with_conn_sync(pragmas::verify_wal_mode)
    }

    /// Execute a read-only query on the best available connection.
    fn with_reader<F, T>(&self, f: F) -> LoreResult<T>
    where
        F: FnOnce(&Connection) -> LoreResult<T>,
    {
        match &self.pool.readers {
            Some(readers) => readers.with_conn(f),
            None => self.pool.writer.with_conn_sync(f),
        }
    }

    fn with_writer<F, T>(&self, f: F) -> LoreResult<T>
    where
        F: FnOnce(&Connection) -> LoreResult<T>,
    {
        self.pool.writer.with_conn_sync(f)
    }
}

impl ILearningStore for StorageEngine {
    fn create(&self, learning: &Learning) -> LoreResult<()> {
        self.with_writer(|conn| learning_crud::insert_learning(conn, learning))?;
        tracing::debug!(learning_id = %learning.id, "learning created");
        Ok(())
    }

    fn get(&self, id: &str) -> LoreResult<Option<Learning>> {
        self.with_reader(|conn| learning_crud::get_learning(conn, id))
    }

    fn get_bulk(&self, ids: &[String]) -> LoreResult<Vec<Learning>> {
        self.with_reader(|conn| learning_crud::get_learnings_bulk(conn, ids))
    }

    fn list(&self) -> LoreResult<Vec<Learning>> {
        self.with_reader(learning_crud::list_learnings)
    }

    fn update(&self, learning: &Learning) -> LoreResult<()> {
        self.with_writer(|conn| learning_crud::update_learning(conn, learning))
    }

    fn remove(&self, id: &str) -> LoreResult<()> {
        self.with_writer(|conn| learning_crud::remove_learning(conn, id))?;
        tracing::debug!(learning_id = %id, "learning removed");
        Ok(())
    }

    fn soft_delete(&self, id: &str) -> LoreResult<()> {
        self.with_writer(|conn| learning_crud::soft_delete(conn, id))
    }

    fn set_active(&self, id: &str, active: bool) -> LoreResult<()> {
        self.with_writer(|conn| learning_crud::set_active(conn, id, active))
    }

    fn record_usage(&self, ids: &[String], at: DateTime<Utc>) -> LoreResult<usize> {
        let touched = self.with_writer(|conn| learning_crud::record_usage(conn, ids, at))?;
        tracing::debug!(requested = ids.len(), touched, "usage recorded");
        Ok(touched)
    }

    fn update_outcome(&self, id: &str, score: f64) -> LoreResult<()> {
        self.with_writer(|conn| learning_crud::update_outcome(conn, id, score))
    }

    fn lexical_search(&self, query: &str, limit: usize) -> LoreResult<Vec<LexicalHit>> {
        self.with_reader(|conn| learning_search::lexical_search(conn, query, limit))
    }
}

impl IEdgeStore for StorageEngine {
    fn create_edge(&self, edge: &Edge) -> LoreResult<()> {
        self.with_writer(|conn| edge_ops::insert_edge(conn, edge))
    }

    fn get_edge(&self, id: &str) -> LoreResult<Option<Edge>> {
        self.with_reader(|conn| edge_ops::get_edge(conn, id))
    }

    fn edges_from(
        &self,
        node: &NodeRef,
        direction: Direction,
        filter: &EdgeFilter,
    ) -> LoreResult<Vec<Edge>> {
        self.with_reader(|conn| edge_ops::edges_from(conn, node, direction, filter))
    }

    fn edge_count(&self) -> LoreResult<usize> {
        self.with_reader(edge_ops::edge_count)
    }
}

impl IAnchorStore for StorageEngine {
    fn create_anchor(&self, anchor: &Anchor) -> LoreResult<()> {
        self.with_writer(|conn| anchor_ops::insert_anchor(conn, anchor))
    }

    fn get_anchor(&self, id: &str) -> LoreResult<Option<Anchor>> {
        self.with_reader(|conn| anchor_ops::get_anchor(conn, id))
    }

    fn update_anchor_status(
        &self,
        id: &str,
        status: AnchorStatus,
        reason: Option<&str>,
    ) -> LoreResult<()> {
        self.with_writer(|conn| anchor_ops::update_anchor_status(conn, id, status, reason))
    }

    fn valid_anchors_for_file(&self, file_path: &str) -> LoreResult<Vec<Anchor>> {
        self.with_reader(|conn| anchor_ops::valid_anchors_for_file(conn, file_path))
    }

    fn anchors_for_learning(&self, learning_id: &str) -> LoreResult<Vec<Anchor>> {
        self.with_reader(|conn| anchor_ops::anchors_for_learning(conn, learning_id))
    }
}

impl IVectorStore for StorageEngine {
    fn store_embedding(
        &self,
        learning_id: &str,
        content_hash: &str,
        embedding: &[f32],
        model_name: &str,
    ) -> LoreResult<()> {
        self.with_writer(|conn| {
            vector_search::store_embedding(conn, learning_id, content_hash, embedding, model_name)
        })
    }

    fn search_vector(&self, embedding: &[f32], limit: usize) -> LoreResult<Vec<(String, f64)>> {
        self.with_reader(|conn| vector_search::search_vector(conn, embedding, limit))
    }
}
