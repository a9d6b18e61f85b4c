//! Caller-owned registry of validation runs keyed by run id.
//!
//! The pipeline itself is stateless; the REST layer records each run here
//! so results can be fetched again later. The registry holds at most
//! `capacity` runs; beginning a run beyond that evicts the oldest ones.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use prd_validator::ValidationReport;
use serde::Serialize;
use std::collections::VecDeque;
use std::sync::Mutex;
use uuid::Uuid;

/// Runs kept by [`RunRegistry::new`].
pub const DEFAULT_CAPACITY: usize = 1000;

/// One validation run and, once finished, its report.
#[derive(Debug, Clone, Serialize)]
pub struct RunRecord {
    pub id: Uuid,
    pub url: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub report: ValidationReport,
}

/// Concurrent map from run id to [`RunRecord`], bounded oldest-first.
pub struct RunRegistry {
    runs: DashMap<Uuid, RunRecord>,
    /// Run ids in the order they began.
    order: Mutex<VecDeque<Uuid>>,
    capacity: usize,
}

impl Default for RunRegistry {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl RunRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry keeping at most `capacity` runs (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            runs: DashMap::new(),
            order: Mutex::new(VecDeque::new()),
            capacity: capacity.max(1),
        }
    }

    /// Register a new pending run and return its id.
    pub fn begin(&self, url: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.runs.insert(
            id,
            RunRecord {
                id,
                url: url.to_string(),
                started_at: Utc::now(),
                finished_at: None,
                report: ValidationReport::pending(),
            },
        );

        let mut order = self.order.lock().unwrap_or_else(|e| e.into_inner());
        order.push_back(id);
        while order.len() > self.capacity {
            if let Some(evicted) = order.pop_front() {
                self.runs.remove(&evicted);
                tracing::debug!(%evicted, "evicted oldest validation run");
            }
        }
        id
    }

    /// Attach the final report to run `id`. Unknown or evicted ids are ignored.
    pub fn complete(&self, id: Uuid, report: ValidationReport) {
        if let Some(mut record) = self.runs.get_mut(&id) {
            record.report = report;
            record.finished_at = Some(Utc::now());
        }
    }

    pub fn get(&self, id: &Uuid) -> Option<RunRecord> {
        self.runs.get(id).map(|r| r.value().clone())
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.runs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}
