use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::models::AnalysisSession;

/// Holds the latest analysis session.
///
/// Each analysis takes a ticket when it starts. Only the holder of the most
/// recent ticket may publish, so a slow earlier request can never overwrite
/// the result of a later selection.
pub struct SessionStore {
    latest: Arc<RwLock<Option<Arc<AnalysisSession>>>>,
    tickets: AtomicU64,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            latest: Arc::new(RwLock::new(None)),
            tickets: AtomicU64::new(0),
        }
    }

    /// Start a new analysis and drop the previous result.
    pub async fn begin(&self) -> u64 {
        let ticket = self.tickets.fetch_add(1, Ordering::SeqCst) + 1;
        let mut latest = self.latest.write().await;
        *latest = None;
        ticket
    }

    /// Publish a session; returns false if a newer analysis has started.
    pub async fn publish(&self, ticket: u64, session: Arc<AnalysisSession>) -> bool {
        let mut latest = self.latest.write().await;
        if self.tickets.load(Ordering::SeqCst) != ticket {
            tracing::debug!(ticket, pigment = %session.pigment_id, "Discarding superseded analysis");
            return false;
        }
        *latest = Some(session);
        true
    }

    pub async fn latest(&self) -> Option<Arc<AnalysisSession>> {
        self.latest.read().await.clone()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
