use chrono::{DateTime, Utc};
use match_insight::{Order, Pigment};
use std::sync::Arc;
use tokio::sync::RwLock;

use super::matcher_client::{MatchService, MatcherError};

/// Pigment and order databases as last fetched from the matching service
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    pub pigments: Vec<Pigment>,
    pub orders: Vec<Order>,
    /// When the snapshot was fetched; `None` until the first reload
    pub loaded_at: Option<DateTime<Utc>>,
}

/// In-memory copy of the matching service databases.
///
/// Reloads replace the snapshot wholesale; readers never see a mix of old
/// pigments and new orders.
pub struct Catalog {
    snapshot: Arc<RwLock<CatalogSnapshot>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self {
            snapshot: Arc::new(RwLock::new(CatalogSnapshot::default())),
        }
    }

    /// Fetch both databases and swap them in.
    ///
    /// On failure the previous snapshot stays in place.
    pub async fn reload(&self, matcher: &dyn MatchService) -> Result<CatalogSnapshot, MatcherError> {
        let (pigments, orders) = tokio::try_join!(matcher.pigments(), matcher.orders())?;

        tracing::info!(
            pigments = pigments.len(),
            orders = orders.len(),
            "Catalog loaded"
        );

        let snapshot = CatalogSnapshot {
            pigments,
            orders,
            loaded_at: Some(Utc::now()),
        };
        self.replace(snapshot.clone()).await;
        Ok(snapshot)
    }

    pub async fn replace(&self, snapshot: CatalogSnapshot) {
        let mut current = self.snapshot.write().await;
        *current = snapshot;
    }

    pub async fn snapshot(&self) -> CatalogSnapshot {
        self.snapshot.read().await.clone()
    }

    pub async fn find_pigment(&self, pigment_id: &str) -> Option<Pigment> {
        let snapshot = self.snapshot.read().await;
        snapshot.pigments.iter().find(|p| p.id == pigment_id).cloned()
    }

    /// The order database, or `None` before the first load
    pub async fn orders(&self) -> Option<Vec<Order>> {
        let snapshot = self.snapshot.read().await;
        snapshot.loaded_at?;
        Some(snapshot.orders.clone())
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}
