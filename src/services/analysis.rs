//! Runs one pigment analysis end to end.
//!
//! The match request and the minimum display delay run concurrently; the
//! result is assembled only after both have finished, so a fast service
//! answer still takes `min_duration` and a slow one is not delayed further.

use match_insight::{Assembler, MatchBundle};
use std::sync::Arc;
use std::time::Duration;

use super::catalog::Catalog;
use super::matcher_client::{MatchService, MatcherError};
use super::session_store::SessionStore;
use crate::models::{AnalysisConfig, AnalysisSession};

/// Drives match requests and publishes assembled sessions
pub struct AnalysisService {
    matcher: Arc<dyn MatchService>,
    catalog: Arc<Catalog>,
    sessions: Arc<SessionStore>,
    min_duration: Duration,
    top_n: usize,
}

impl AnalysisService {
    pub fn new(
        matcher: Arc<dyn MatchService>,
        catalog: Arc<Catalog>,
        sessions: Arc<SessionStore>,
        config: &AnalysisConfig,
    ) -> Self {
        Self {
            matcher,
            catalog,
            sessions,
            min_duration: config.min_duration(),
            top_n: config.top_n,
        }
    }

    /// Analyze a pigment and make the result the latest session.
    ///
    /// The previous session is dropped as soon as the request starts. On
    /// failure nothing is published.
    pub async fn analyze(&self, pigment_id: &str) -> Result<Arc<AnalysisSession>, MatcherError> {
        let pigment_id = pigment_id.trim();
        let ticket = self.sessions.begin().await;
        tracing::info!(pigment = %pigment_id, ticket, "Starting analysis");

        let (result, _) = tokio::join!(
            self.matcher.match_pigment(pigment_id),
            tokio::time::sleep(self.min_duration)
        );

        let mut bundle = match result {
            Ok(bundle) => bundle,
            Err(e) => {
                tracing::warn!(pigment = %pigment_id, error = %e, "Analysis failed");
                return Err(e);
            }
        };

        self.fill_pigment(&mut bundle, pigment_id).await;

        let mut assembler = Assembler::new().top_n(self.top_n);
        if let Some(orders) = self.catalog.orders().await {
            assembler = assembler.order_catalog(&orders);
        }
        let view = assembler.assemble(&bundle);

        if !view.unresolved_orders.is_empty() {
            tracing::warn!(
                pigment = %pigment_id,
                orders = ?view.unresolved_orders,
                "Consensus references orders missing from the catalog"
            );
        }

        let session = Arc::new(AnalysisSession::new(pigment_id, view));
        tracing::info!(
            pigment = %pigment_id,
            matches = session.match_count(),
            fingerprint = %session.fingerprint,
            "Analysis complete"
        );

        self.sessions.publish(ticket, session.clone()).await;
        Ok(session)
    }

    /// Complete the bundle's pigment from the catalog.
    ///
    /// The match endpoint omits the stock on hand, and may omit the pigment
    /// altogether.
    async fn fill_pigment(&self, bundle: &mut MatchBundle, pigment_id: &str) {
        let Some(known) = self.catalog.find_pigment(pigment_id).await else {
            return;
        };
        let pigment = bundle.pigment.get_or_insert_with(|| known.clone());
        if pigment.available_tonnage.is_none() {
            pigment.available_tonnage = known.available_tonnage;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::catalog::CatalogSnapshot;
    use async_trait::async_trait;
    use match_insight::{Order, OrderMatch, Pigment};
    use std::time::Instant;

    struct StubService {
        delay: Duration,
        fail: bool,
    }

    #[async_trait]
    impl MatchService for StubService {
        async fn match_pigment(&self, pigment_id: &str) -> Result<MatchBundle, MatcherError> {
            tokio::time::sleep(self.delay).await;
            if self.fail {
                return Err(MatcherError::PigmentNotFound(pigment_id.to_string()));
            }
            Ok(MatchBundle {
                success: true,
                pigment: Some(Pigment {
                    id: pigment_id.to_string(),
                    l: 50.0,
                    ..Default::default()
                }),
                consensus: vec![
                    OrderMatch {
                        order_id: "ORD-1".into(),
                        euclidean_rank: Some(1),
                        euclidean_delta_e: Some(0.5),
                        l: Some(49.0),
                        a: Some(0.5),
                        b: Some(0.5),
                        ..Default::default()
                    },
                    OrderMatch {
                        order_id: "ORD-X".into(),
                        cosine_rank: Some(1),
                        ..Default::default()
                    },
                ],
                ..Default::default()
            })
        }

        async fn pigments(&self) -> Result<Vec<Pigment>, MatcherError> {
            Ok(Vec::new())
        }

        async fn orders(&self) -> Result<Vec<Order>, MatcherError> {
            Ok(Vec::new())
        }
    }

    fn service(stub: StubService, min_duration_ms: u64) -> (AnalysisService, Arc<Catalog>, Arc<SessionStore>) {
        let catalog = Arc::new(Catalog::new());
        let sessions = Arc::new(SessionStore::new());
        let config = AnalysisConfig {
            min_duration_ms,
            top_n: 1,
        };
        let analysis = AnalysisService::new(Arc::new(stub), catalog.clone(), sessions.clone(), &config);
        (analysis, catalog, sessions)
    }

    #[tokio::test]
    async fn test_analysis_publishes_session() {
        let (analysis, _, sessions) = service(
            StubService {
                delay: Duration::ZERO,
                fail: false,
            },
            0,
        );

        let session = analysis.analyze(" PIG-0001 ").await.unwrap();
        assert_eq!(session.pigment_id, "PIG-0001");
        assert_eq!(session.view.consensus.top.len(), 1);
        assert_eq!(session.view.consensus.rest.len(), 1);
        assert_eq!(
            sessions.latest().await.unwrap().fingerprint,
            session.fingerprint
        );
    }

    #[tokio::test]
    async fn test_minimum_duration_is_honored() {
        let (analysis, _, _) = service(
            StubService {
                delay: Duration::ZERO,
                fail: false,
            },
            100,
        );

        let start = Instant::now();
        analysis.analyze("PIG-0001").await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(100));
    }

    #[tokio::test]
    async fn test_slow_service_is_not_delayed_further() {
        let (analysis, _, _) = service(
            StubService {
                delay: Duration::from_millis(300),
                fail: false,
            },
            300,
        );

        // the delay overlaps the request instead of following it
        let start = Instant::now();
        analysis.analyze("PIG-0001").await.unwrap();
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(300));
        assert!(elapsed < Duration::from_millis(550));
    }

    #[tokio::test]
    async fn test_failure_clears_latest() {
        let (ok, _, sessions) = service(
            StubService {
                delay: Duration::ZERO,
                fail: false,
            },
            0,
        );
        ok.analyze("PIG-0001").await.unwrap();

        let failing = AnalysisService::new(
            Arc::new(StubService {
                delay: Duration::ZERO,
                fail: true,
            }),
            Arc::new(Catalog::new()),
            sessions.clone(),
            &AnalysisConfig {
                min_duration_ms: 0,
                top_n: 3,
            },
        );
        let err = failing.analyze("PIG-9999").await.unwrap_err();
        assert!(matches!(err, MatcherError::PigmentNotFound(_)));
        assert!(sessions.latest().await.is_none());
    }

    #[tokio::test]
    async fn test_unresolved_orders_need_a_loaded_catalog() {
        let (analysis, catalog, _) = service(
            StubService {
                delay: Duration::ZERO,
                fail: false,
            },
            0,
        );

        let session = analysis.analyze("PIG-0001").await.unwrap();
        assert!(session.view.unresolved_orders.is_empty());

        catalog
            .replace(CatalogSnapshot {
                orders: vec![Order {
                    order_id: "ORD-1".into(),
                    ..Default::default()
                }],
                loaded_at: Some(chrono::Utc::now()),
                ..Default::default()
            })
            .await;

        let session = analysis.analyze("PIG-0001").await.unwrap();
        assert_eq!(session.view.unresolved_orders, vec!["ORD-X".to_string()]);
        assert_eq!(session.view.consensus.color_space.orders.len(), 1);
        assert_eq!(session.view.consensus.color_space.highlights.len(), 1);
    }

    #[tokio::test]
    async fn test_pigment_stock_comes_from_the_catalog() {
        let (analysis, catalog, _) = service(
            StubService {
                delay: Duration::ZERO,
                fail: false,
            },
            0,
        );

        let session = analysis.analyze("PIG-0001").await.unwrap();
        assert!(session.view.pigment.as_ref().unwrap().stock.is_none());

        catalog
            .replace(CatalogSnapshot {
                pigments: vec![Pigment {
                    id: "PIG-0001".into(),
                    available_tonnage: Some(80.0),
                    ..Default::default()
                }],
                loaded_at: Some(chrono::Utc::now()),
                ..Default::default()
            })
            .await;

        let session = analysis.analyze("PIG-0001").await.unwrap();
        let badge = session.view.pigment.as_ref().unwrap();
        assert_eq!(badge.stock.as_deref(), Some("80.0 t"));
        // coordinates stay the ones the match service sent
        assert_eq!(badge.lab, "L:50.0 a:0.0 b:0.0");
    }
}
