use chrono::{DateTime, Utc};
use match_insight::DashboardView;
use serde::Serialize;
use sha2::{Digest, Sha256};

/// One completed analysis: the assembled dashboard for a pigment.
///
/// The view is immutable once built. A new analysis replaces the whole
/// session rather than patching it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSession {
    pub pigment_id: String,
    /// SHA-256 of the serialized view, hex encoded
    pub fingerprint: String,
    pub generated_at: DateTime<Utc>,
    pub view: DashboardView,
}

impl AnalysisSession {
    pub fn new(pigment_id: impl Into<String>, view: DashboardView) -> Self {
        let fingerprint = fingerprint(&view);
        Self {
            pigment_id: pigment_id.into(),
            fingerprint,
            generated_at: Utc::now(),
            view,
        }
    }

    /// Quoted fingerprint for the `ETag` header
    pub fn etag(&self) -> String {
        format!("\"{}\"", self.fingerprint)
    }

    /// Number of orders in the consensus list
    pub fn match_count(&self) -> usize {
        self.view.consensus.top.len() + self.view.consensus.rest.len()
    }
}

/// Content hash of a dashboard view.
///
/// Assembly is deterministic, so equal bundles give equal fingerprints.
pub fn fingerprint(view: &DashboardView) -> String {
    digest(view)
}

/// SHA-256 of the JSON form, or of the debug form if serialization fails.
fn digest<T: Serialize + std::fmt::Debug>(value: &T) -> String {
    let bytes = match serde_json::to_vec(value) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to serialize view, hashing its debug form");
            format!("{value:?}").into_bytes()
        }
    };
    hex::encode(Sha256::digest(&bytes))
}
