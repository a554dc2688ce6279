pub mod config;
pub mod session;

pub use config::{AnalysisConfig, AppConfig, MatcherConfig};
pub use session::{fingerprint, AnalysisSession};
