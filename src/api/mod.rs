pub mod analysis;
pub mod catalog;
pub mod dashboard;

pub use analysis::{handle_analyze, handle_latest, AnalysisRequest, AnalysisResponse};
pub use analysis::{__path_handle_analyze, __path_handle_latest};
pub use catalog::{handle_pigments, handle_reload, CatalogReloadResponse, PigmentListResponse};
pub use catalog::{__path_handle_pigments, __path_handle_reload};
pub use dashboard::{handle_dashboard, handle_latest_dashboard};
pub use dashboard::{__path_handle_dashboard, __path_handle_latest_dashboard};
