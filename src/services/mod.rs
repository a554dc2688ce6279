pub mod analysis;
pub mod catalog;
pub mod matcher_client;
pub mod page_renderer;
pub mod session_store;

pub use analysis::AnalysisService;
pub use catalog::{Catalog, CatalogSnapshot};
pub use matcher_client::{HttpMatchService, MatchService, MatcherError};
pub use page_renderer::{PageRenderer, TemplateError};
pub use session_store::SessionStore;
