pub mod app;
pub mod cache;
pub mod gallery;
pub mod store;

pub use app::AppState;
pub use cache::{DataError, ProjectCache, ProjectDataService, StaticProjectService};
pub use gallery::GalleryState;
pub use store::PortfolioStore;
