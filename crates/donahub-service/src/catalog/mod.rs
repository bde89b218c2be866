//! Material catalog: publishing, browsing and owner management.

pub mod filter;
pub mod service;

pub use filter::MaterialFilter;
pub use service::CatalogService;
