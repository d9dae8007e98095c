/// REST client for the songs, artists and genres collections
pub mod catalog;
/// Catalog entities and create payloads
pub mod entities;
/// Error types and result aliases
pub mod errors;

pub use catalog::{CatalogApi, CatalogClient, Collection};
