//! swatch-catalog
//!
//! Catalog sources: JSON files as the backend serves them, directories of
//! such files, and in-memory lists. `load_engine` turns any source into a
//! loaded `CatalogFilterEngine`.
pub mod decode;
pub mod source;

pub use decode::parse_catalog;
pub use source::{load_engine, open_source, InMemorySource, JsonDirSource, JsonFileSource};
