//! swatch-filter
//!
//! The catalog filter engine: one explicit `FilterState`, a pure `recompute`
//! over the base catalog, and `CatalogFilterEngine` which owns both and keeps
//! the visible result list current after every mutation.
pub mod browse;
pub mod debounce;
pub mod engine;
pub mod pipeline;
pub mod state;

pub use engine::{CatalogFilterEngine, EngineOptions};
pub use pipeline::recompute;
pub use state::FilterState;
