use swatch_color::rank_by_similarity;
use swatch_core::types::{PolishRecord, RankedPolish};
use tracing::debug;

use crate::engine::EngineOptions;
use crate::state::FilterState;

/// Derives the visible list from the base catalog and the current criteria.
///
/// With a target color the catalog is ranked by distance and cut to
/// `options.top_n`; text and facet criteria are ignored unless
/// `options.compose_color_with_filters` is set, in which case they narrow the
/// candidates first. Without a target color the matching records are returned
/// in catalog order.
pub fn recompute(catalog: &[PolishRecord], state: &FilterState, options: &EngineOptions) -> Vec<RankedPolish> {
    let results = match state.target_color.as_deref() {
        Some(target) if options.compose_color_with_filters => {
            rank_by_similarity(catalog.iter().filter(|r| state.matches(r)), target, options.top_n)
        }
        Some(target) => rank_by_similarity(catalog, target, options.top_n),
        None => catalog
            .iter()
            .filter(|r| state.matches(r))
            .cloned()
            .map(RankedPolish::unranked)
            .collect(),
    };
    debug!(
        catalog = catalog.len(),
        visible = results.len(),
        similarity = state.similarity_mode(),
        "recomputed results"
    );
    results
}
