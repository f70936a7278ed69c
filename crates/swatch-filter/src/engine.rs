use anyhow::Result;
use std::collections::HashSet;
use tracing::{debug, info, warn};

use swatch_color::DEFAULT_TOP_N;
use swatch_core::config::EngineConfig;
use swatch_core::traits::ColorExtractor;
use swatch_core::types::{Facet, PolishRecord, RankedPolish, RawPolishRecord};

use crate::pipeline::recompute;
use crate::state::FilterState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOptions {
    pub top_n: usize,
    pub compose_color_with_filters: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self { top_n: DEFAULT_TOP_N, compose_color_with_filters: false }
    }
}

impl From<&EngineConfig> for EngineOptions {
    fn from(config: &EngineConfig) -> Self {
        Self { top_n: config.top_n, compose_color_with_filters: config.compose_color_with_filters }
    }
}

/// Owns the base catalog and the active criteria for one session.
///
/// Every mutating call recomputes the visible list before returning, so
/// `visible_results` is always consistent with `state`.
#[derive(Debug, Default)]
pub struct CatalogFilterEngine {
    catalog: Vec<PolishRecord>,
    state: FilterState,
    options: EngineOptions,
    results: Vec<RankedPolish>,
}

impl CatalogFilterEngine {
    pub fn new(options: EngineOptions) -> Self {
        Self { options, ..Self::default() }
    }

    /// Replaces the catalog, keeping the first record seen for each `id`, and
    /// clears every criterion. Records with a blank `id` or `name` are dropped.
    pub fn load_catalog(&mut self, records: Vec<PolishRecord>) {
        let total = records.len();
        let records: Vec<PolishRecord> =
            records.into_iter().filter(|r| !r.id.trim().is_empty() && !r.name.trim().is_empty()).collect();
        let malformed = total - records.len();
        if malformed > 0 {
            warn!(malformed, "dropped records with a blank id or name");
        }
        let mut seen = HashSet::with_capacity(records.len());
        let unique = records.len();
        self.catalog = records.into_iter().filter(|r| seen.insert(r.id.clone())).collect();
        let duplicates = unique - self.catalog.len();
        if duplicates > 0 {
            warn!(duplicates, "dropped records with repeated ids");
        }
        info!(records = self.catalog.len(), "catalog loaded");
        self.state = FilterState::default();
        self.refresh();
    }

    /// Normalises raw records first; entries without an `id` or `name` are
    /// dropped.
    pub fn load_raw_catalog(&mut self, raw: Vec<RawPolishRecord>) {
        let total = raw.len();
        let records: Vec<PolishRecord> = raw.into_iter().filter_map(PolishRecord::from_raw).collect();
        let malformed = total - records.len();
        if malformed > 0 {
            warn!(malformed, "dropped catalog entries missing id or name");
        }
        self.load_catalog(records);
    }

    pub fn set_text_query(&mut self, query: &str) {
        if self.state.text_query == query {
            return;
        }
        self.state.text_query = query.to_string();
        self.refresh();
    }

    /// `Some` switches to similarity mode, `None` returns to filtering.
    pub fn set_target_color(&mut self, hex: Option<&str>) {
        self.state.target_color = hex.map(str::to_string);
        self.refresh();
    }

    /// Asks `extractor` for the color under `(x, y)` and targets it. On
    /// failure the current criteria are left untouched.
    pub fn set_target_from_pixel(&mut self, extractor: &dyn ColorExtractor, image: &[u8], x: u32, y: u32) -> Result<()> {
        let hex = extractor.extract_color(image, x, y)?;
        self.set_target_color(Some(&hex));
        Ok(())
    }

    pub fn toggle_facet_tag(&mut self, facet: Facet, tag: &str) {
        let selected = self.state.toggle(facet, tag);
        debug!(%facet, tag, selected, "toggled facet tag");
        self.refresh();
    }

    /// String-keyed variant for callers that carry facet names around.
    /// Unknown keys are a caller bug and fail with `Error::InvalidFacet`.
    pub fn toggle_facet_tag_by_name(&mut self, facet: &str, tag: &str) -> swatch_core::error::Result<()> {
        let facet: Facet = facet.parse()?;
        self.toggle_facet_tag(facet, tag);
        Ok(())
    }

    pub fn clear_all(&mut self) {
        self.state = FilterState::default();
        self.refresh();
    }

    pub fn visible_results(&self) -> &[RankedPolish] {
        &self.results
    }

    pub fn visible_records(&self) -> Vec<&PolishRecord> {
        self.results.iter().map(|r| &r.record).collect()
    }

    pub fn has_active_filters(&self) -> bool {
        self.state.has_active_filters()
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn options(&self) -> EngineOptions {
        self.options
    }

    pub fn catalog(&self) -> &[PolishRecord] {
        &self.catalog
    }

    pub fn get(&self, id: &str) -> Option<&PolishRecord> {
        self.catalog.iter().find(|r| r.id == id)
    }

    fn refresh(&mut self) {
        self.results = recompute(&self.catalog, &self.state, &self.options);
    }
}
