use serde::Serialize;
use std::collections::BTreeSet;

use swatch_core::types::{Facet, PolishRecord};

/// Every criterion the caller can set. `Default` is the cleared state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterState {
    pub text_query: String,
    pub target_color: Option<String>,
    pub color_family_tags: BTreeSet<String>,
    pub finish_tags: BTreeSet<String>,
    pub brand_tags: BTreeSet<String>,
    pub type_tags: BTreeSet<String>,
}

impl FilterState {
    pub fn tags(&self, facet: Facet) -> &BTreeSet<String> {
        match facet {
            Facet::ColorFamily => &self.color_family_tags,
            Facet::Finish => &self.finish_tags,
            Facet::Brand => &self.brand_tags,
            Facet::Type => &self.type_tags,
        }
    }

    fn tags_mut(&mut self, facet: Facet) -> &mut BTreeSet<String> {
        match facet {
            Facet::ColorFamily => &mut self.color_family_tags,
            Facet::Finish => &mut self.finish_tags,
            Facet::Brand => &mut self.brand_tags,
            Facet::Type => &mut self.type_tags,
        }
    }

    /// Adds `tag` if absent, removes it if present. Blank tags are ignored.
    /// Returns whether the tag is selected afterwards.
    pub fn toggle(&mut self, facet: Facet, tag: &str) -> bool {
        let tag = tag.trim();
        if tag.is_empty() {
            return false;
        }
        let tags = self.tags_mut(facet);
        if tags.remove(tag) {
            false
        } else {
            tags.insert(tag.to_string());
            true
        }
    }

    pub fn text_active(&self) -> bool {
        !self.text_query.is_empty()
    }

    pub fn similarity_mode(&self) -> bool {
        self.target_color.is_some()
    }

    pub fn has_active_filters(&self) -> bool {
        self.text_active()
            || self.similarity_mode()
            || Facet::ALL.iter().any(|&facet| !self.tags(facet).is_empty())
    }

    /// Text and facet criteria only; the target color is handled by ranking.
    pub fn matches(&self, record: &PolishRecord) -> bool {
        self.matches_text(record) && Facet::ALL.iter().all(|&facet| self.matches_facet(record, facet))
    }

    fn matches_text(&self, record: &PolishRecord) -> bool {
        if !self.text_active() {
            return true;
        }
        let query = self.text_query.to_lowercase();
        record.name.to_lowercase().contains(&query)
    }

    // OR within a facet; an empty facet is skipped
    fn matches_facet(&self, record: &PolishRecord, facet: Facet) -> bool {
        let tags = self.tags(facet);
        if tags.is_empty() {
            return true;
        }
        let Some(value) = record.facet_value(facet) else { return false };
        let value = value.to_lowercase();
        tags.iter().any(|tag| value.contains(&tag.to_lowercase()))
    }
}
