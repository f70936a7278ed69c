//! Collection grouping and feed-style pagination over catalog slices.
use swatch_core::types::PolishRecord;

use crate::engine::CatalogFilterEngine;

/// Unique collection names in first-seen order; records without one are
/// grouped under `UNCATEGORIZED`.
pub fn collections(records: &[PolishRecord]) -> Vec<&str> {
    let mut names: Vec<&str> = Vec::new();
    for record in records {
        let name = record.collection_name();
        if !names.contains(&name) {
            names.push(name);
        }
    }
    names
}

pub fn records_in_collection<'a>(records: &'a [PolishRecord], name: &str) -> Vec<&'a PolishRecord> {
    records.iter().filter(|r| r.collection_name() == name).collect()
}

/// The cumulative window an infinite-scroll list shows after `page` loads.
#[derive(Debug, PartialEq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub has_more: bool,
}

/// Returns `items[..page * page_size]` (clamped). Pages are 1-based; page 0
/// or a zero page size shows nothing.
pub fn page<T>(items: &[T], page: usize, page_size: usize) -> Page<'_, T> {
    let end = page.saturating_mul(page_size).min(items.len());
    Page { items: &items[..end], has_more: end < items.len() }
}

impl CatalogFilterEngine {
    pub fn collections(&self) -> Vec<&str> {
        collections(self.catalog())
    }

    pub fn records_in_collection(&self, name: &str) -> Vec<&PolishRecord> {
        records_in_collection(self.catalog(), name)
    }
}
