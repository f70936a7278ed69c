use crate::types::RawPolishRecord;

/// Supplies the raw catalog for one session or refresh.
///
/// Retry and backoff belong to the implementation; the engine is only ever
/// handed a fully materialised list.
pub trait CatalogSource: Send + Sync {
    fn fetch_catalog(&self) -> anyhow::Result<Vec<RawPolishRecord>>;
}

/// Picks the color under a tapped pixel. The result is a `#rrggbb` string fed
/// to `CatalogFilterEngine::set_target_color`.
pub trait ColorExtractor: Send + Sync {
    fn extract_color(&self, image: &[u8], x: u32, y: u32) -> anyhow::Result<String>;
}
