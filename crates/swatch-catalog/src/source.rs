use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

use swatch_core::traits::CatalogSource;
use swatch_core::types::RawPolishRecord;
use swatch_filter::{CatalogFilterEngine, EngineOptions};

use crate::decode::parse_catalog;

/// One JSON document, either a record array or a backend envelope.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CatalogSource for JsonFileSource {
    fn fetch_catalog(&self) -> Result<Vec<RawPolishRecord>> {
        read_catalog_file(&self.path)
    }
}

/// Every `*.json` file below a directory, concatenated in path order.
#[derive(Debug, Clone)]
pub struct JsonDirSource {
    root: PathBuf,
}

impl JsonDirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn list_json_files(&self) -> Vec<PathBuf> {
        let mut json_files = Vec::new();
        for entry in walkdir::WalkDir::new(&self.root).into_iter().filter_map(|e| e.ok()).filter(|e| e.file_type().is_file()) {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) == Some("json") {
                json_files.push(path.to_path_buf());
            }
        }
        json_files.sort();
        json_files
    }
}

impl CatalogSource for JsonDirSource {
    fn fetch_catalog(&self) -> Result<Vec<RawPolishRecord>> {
        if !self.root.is_dir() {
            anyhow::bail!("catalog directory not found: {}", self.root.display());
        }
        let files = self.list_json_files();
        let mut records = Vec::new();
        for (file_index, path) in files.iter().enumerate() {
            debug!(file = %path.display(), "reading catalog file {}/{}", file_index + 1, files.len());
            records.extend(read_catalog_file(path)?);
        }
        info!(files = files.len(), records = records.len(), root = %self.root.display(), "catalog directory read");
        Ok(records)
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    records: Vec<RawPolishRecord>,
}

impl InMemorySource {
    pub fn new(records: Vec<RawPolishRecord>) -> Self {
        Self { records }
    }
}

impl CatalogSource for InMemorySource {
    fn fetch_catalog(&self) -> Result<Vec<RawPolishRecord>> {
        Ok(self.records.clone())
    }
}

fn read_catalog_file(path: &Path) -> Result<Vec<RawPolishRecord>> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    parse_catalog(&text).with_context(|| format!("decoding {}", path.display()))
}

/// Picks a directory or single-file source for `path`.
pub fn open_source(path: &Path) -> Box<dyn CatalogSource> {
    if path.is_dir() {
        Box::new(JsonDirSource::new(path))
    } else {
        Box::new(JsonFileSource::new(path))
    }
}

/// Fetches on a blocking task and returns an engine loaded with the result.
pub async fn load_engine(source: Arc<dyn CatalogSource>, options: EngineOptions) -> Result<CatalogFilterEngine> {
    let raw = tokio::task::spawn_blocking(move || source.fetch_catalog()).await??;
    let mut engine = CatalogFilterEngine::new(options);
    engine.load_raw_catalog(raw);
    Ok(engine)
}
