use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

use swatch_catalog::{load_engine, open_source, InMemorySource, JsonDirSource, JsonFileSource};
use swatch_core::traits::CatalogSource;
use swatch_core::types::RawPolishRecord;
use swatch_filter::EngineOptions;

fn fixture_dir() -> PathBuf {
    // crates/swatch-catalog -> crates -> repo root
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).ancestors().nth(2).unwrap().join("test_data/catalog")
}

#[test]
fn directory_source_reads_files_in_path_order() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path();
    fs::create_dir(dir.join("opi")).unwrap();
    fs::write(dir.join("opi/lacquer.json"), r#"[{"_id": "o1", "name": "Big Apple Red"}]"#).unwrap();
    fs::write(dir.join("diva.json"), r#"{"status": "okay", "data": [{"_id": "d1", "name": "Cherry"}]}"#).unwrap();
    fs::write(dir.join("notes.txt"), "not a catalog").unwrap();

    let records = JsonDirSource::new(dir).fetch_catalog().expect("fetch");
    let names: Vec<_> = records.iter().filter_map(|r| r.name.clone()).collect();
    assert_eq!(names, vec!["Cherry", "Big Apple Red"]);
}

#[test]
fn missing_paths_are_errors() {
    let tmp = TempDir::new().unwrap();
    assert!(JsonDirSource::new(tmp.path().join("nope")).fetch_catalog().is_err());
    assert!(JsonFileSource::new(tmp.path().join("nope.json")).fetch_catalog().is_err());
}

#[test]
fn bad_file_reports_its_path() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("broken.json");
    fs::write(&path, r#"{"status": "error"}"#).unwrap();
    let err = JsonFileSource::new(&path).fetch_catalog().unwrap_err();
    assert!(format!("{:#}", err).contains("broken.json"));
}

#[test]
fn fixture_catalog_loads() {
    let source = open_source(&fixture_dir());
    let records = source.fetch_catalog().expect("fixture");
    assert!(records.len() >= 10, "fixture has {} records", records.len());
}

#[tokio::test]
async fn load_engine_normalises_and_dedups() -> anyhow::Result<()> {
    let raw: Vec<RawPolishRecord> = serde_json::from_str(
        r##"[
            {"_id": "1", "name": "Lincoln Park After Dark", "hex": "#2b1b2e"},
            {"_id": "1", "name": "duplicate"},
            {"name": "no id"},
            {"_id": "2", "name": "Alpine Snow", "hex": "#f7f4f0"}
        ]"##,
    )?;
    let engine = load_engine(Arc::new(InMemorySource::new(raw)), EngineOptions::default()).await?;
    let ids: Vec<&str> = engine.visible_records().iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2"]);
    assert_eq!(engine.get("1").map(|r| r.name.as_str()), Some("Lincoln Park After Dark"));
    Ok(())
}

#[tokio::test]
async fn fixture_search_by_color() -> anyhow::Result<()> {
    let source: Arc<dyn CatalogSource> = Arc::new(JsonDirSource::new(fixture_dir()));
    let mut engine = load_engine(source, EngineOptions::default()).await?;
    engine.set_target_color(Some("#c8102e"));
    let top = &engine.visible_results()[0];
    assert_eq!(top.record.name, "Big Apple Red");
    assert!(engine.visible_results().len() <= 15);
    Ok(())
}
