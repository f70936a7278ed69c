use std::fs;
use std::path::Path;
use tempfile::TempDir;

use swatch_core::config::{resolve_with_base, Config, SwatchConfig};

#[test]
fn defaults_apply_without_any_config_file() {
    let tmp = TempDir::new().unwrap();
    let config = Config::load_for_env(tmp.path(), "dev").expect("load");
    let settings = config.settings().expect("settings");

    assert_eq!(settings, SwatchConfig::default());
    assert_eq!(settings.engine.top_n, 15);
    assert_eq!(settings.engine.page_size, 4);
    assert!(!settings.engine.compose_color_with_filters);
}

#[test]
fn env_overlay_overrides_base_file() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path();
    fs::write(
        dir.join("config.toml"),
        "[engine]\ntop_n = 10\npage_size = 8\n\n[facets]\nfinishes = [\"Creme\", \"Glitter\"]\n",
    )
    .unwrap();
    fs::write(dir.join("config.prod.toml"), "[engine]\ntop_n = 25\n").unwrap();

    let prod = Config::load_for_env(dir, "prod").expect("prod").settings().unwrap();
    assert_eq!(prod.engine.top_n, 25, "overlay wins");
    assert_eq!(prod.engine.page_size, 8, "base value kept when overlay is silent");
    assert_eq!(prod.facets.finishes, vec!["Creme".to_string(), "Glitter".to_string()]);

    let dev = Config::load_for_env(dir, "dev").expect("dev").settings().unwrap();
    assert_eq!(dev.engine.top_n, 10, "prod overlay not read in dev");
}

#[test]
fn raw_keys_are_reachable() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("config.toml"), "[catalog]\npath = \"data/polish.json\"\n").unwrap();
    let config = Config::load_for_env(tmp.path(), "test").expect("load");
    let path: String = config.get("catalog.path").expect("catalog.path");
    assert_eq!(path, "data/polish.json");
    assert!(config.get::<String>("catalog.missing").is_err());
}

#[test]
fn zero_top_n_is_rejected() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("config.toml"), "[engine]\ntop_n = 0\n").unwrap();
    let err = Config::load_for_env(tmp.path(), "dev").err().expect("invalid config");
    assert!(err.to_string().contains("top_n"), "unexpected error: {}", err);
}

#[test]
fn relative_paths_resolve_against_base() {
    let base = Path::new("/srv/swatch");
    assert_eq!(resolve_with_base(base, "catalog.json"), base.join("catalog.json"));
    assert_eq!(resolve_with_base(base, "/abs/catalog.json"), Path::new("/abs/catalog.json"));
}
