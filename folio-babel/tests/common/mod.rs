//! Shared fixture helpers.

use std::fs;
use std::path::PathBuf;

pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Directory laid out like a raw scrape: `<name>.html` + `<name>.meta.json`.
pub fn site_dir() -> PathBuf {
    fixtures_dir().join("site")
}

pub fn fixture(name: &str) -> String {
    let path = fixtures_dir().join(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("read {}: {e}", path.display()))
}
