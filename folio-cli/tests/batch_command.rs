use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

fn site_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("folio-babel")
        .join("tests")
        .join("fixtures")
        .join("site")
}

#[test]
fn batch_writes_the_content_tree() {
    let content = tempdir().unwrap();
    let mut cmd = cargo_bin_cmd!("folio");
    cmd.arg("batch")
        .arg("--source")
        .arg(site_dir())
        .arg("--content")
        .arg(content.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("4 records written, 2 pages skipped, 0 failed"));

    for path in [
        "blog/he/clotting.md",
        "pages/he/about.md",
        "artworks/he/color-1.md",
        "artworks/he/color-2.md",
    ] {
        assert!(content.path().join(path).is_file(), "missing {path}");
    }
}

#[test]
fn batch_limits_to_requested_collections() {
    let content = tempdir().unwrap();
    let mut cmd = cargo_bin_cmd!("folio");
    cmd.arg("batch")
        .arg("-c")
        .arg("pages")
        .arg("--source")
        .arg(site_dir())
        .arg("--content")
        .arg(content.path());

    cmd.assert().success();
    assert!(content.path().join("pages/he/about.md").is_file());
    assert!(!content.path().join("blog").exists());
    assert!(!content.path().join("artworks").exists());
}

#[test]
fn batch_rejects_unknown_collection() {
    let content = tempdir().unwrap();
    let mut cmd = cargo_bin_cmd!("folio");
    cmd.arg("batch")
        .arg("-c")
        .arg("recipes")
        .arg("--source")
        .arg(site_dir())
        .arg("--content")
        .arg(content.path());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Collection 'recipes' not found"));
}

#[test]
fn batch_reports_failed_pages_and_exits_nonzero() {
    let source = tempdir().unwrap();
    let content = tempdir().unwrap();
    fs::write(source.path().join("about.html"), "<main><p>Hello there.</p></main>").unwrap();
    fs::write(source.path().join("about.meta.json"), "{ not json").unwrap();

    let mut cmd = cargo_bin_cmd!("folio");
    cmd.arg("batch")
        .arg("--source")
        .arg(source.path())
        .arg("--content")
        .arg(content.path());

    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("0 records written, 0 pages skipped, 1 failed"))
        .stderr(predicate::str::contains("Malformed scrape metadata"));
}

#[test]
fn batch_respects_config_file() {
    let dir = tempdir().unwrap();
    let content = dir.path().join("content");
    let config_path = dir.path().join("folio.toml");
    fs::write(
        &config_path,
        r#"[describe]
strategy = "title"
"#,
    )
    .unwrap();

    let mut cmd = cargo_bin_cmd!("folio");
    cmd.arg("batch")
        .arg("-c")
        .arg("blog")
        .arg("--source")
        .arg(site_dir())
        .arg("--content")
        .arg(&content)
        .arg("--config")
        .arg(&config_path);

    cmd.assert().success();
    let text = fs::read_to_string(content.join("blog/he/clotting.md")).unwrap();
    assert!(text.contains("description: \"Blood clotting\""));
}
