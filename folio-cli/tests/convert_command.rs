use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

fn site_page(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("folio-babel")
        .join("tests")
        .join("fixtures")
        .join("site")
        .join(name)
}

#[test]
fn convert_prints_record_to_stdout() {
    let mut cmd = cargo_bin_cmd!("folio");
    cmd.arg("convert").arg(site_page("about.html"));

    let output_pred = predicate::str::starts_with("---\n")
        .and(predicate::str::contains("title: \"About the artist\""))
        .and(predicate::str::contains("featuredImage: \"/images/about-1.jpg\""))
        .and(predicate::str::contains("![Portrait](/images/about-1.jpg)"))
        .and(predicate::str::contains("Home").not());

    cmd.assert().success().stdout(output_pred);
}

#[test]
fn convert_uses_listing_thumbnail_next_to_the_page() {
    let mut cmd = cargo_bin_cmd!("folio");
    cmd.arg("convert").arg(site_page("blog-clotting.html"));

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "featuredImage: \"/images/blog-listing-1.jpg\"",
        ));
}

#[test]
fn convert_writes_single_output_file() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("nested").join("about.md");

    let mut cmd = cargo_bin_cmd!("folio");
    cmd.arg("convert")
        .arg(site_page("about.html"))
        .arg("-o")
        .arg(&out);

    cmd.assert().success().stdout(predicate::str::is_empty());
    let text = fs::read_to_string(&out).unwrap();
    assert!(text.contains("# About the artist"));
}

#[test]
fn convert_gallery_needs_content_dir_for_output() {
    let dir = tempdir().unwrap();

    let mut cmd = cargo_bin_cmd!("folio");
    cmd.arg("convert")
        .arg(site_page("art-color.html"))
        .arg("-o")
        .arg(dir.path().join("art.md"));
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("produced 2 records"));

    let mut cmd = cargo_bin_cmd!("folio");
    cmd.arg("convert")
        .arg(site_page("art-color.html"))
        .arg("--content")
        .arg(dir.path());
    cmd.assert().success();
    assert!(dir.path().join("artworks/he/color-1.md").is_file());
    assert!(dir.path().join("artworks/he/color-2.md").is_file());
}

#[test]
fn convert_requires_collection_for_unknown_page() {
    let mut cmd = cargo_bin_cmd!("folio");
    cmd.arg("convert").arg(site_page("contact.html"));
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("matches no collection"));

    let mut cmd = cargo_bin_cmd!("folio");
    cmd.arg("convert")
        .arg(site_page("contact.html"))
        .arg("--collection")
        .arg("pages");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("title: "));
}

#[test]
fn convert_reports_missing_input() {
    let mut cmd = cargo_bin_cmd!("folio");
    cmd.arg("convert").arg("does-not-exist.html");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("I/O error"));
}

#[test]
fn extra_overrides_reach_the_pipeline() {
    let mut cmd = cargo_bin_cmd!("folio");
    cmd.arg("convert")
        .arg(site_page("about.html"))
        .arg("--extra-convert.image-prefix")
        .arg("/media/");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("![Portrait](/media/about-1.jpg)"));
}

#[test]
fn convert_reads_explicit_sidecar() {
    let mut cmd = cargo_bin_cmd!("folio");
    cmd.arg("convert")
        .arg(site_page("about.html"))
        .arg("--meta")
        .arg(site_page("art-color.meta.json"));

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "featuredImage: \"/images/art-color-1.jpg\"",
        ));
}

#[test]
fn convert_rejects_missing_sidecar() {
    let mut cmd = cargo_bin_cmd!("folio");
    cmd.arg("convert")
        .arg(site_page("about.html"))
        .arg("--meta")
        .arg(site_page("nothing.meta.json"));

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}
