//! Full batch runs over `tests/fixtures/site`

use crate::common::site_dir;
use chrono::NaiveDate;
use folio_babel::record::FrontMatter;
use folio_babel::{BatchReport, BatchRun, BuildContext, CollectionRegistry, PipelineOptions};
use insta::assert_snapshot;
use std::fs;
use std::path::Path;

fn run(content: &Path) -> BatchReport {
    let ctx = BuildContext::new(
        PipelineOptions::default(),
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
    );
    BatchRun::new(site_dir(), content)
        .with_listing("blog-listing")
        .execute(&CollectionRegistry::default(), ctx)
        .unwrap()
}

fn relative(report: &BatchReport, base: &Path) -> Vec<String> {
    report
        .written
        .iter()
        .map(|p| p.strip_prefix(base).unwrap().display().to_string())
        .collect()
}

#[test]
fn test_writes_every_collection() {
    let content = tempfile::tempdir().unwrap();
    let report = run(content.path());

    assert!(report.is_success());
    assert_eq!(
        relative(&report, content.path()),
        vec![
            "pages/he/about.md",
            "artworks/he/color-1.md",
            "artworks/he/color-2.md",
            "blog/he/clotting.md",
        ]
    );
    let skipped: Vec<_> = report
        .skipped
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(skipped, vec!["blog-listing.html", "contact.html"]);
}

#[test]
fn test_blog_post_record() {
    let content = tempfile::tempdir().unwrap();
    run(content.path());
    let text = fs::read_to_string(content.path().join("blog/he/clotting.md")).unwrap();

    assert_snapshot!(text.trim_end(), @r###"
    ---
    title: "Blood clotting"
    pubDate: 2023-03-12
    author: "Ron Geva"
    readingTime: "2 דקות קריאה"
    description: "Clotting is how blood turns from liquid to gel, and it is a story worth telling."
    featuredImage: "/images/blog-listing-1.jpg"
    views: 128
    comments: 3
    likes: 7
    imageLayout: "2-col"
    draft: false
    ---

    Clotting is how blood turns from liquid to gel, and it is a story worth telling.

    ![Platelets](/images/blog-clotting-1.jpg)

    Second paragraph with **emphasis**.

    ![](/images/blog-clotting-2.webp)
    "###);
}

#[test]
fn test_page_record() {
    let content = tempfile::tempdir().unwrap();
    run(content.path());
    let text = fs::read_to_string(content.path().join("pages/he/about.md")).unwrap();

    assert_snapshot!(text.trim_end(), @r###"
    ---
    title: "About the artist"
    description: "Painter and illustrator working mostly in watercolor and ink."
    featuredImage: "/images/about-1.jpg"
    ---

    # About the artist

    Painter and illustrator working mostly in watercolor and ink.

    ![Portrait](/images/about-1.jpg)
    "###);
}

#[test]
fn test_artwork_records() {
    let content = tempfile::tempdir().unwrap();
    run(content.path());

    let read = |name: &str| {
        let text = fs::read_to_string(content.path().join("artworks/he").join(name)).unwrap();
        FrontMatter::parse(&text).unwrap().0
    };
    let first = read("color-1.md");
    assert_eq!(first.get("title").and_then(|v| v.as_str()), Some("Sunflowers"));
    assert_eq!(first.get("category").and_then(|v| v.as_str()), Some("color"));

    let second = read("color-2.md");
    assert_eq!(second.get("title").and_then(|v| v.as_str()), Some("color 2"));
    assert_eq!(
        second.get("featuredImage").and_then(|v| v.as_str()),
        Some("/images/art-color-2.jpg")
    );
}

#[test]
fn test_rerun_overwrites_identically() {
    let content = tempfile::tempdir().unwrap();
    run(content.path());
    let first = fs::read_to_string(content.path().join("blog/he/clotting.md")).unwrap();
    run(content.path());
    let second = fs::read_to_string(content.path().join("blog/he/clotting.md")).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_without_listing_featured_image_is_second_content_image() {
    let content = tempfile::tempdir().unwrap();
    let ctx = BuildContext::new(
        PipelineOptions::default(),
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
    );
    BatchRun::new(site_dir(), content.path())
        .with_collections(["blog"])
        .execute(&CollectionRegistry::default(), ctx)
        .unwrap();

    let text = fs::read_to_string(content.path().join("blog/he/clotting.md")).unwrap();
    assert!(text.contains(r#"featuredImage: "/images/blog-clotting-2.webp""#));
}
