//! Records as the site generator reads them

use chrono::NaiveDate;
use folio_babel::record::{
    ArtworkCategory, Counters, DocumentRecord, FrontMatter, FrontValue, ImageLayout, RecordKind,
};
use insta::assert_snapshot;

fn post() -> DocumentRecord {
    let mut record = DocumentRecord::new(RecordKind::BlogPost, "clotting", r#"Blood "clotting""#);
    record.pub_date = NaiveDate::from_ymd_opt(2023, 3, 12);
    record.author = Some("Ron Geva".into());
    record.reading_time = Some("2 דקות קריאה".into());
    record.description = "Line one\nline two".into();
    record.featured_image = Some("/images/blog-listing-1.jpg".into());
    record.counters = Counters {
        views: 128,
        comments: 3,
        likes: 7,
    };
    record.image_layout = Some(ImageLayout::from_count(6));
    record.body = "# Heading\n\nText with `code`.".into();
    record
}

#[test]
fn test_blog_post_layout() {
    assert_snapshot!(post().to_markdown().trim_end(), @r###"
    ---
    title: "Blood \"clotting\""
    pubDate: 2023-03-12
    author: "Ron Geva"
    readingTime: "2 דקות קריאה"
    description: "Line one\nline two"
    featuredImage: "/images/blog-listing-1.jpg"
    views: 128
    comments: 3
    likes: 7
    imageLayout: "3x2"
    draft: false
    ---

    # Heading

    Text with `code`.
    "###);
}

#[test]
fn test_persisted_record_reads_back() {
    let record = post();
    let (front, body) = FrontMatter::parse(&record.to_markdown()).unwrap();

    assert_eq!(front, record.front_matter());
    assert_eq!(body, record.body);
    assert_eq!(
        front.get("title"),
        Some(&FrontValue::Str(r#"Blood "clotting""#.to_string()))
    );
    assert_eq!(front.get("views"), Some(&FrontValue::Int(128)));
    assert_eq!(front.get("draft"), Some(&FrontValue::Bool(false)));
}

#[test]
fn test_artwork_with_description() {
    let mut record = DocumentRecord::new(RecordKind::Artwork, "sculptures-3", "Bronze heron");
    record.category = Some(ArtworkCategory::Sculptures);
    record.featured_image = Some("/images/art-sculptures-3.jpg".into());
    record.order = Some(3);
    record.description = "Cast in 2019".into();

    assert_snapshot!(record.to_markdown().trim_end(), @r###"
    ---
    title: "Bronze heron"
    category: "sculptures"
    featuredImage: "/images/art-sculptures-3.jpg"
    order: 3
    description: "Cast in 2019"
    ---
    "###);
}

#[test]
fn test_every_record_ends_with_newline() {
    for kind in [RecordKind::BlogPost, RecordKind::Page, RecordKind::Artwork] {
        let text = DocumentRecord::new(kind, "x", "X").to_markdown();
        assert!(text.ends_with('\n'));
        assert!(text.starts_with("---\n"));
    }
}
