//! Small end-to-end conversions

use folio_babel::images::{AssetPattern, ImageReference};
use folio_babel::{convert_html, ConverterOptions, DocumentConverter, ImageRefTable};
use folio_babel::markup::{body, parse_html};

fn md(html: &str) -> String {
    convert_html(html, &ImageRefTable::new()).body
}

#[test]
fn test_heading_then_paragraph() {
    assert_eq!(
        md("<h1>Title</h1><p>Hello <strong>world</strong></p>"),
        "# Title\n\nHello **world**"
    );
}

#[test]
fn test_word_boundary_kept_when_space_sits_inside_span() {
    assert_eq!(
        md("<p>Hello<strong> world</strong> and<em> more</em></p>"),
        "Hello **world** and *more*"
    );
    assert_eq!(
        md(r#"<p>see<a href="/x"> the page</a></p>"#),
        "see [the page](/x)"
    );
}

#[test]
fn test_deeply_nested_markup_converts_on_a_worker_stack() {
    let html = format!("{}<p>bottom <em>line</em></p>", "<div>".repeat(6000));
    let body = std::thread::Builder::new()
        .stack_size(2 * 1024 * 1024)
        .spawn(move || md(&html))
        .unwrap()
        .join()
        .unwrap();
    assert_eq!(body, "bottom line");
}

#[test]
fn test_image_resolved_through_asset_id() {
    let mut refs = ImageRefTable::new();
    refs.insert("abc123_photo~mv2.jpg", ImageReference::new("remote", "cat-1.jpg"));

    let result = convert_html(
        r#"<img src="https://host/media/abc123_photo~mv2.jpg" alt="Cat">"#,
        &refs,
    );
    assert_eq!(result.body, "![Cat](/images/cat-1.jpg)");
    assert_eq!(result.images.len(), 1);
    assert_eq!(result.images[0].local, "cat-1.jpg");
    assert!(result.unresolved.is_empty());
}

#[test]
fn test_unresolved_image_keeps_original_src() {
    let src = "https://host/media/zzz999_other~mv2.jpg/v1/fill/w_100/zzz.jpg";
    let mut refs = ImageRefTable::new();
    refs.insert("abc123_photo~mv2.jpg", ImageReference::new("remote", "cat-1.jpg"));

    let result = convert_html(&format!(r#"<img src="{src}" alt="Dog">"#), &refs);
    assert_eq!(result.body, format!("![Dog]({src})"));
    assert_eq!(result.unresolved, vec![src.to_string()]);
}

#[test]
fn test_unordered_list() {
    assert_eq!(md("<ul><li>A</li><li>B</li></ul>"), "- A\n- B");
}

#[test]
fn test_whitespace_between_blocks_collapses() {
    let html = "<p>one</p>\n\n\n<div>\n\n</div><p></p><p>two</p>";
    assert_eq!(md(html), "one\n\ntwo");
}

#[test]
fn test_grid_detection_can_be_disabled() {
    let html = r#"<div class="image-grid grid-2-col">text <em>inside</em></div>"#;
    let root = parse_html(html);
    let refs = ImageRefTable::new();

    let grids = DocumentConverter::default().convert_element(body(&root), &refs);
    let flat = DocumentConverter::new(ConverterOptions {
        detect_image_grids: false,
        ..ConverterOptions::default()
    })
    .convert_element(body(&root), &refs);

    // Same text either way; only block boundaries differ
    assert_eq!(grids.body, "text *inside*");
    assert_eq!(flat.body, "text *inside*");

    let mixed = parse_html(r#"before<div class="grid-3-col">grid</div>after"#);
    assert_eq!(
        DocumentConverter::default().convert_element(body(&mixed), &refs).body,
        "before\n\ngrid\n\nafter"
    );
}

#[test]
fn test_custom_prefix_and_asset_pattern() {
    let pattern = AssetPattern::new(r"/assets/([^/?#]+)").unwrap();
    let mut refs = ImageRefTable::new();
    refs.register(
        ImageReference::new("https://cdn.example.org/assets/p1~v2.png", "p1.png"),
        &pattern,
    );
    let converter = DocumentConverter::new(ConverterOptions {
        image_prefix: "/static/img/".to_string(),
        asset_pattern: pattern,
        ..ConverterOptions::default()
    });

    let root = parse_html(r#"<img src="https://cdn.example.org/assets/p1~v2.png?w=300">"#);
    assert_eq!(
        converter.convert_element(body(&root), &refs).body,
        "![](/static/img/p1.png)"
    );
}

#[test]
fn test_linked_image_keeps_image() {
    assert_eq!(
        md(r#"<a href="/gallery"><img src="a.jpg" alt="A"></a>"#),
        "![A](a.jpg)"
    );
}
