//! Kitchensink conversion: every supported element in one page

use crate::common::fixture;
use comrak::nodes::{AstNode, NodeValue};
use comrak::{parse_document, Arena, ComrakOptions};
use folio_babel::images::{AssetPattern, ImageReference};
use folio_babel::{convert_html, ConversionResult, ImageRefTable};
use insta::assert_snapshot;
use std::collections::HashSet;

fn kitchensink() -> ConversionResult {
    let mut refs = ImageRefTable::new();
    refs.register(
        ImageReference::new("https://static.wixstatic.com/media/c16946_aaa~mv2.jpg", "ks-1.jpg"),
        &AssetPattern::default(),
    );
    refs.insert("c16946_bbb.png", ImageReference::new("bbb", "ks-2.png"));
    convert_html(&fixture("kitchensink.html"), &refs)
}

/// Helper to recursively collect node types from a Comrak AST
fn collect_node_types<'a>(node: &'a AstNode<'a>, types: &mut HashSet<&'static str>) {
    let type_name = match &node.data.borrow().value {
        NodeValue::Document => "Document",
        NodeValue::Paragraph => "Paragraph",
        NodeValue::Heading(_) => "Heading",
        NodeValue::List(_) => "List",
        NodeValue::Item(_) => "Item",
        NodeValue::BlockQuote => "BlockQuote",
        NodeValue::CodeBlock(_) => "CodeBlock",
        NodeValue::Strong => "Strong",
        NodeValue::Emph => "Emph",
        NodeValue::Code(_) => "Code",
        NodeValue::Link(_) => "Link",
        NodeValue::Image(_) => "Image",
        _ => "Other",
    };
    types.insert(type_name);

    for child in node.children() {
        collect_node_types(child, types);
    }
}

#[test]
fn test_kitchensink_body() {
    assert_snapshot!(kitchensink().body, @r###"
    # Kitchen *sink*

    Plain text with **bold**, **b**, *emphasis*, *i* and a [link](https://example.com/page).

    ## Lists

    - Apples
    - Pears and **plums**

    1. One
    2. Two
    3. Three

    > Quoted wisdom.

    Use `folio batch` to convert.

    ```
    let x = 1;
    let y = 2;
    ```

    ![Left](/images/ks-1.jpg)

    ![Right](/images/ks-2.png)

    Missing:

    ![Unknown](https://cdn.example.org/unknown.gif)
    "###);
}

#[test]
fn test_kitchensink_images() {
    let result = kitchensink();
    let locals: Vec<_> = result.images.iter().map(|r| r.local.as_str()).collect();
    assert_eq!(locals, vec!["ks-1.jpg", "ks-2.png"]);
    assert_eq!(result.unresolved, vec!["https://cdn.example.org/unknown.gif"]);
}

#[test]
fn test_kitchensink_is_valid_markdown() {
    let body = kitchensink().body;
    let arena = Arena::new();
    let root = parse_document(&arena, &body, &ComrakOptions::default());

    let mut types = HashSet::new();
    collect_node_types(root, &mut types);
    for expected in [
        "Heading",
        "Paragraph",
        "List",
        "Item",
        "BlockQuote",
        "CodeBlock",
        "Strong",
        "Emph",
        "Code",
        "Link",
        "Image",
    ] {
        assert!(types.contains(expected), "missing {expected} in:\n{body}");
    }
}

#[test]
fn test_script_and_style_never_leak() {
    let body = kitchensink().body;
    assert!(!body.contains("tracking"));
    assert!(!body.contains("color: #333"));
}
