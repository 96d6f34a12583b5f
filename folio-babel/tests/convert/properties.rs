//! Property-based tests for the converter invariants
//!
//! Trees are generated directly as `Element` values from a small tag
//! vocabulary, so the properties hold independently of HTML parsing.

use folio_babel::images::ImageReference;
use folio_babel::markup::{Element, MarkupNode};
use folio_babel::{DocumentConverter, ImageRefTable};
use proptest::prelude::*;

const TAGS: &[&str] = &[
    "p", "h2", "strong", "em", "ul", "ol", "li", "blockquote", "div", "span", "section", "code",
];

fn words() -> impl Strategy<Value = String> {
    "[a-z]{1,8}( [a-z]{1,8}){0,3}"
}

fn node() -> impl Strategy<Value = MarkupNode> {
    let leaf = prop_oneof![
        3 => words().prop_map(MarkupNode::Text),
        1 => Just(MarkupNode::Text(" \n ".to_string())),
        1 => Just(Element::new("img").with_attr("src", "https://host/media/c16946_x~mv2.jpg").into()),
        1 => Just(Element::new("br").into()),
    ];
    leaf.prop_recursive(4, 48, 5, |inner| {
        (
            prop::sample::select(TAGS),
            prop::collection::vec(inner, 0..5),
        )
            .prop_map(|(tag, children)| {
                let mut el = Element::new(tag);
                el.children = children;
                el.into()
            })
    })
}

fn root() -> impl Strategy<Value = Vec<MarkupNode>> {
    prop::collection::vec(node(), 0..6)
}

fn refs() -> ImageRefTable {
    let mut refs = ImageRefTable::new();
    refs.insert("c16946_x~mv2.jpg", ImageReference::new("x", "x.jpg"));
    refs
}

fn convert(children: Vec<MarkupNode>) -> String {
    let mut root = Element::new("div");
    root.children = children;
    DocumentConverter::default()
        .convert(&root.into(), &refs())
        .body
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn conversion_is_deterministic(children in root()) {
        prop_assert_eq!(convert(children.clone()), convert(children));
    }

    #[test]
    fn output_never_has_two_blank_lines(children in root()) {
        let body = convert(children);
        prop_assert!(!body.contains("\n\n\n"), "body: {:?}", body);
        prop_assert_eq!(body.trim(), body.as_str());
    }

    #[test]
    fn unknown_wrapper_is_transparent(children in root(), tag in "x-[a-z]{1,6}") {
        let bare = convert(children.clone());
        let mut wrapper = Element::new(tag);
        wrapper.children = children;
        prop_assert_eq!(convert(vec![wrapper.into()]), bare);
    }

    #[test]
    fn ordered_list_numbers_items_in_order(
        items in prop::collection::vec("[a-z]{1,10}", 1..10),
        values in prop::collection::vec(0u32..100, 10),
    ) {
        let mut list = Element::new("ol");
        for (item, value) in items.iter().zip(&values) {
            list = list.with_child(
                Element::new("li")
                    .with_attr("value", value.to_string())
                    .with_text(item.clone())
                    .into(),
            );
        }
        let body = convert(vec![list.into()]);
        let expected: Vec<String> = items
            .iter()
            .enumerate()
            .map(|(i, item)| format!("{}. {}", i + 1, item))
            .collect();
        prop_assert_eq!(body, expected.join("\n"));
    }

    #[test]
    fn unknown_image_keeps_its_src(id in "[a-z0-9]{6}_[a-z]{3}") {
        let src = format!("https://static.wixstatic.com/media/{id}~mv2.jpg/v1/fill/w_300/{id}.jpg");
        let img = Element::new("img").with_attr("src", src.clone());
        let body = convert(vec![img.into()]);
        prop_assert_eq!(body, format!("![]({src})"));
    }
}
