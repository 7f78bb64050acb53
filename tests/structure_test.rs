//! Tree building tests over token streams and parsed HTML.

use parsed_paper::tree::{Attribute, NodeKind, Token, TreeAdapter, build_tree, parse_fragment};
use proptest::prelude::*;

// ============================================================================
// Classification
// ============================================================================

#[test]
fn test_create_element_table() {
    let mut adapter = TreeAdapter::new();
    let cases = [
        ("script", "irrelevant"),
        ("style", "irrelevant"),
        ("h3", "heading"),
        ("p", "paragraph"),
        ("ol", "ordered"),
        ("ul", "unordered"),
        ("li", "item"),
        ("div", "structured"),
        ("", "structured"),
    ];

    for (tag, expected) in cases {
        let id = adapter.create_element(tag, Vec::new());
        let kind = &adapter.tree().get(id).unwrap().kind;
        let actual = match kind {
            NodeKind::Irrelevant { .. } => "irrelevant",
            NodeKind::Heading { level: 3, .. } => "heading",
            NodeKind::Paragraph { .. } => "paragraph",
            NodeKind::List { ordered: true, .. } => "ordered",
            NodeKind::List { ordered: false, .. } => "unordered",
            NodeKind::ListItem { .. } => "item",
            NodeKind::Structured { .. } => "structured",
            other => panic!("unexpected {other:?} for '{tag}'"),
        };
        assert_eq!(actual, expected, "tag '{tag}'");
    }
}

// ============================================================================
// Hoisting
// ============================================================================

#[test]
fn test_inline_attached_under_closed_inline_is_hoisted() {
    // <div><p>Hello <strong>world</strong></p></div>, then <em> under <strong>
    let mut adapter = TreeAdapter::new();
    let div = adapter.create_element("div", Vec::new());
    let p = adapter.create_element("p", Vec::new());
    adapter.append_child(adapter.root(), div);
    adapter.append_child(div, p);
    adapter.insert_text(p, "Hello ");
    let strong = adapter.create_element("strong", Vec::new());
    adapter.append_child(p, strong);
    adapter.insert_text(strong, "world");
    let em = adapter.create_element("em", Vec::new());
    adapter.append_child(strong, em);
    let tree = adapter.into_tree();

    let formatting = tree.formatting(p);
    assert_eq!(formatting, &[strong, em]);
    assert_eq!(tree.text(strong), Some("world"));
    assert_eq!(tree.tag(formatting[1]), Some("em"));
    assert_eq!(tree.parent(em), Some(strong));
    assert_eq!(tree.owning_leaf(em), Some(p));
    assert_eq!(tree.text(p), Some("Hello world"));
}

#[test]
fn test_same_tree_from_tokens() {
    let tree = build_tree([
        Token::open("div"),
        Token::open("p"),
        Token::text("Hello "),
        Token::open("strong"),
        Token::text("world"),
        Token::close("strong"),
        Token::close("p"),
        Token::close("div"),
    ]);
    let p = tree.find_by_tag("p").unwrap();
    let strong = tree.find_by_tag("strong").unwrap();
    assert_eq!(tree.formatting(p), &[strong]);
    assert_eq!(tree.text(strong), Some("world"));
}

#[test]
fn test_inline_never_a_structural_child() {
    let tree = parse_fragment(
        "<section><strong>a</strong><div><a href='x'>b</a><span>c<em>d</em></span></div></section>",
    );
    for id in tree.descendants(tree.root()) {
        for &child in tree.children(id) {
            assert!(!tree.is_formatting(child), "inline {child} under {id}");
        }
    }
}

#[test]
fn test_headings_keep_their_formatting() {
    let tree = parse_fragment("<h2>Title <a href='https://x.org'>link</a></h2>");
    let h2 = tree.find_by_tag("h2").unwrap();
    let a = tree.find_by_tag("a").unwrap();
    assert_eq!(tree.formatting(h2), &[a]);
    assert_eq!(tree.text(h2), Some("Title link"));
}

#[test]
fn test_list_children_are_items() {
    let tree = parse_fragment("<ul>\n  <li>one</li>\n  <li>two</li>\n</ul>");
    let ul = tree.find_by_tag("ul").unwrap();
    let children = tree.children(ul);
    assert_eq!(children.len(), 2);
    for &child in children {
        assert!(matches!(
            tree.get(child).unwrap().kind,
            NodeKind::ListItem { .. }
        ));
    }
}

#[test]
fn test_link_attributes_survive_building() {
    let tree = build_tree([
        Token::open("p"),
        Token::open_with(
            "A",
            vec![
                Attribute::new("href", "https://yoast.com"),
                Attribute::new("rel", "nofollow"),
            ],
        ),
        Token::text("x"),
        Token::close("a"),
        Token::close("p"),
    ]);
    let a = tree.find_by_tag("a").unwrap();
    assert_eq!(tree.attribute(a, "rel"), Some("nofollow"));
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_insert_text_is_associative(a in ".{0,20}", b in ".{0,20}") {
        let mut split = TreeAdapter::new();
        let h1 = split.create_element("h1", Vec::new());
        split.insert_text(h1, &a);
        split.insert_text(h1, &b);

        let mut joined = TreeAdapter::new();
        let h2 = joined.create_element("h1", Vec::new());
        joined.insert_text(h2, &format!("{a}{b}"));

        prop_assert_eq!(split.tree().text(h1), joined.tree().text(h2));
    }

    #[test]
    fn prop_nested_formatting_in_encounter_order(depths in prop::collection::vec(0usize..4, 1..12)) {
        // Each new span nests `depth` levels below the paragraph, bounded by
        // the current nesting
        let mut adapter = TreeAdapter::new();
        let p = adapter.create_element("p", Vec::new());
        adapter.append_child(adapter.root(), p);

        let mut stack = vec![p];
        let mut created = Vec::new();
        for depth in depths {
            stack.truncate((depth + 1).min(stack.len()));
            let parent = *stack.last().unwrap();
            let span = adapter.create_element("span", Vec::new());
            adapter.append_child(parent, span);
            created.push(span);
            stack.push(span);
        }

        prop_assert_eq!(adapter.tree().formatting(p), created.as_slice());
    }
}
