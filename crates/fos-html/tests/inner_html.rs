//! innerHTML tests for fos-html
//!
//! Parsing markup into live documents and reading it back.

use fos_dom::Document;
use fos_html::{ParseError, inner_html, set_inner_html};

// ============================================================================
// ROUND TRIP
// ============================================================================

#[test]
fn test_markup_roundtrip_verbatim() {
    let mut doc = Document::default();
    let div = doc.create_element("div");
    let body = doc.body();
    doc.append_child(body, div).unwrap();

    let markup = r#"Press <kbd class="key">Ctrl</kbd> + <kbd class="key">S</kbd><br>to save"#;
    set_inner_html(&mut doc, div, markup).unwrap();

    assert_eq!(inner_html(&doc, div), markup);
}

#[test]
fn test_set_replaces_existing_children() {
    let mut doc = Document::default();
    let div = doc.create_element("div");
    set_inner_html(&mut doc, div, "<p>first</p><p>second</p>").unwrap();
    set_inner_html(&mut doc, div, "third").unwrap();

    assert_eq!(inner_html(&doc, div), "third");
    assert_eq!(doc.tree().child_ids(div).len(), 1);
}

#[test]
fn test_empty_markup_clears() {
    let mut doc = Document::default();
    let div = doc.create_element("div");
    set_inner_html(&mut doc, div, "<b>x</b>").unwrap();
    set_inner_html(&mut doc, div, "").unwrap();

    assert!(doc.tree().child_ids(div).is_empty());
    assert_eq!(inner_html(&doc, div), "");
}

#[test]
fn test_entities_are_decoded_then_escaped() {
    let mut doc = Document::default();
    let div = doc.create_element("div");
    set_inner_html(&mut doc, div, "a &amp; b &lt; c").unwrap();

    assert_eq!(doc.tree().text_content(div), "a & b < c");
    assert_eq!(inner_html(&doc, div), "a &amp; b &lt; c");
}

#[test]
fn test_leading_whitespace_kept() {
    let mut doc = Document::default();
    let div = doc.create_element("div");
    set_inner_html(&mut doc, div, "  <b>x</b>").unwrap();

    assert_eq!(inner_html(&doc, div), "  <b>x</b>");
}

#[test]
fn test_leading_comment_kept() {
    let mut doc = Document::default();
    let div = doc.create_element("div");
    set_inner_html(&mut doc, div, "<!--note-->hi").unwrap();
    assert_eq!(inner_html(&doc, div), "<!--note-->hi");

    set_inner_html(&mut doc, div, "hi<!--note-->").unwrap();
    assert_eq!(inner_html(&doc, div), "hi<!--note-->");
}

#[test]
fn test_head_only_tags_stay_in_place() {
    let mut doc = Document::default();
    let div = doc.create_element("div");
    set_inner_html(&mut doc, div, "<b>a</b><style>b{}</style>c").unwrap();

    assert_eq!(inner_html(&doc, div), "<b>a</b><style>b{}</style>c");
}

// ============================================================================
// TEMPLATES AND ERRORS
// ============================================================================

#[test]
fn test_template_inner_html_targets_contents() {
    let mut doc = Document::default();
    let template = doc.create_element("template");
    set_inner_html(&mut doc, template, "<span>hint</span>").unwrap();

    assert!(doc.tree().child_ids(template).is_empty());
    assert_eq!(inner_html(&doc, template), "<span>hint</span>");
}

#[test]
fn test_text_node_rejected() {
    let mut doc = Document::default();
    let text = doc.create_text("plain");

    let err = set_inner_html(&mut doc, text, "<b>x</b>").unwrap_err();
    assert!(matches!(err, ParseError::NotAnElement(id) if id == text));
}
