//! fOS HTML Parser
//!
//! HTML5 fragment parsing built on html5ever, plus innerHTML/outerHTML
//! serialization for `fos-dom` trees.

mod parser;
mod serializer;

use fos_dom::{Document, DomError, NodeId};

pub use parser::HtmlParser;
pub use serializer::{HtmlSerializer, get_inner_html, get_outer_html};

/// Parse error
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Cannot insert parsed content: {0}")]
    Dom(#[from] DomError),

    #[error("Cannot set innerHTML on non-element {0:?}")]
    NotAnElement(NodeId),
}

/// `element.innerHTML = html`
///
/// Replaces every child of `element` with the parsed fragment. For a
/// `<template>` the template contents are replaced instead.
pub fn set_inner_html(document: &mut Document, element: NodeId, html: &str) -> Result<(), ParseError> {
    if document.tree().element(element).is_none() {
        return Err(ParseError::NotAnElement(element));
    }
    let fragment = HtmlParser::new().parse_fragment(document.tree_mut(), html)?;
    let target = document.tree().template_content(element).unwrap_or(element);
    document.replace_children(target, Some(fragment))?;
    Ok(())
}

/// `element.innerHTML`
pub fn inner_html(document: &Document, element: NodeId) -> String {
    let target = document.tree().template_content(element).unwrap_or(element);
    get_inner_html(document.tree(), target)
}
