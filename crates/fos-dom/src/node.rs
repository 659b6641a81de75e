//! DOM Node - arena representation
//!
//! Links are stored as `NodeId`s into the owning `DomTree` arena instead of
//! pointers, so nodes can be detached and re-attached without reallocating.

use crate::{DOMTokenList, InlineStyle, NamedNodeMap, NodeId};

/// DOM Node - Core structure
#[derive(Debug)]
pub struct Node {
    /// Parent node (NONE if detached or root)
    pub parent: NodeId,
    /// First child
    pub first_child: NodeId,
    /// Last child (for O(1) append)
    pub last_child: NodeId,
    /// Previous sibling
    pub prev_sibling: NodeId,
    /// Next sibling
    pub next_sibling: NodeId,
    /// Node-specific data
    pub data: NodeData,
}

impl Node {
    fn with_data(data: NodeData) -> Self {
        Self {
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            prev_sibling: NodeId::NONE,
            next_sibling: NodeId::NONE,
            data,
        }
    }

    /// Create a new element node
    pub fn element(tag: &str) -> Self {
        Self::with_data(NodeData::Element(ElementData::new(tag)))
    }

    /// Create a new text node
    pub fn text(content: impl Into<String>) -> Self {
        Self::with_data(NodeData::Text(content.into()))
    }

    /// Create a comment node
    pub fn comment(content: impl Into<String>) -> Self {
        Self::with_data(NodeData::Comment(content.into()))
    }

    /// Create a document node
    pub fn document() -> Self {
        Self::with_data(NodeData::Document)
    }

    /// Create a document fragment node
    pub fn fragment() -> Self {
        Self::with_data(NodeData::Fragment)
    }

    #[inline]
    pub fn is_fragment(&self) -> bool {
        matches!(self.data, NodeData::Fragment)
    }

    #[inline]
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text(t) => Some(t),
            _ => None,
        }
    }
}

/// Node-specific data
#[derive(Debug)]
pub enum NodeData {
    /// Document root
    Document,
    /// Document fragment (also holds `<template>` contents)
    Fragment,
    /// Element
    Element(ElementData),
    /// Text content
    Text(String),
    /// Comment
    Comment(String),
}

/// Element-specific data
#[derive(Debug)]
pub struct ElementData {
    /// Lowercase local tag name
    pub tag: String,
    /// Attributes in source order
    pub attrs: NamedNodeMap,
    /// Inert contents fragment for `<template>`, NONE otherwise
    pub template_content: NodeId,
}

impl ElementData {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attrs: NamedNodeMap::new(),
            template_content: NodeId::NONE,
        }
    }

    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attrs.get_attribute(name)
    }

    pub fn set_attribute(&mut self, name: &str, value: &str) {
        self.attrs.set_attribute(name, value);
    }

    pub fn remove_attribute(&mut self, name: &str) {
        self.attrs.remove_attribute(name);
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attrs.has_attribute(name)
    }

    /// Snapshot of the class list
    pub fn class_list(&self) -> DOMTokenList {
        DOMTokenList::from_string(self.get_attribute("class").unwrap_or_default())
    }

    /// Write back a class list into the `class` attribute
    pub fn set_class_list(&mut self, list: &DOMTokenList) {
        if list.is_empty() {
            self.remove_attribute("class");
        } else {
            self.set_attribute("class", &list.value());
        }
    }

    pub fn add_class(&mut self, class: &str) {
        let mut list = self.class_list();
        list.add(class);
        self.set_class_list(&list);
    }

    /// Snapshot of the inline style
    pub fn style(&self) -> InlineStyle {
        InlineStyle::parse(self.get_attribute("style").unwrap_or_default())
    }

    /// Write back an inline style into the `style` attribute
    pub fn set_style(&mut self, style: &InlineStyle) {
        if style.is_empty() {
            self.remove_attribute("style");
        } else {
            self.set_attribute("style", &style.css_text());
        }
    }

    /// Edit the inline style in place
    pub fn update_style(&mut self, f: impl FnOnce(&mut InlineStyle)) {
        let mut style = self.style();
        f(&mut style);
        self.set_style(&style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_list_roundtrip() {
        let mut elem = ElementData::new("DIV");
        assert_eq!(elem.tag, "div");

        elem.add_class("tooltip");
        elem.add_class("tooltip-wide");
        elem.add_class("tooltip");
        assert_eq!(elem.get_attribute("class"), Some("tooltip tooltip-wide"));
        assert!(elem.class_list().contains("tooltip-wide"));
    }

    #[test]
    fn test_update_style() {
        let mut elem = ElementData::new("div");
        elem.update_style(|s| s.set_px("left", 12.0));
        assert_eq!(elem.get_attribute("style"), Some("left: 12px;"));

        elem.update_style(|s| {
            s.remove_property("left");
        });
        assert!(!elem.has_attribute("style"));
    }
}
