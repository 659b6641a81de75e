//! HTML5 Parser implementation
//!
//! Uses html5ever's built-in RcDom and converts the result into our arena
//! DOM. Markup is parsed with the fragment algorithm in a `<body>` context,
//! so leading whitespace and comments survive exactly as written.

use fos_dom::{DomResult, DomTree, NodeId};
use html5ever::tendril::TendrilSink;
use html5ever::{QualName, local_name, ns, parse_fragment};
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};

/// HTML5 parser
pub struct HtmlParser;

impl HtmlParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse markup into a new detached fragment of `tree`
    pub fn parse_fragment(&self, tree: &mut DomTree, html: &str) -> DomResult<NodeId> {
        let context = QualName::new(None, ns!(html), local_name!("body"));
        let dom = parse_fragment(RcDom::default(), Default::default(), context, vec![], true).one(html);
        let fragment = tree.create_fragment();

        // The tree builder roots the fragment under a synthetic <html>
        let root = dom.document.children.borrow().first().cloned();
        if let Some(root) = root {
            for child in root.children.borrow().iter() {
                self.convert_node(child, tree, fragment)?;
            }
        }

        tracing::debug!("Parsed fragment of {} bytes into {} node(s)", html.len(), tree.child_ids(fragment).len());
        Ok(fragment)
    }

    /// Convert an RcDom node to our DOM format
    fn convert_node(&self, handle: &Handle, tree: &mut DomTree, parent: NodeId) -> DomResult<()> {
        match &handle.data {
            RcNodeData::Document => {
                for child in handle.children.borrow().iter() {
                    self.convert_node(child, tree, parent)?;
                }
            }
            RcNodeData::Text { contents } => {
                let id = tree.create_text(&contents.borrow());
                tree.append_child(parent, id)?;
            }
            RcNodeData::Comment { contents } => {
                let id = tree.create_comment(contents);
                tree.append_child(parent, id)?;
            }
            RcNodeData::Element { name, attrs, template_contents, .. } => {
                let id = tree.create_element(&*name.local);

                if let Some(elem) = tree.element_mut(id) {
                    for attr in attrs.borrow().iter() {
                        elem.set_attribute(&*attr.name.local, &attr.value);
                    }
                }
                tree.append_child(parent, id)?;

                // Template children live in the inert contents fragment
                let content_parent = tree.template_content(id).unwrap_or(id);
                if let Some(contents) = template_contents.borrow().as_ref() {
                    for child in contents.children.borrow().iter() {
                        self.convert_node(child, tree, content_parent)?;
                    }
                }
                for child in handle.children.borrow().iter() {
                    self.convert_node(child, tree, content_parent)?;
                }
            }
            RcNodeData::Doctype { .. } | RcNodeData::ProcessingInstruction { .. } => {
                // Not meaningful inside a fragment
            }
        }
        Ok(())
    }
}

impl Default for HtmlParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fragment_children() {
        let mut tree = DomTree::new();
        let frag = HtmlParser::new()
            .parse_fragment(&mut tree, "<b>bold</b> and <i>italic</i>")
            .unwrap();

        let kids = tree.child_ids(frag);
        assert_eq!(kids.len(), 3);
        assert_eq!(tree.element(kids[0]).map(|e| e.tag.as_str()), Some("b"));
        assert_eq!(tree.text_content(frag), "bold and italic");
    }

    #[test]
    fn test_parse_plain_text() {
        let mut tree = DomTree::new();
        let frag = HtmlParser::new().parse_fragment(&mut tree, "Save changes").unwrap();
        assert_eq!(tree.text_content(frag), "Save changes");
    }

    #[test]
    fn test_parse_empty() {
        let mut tree = DomTree::new();
        let frag = HtmlParser::new().parse_fragment(&mut tree, "").unwrap();
        assert!(tree.child_ids(frag).is_empty());
    }

    #[test]
    fn test_parse_attributes() {
        let mut tree = DomTree::new();
        let frag = HtmlParser::new()
            .parse_fragment(&mut tree, r#"<span class="hint key" data-k="S">x</span>"#)
            .unwrap();

        let span = tree.child_ids(frag)[0];
        let elem = tree.element(span).unwrap();
        assert!(elem.class_list().contains("key"));
        assert_eq!(elem.get_attribute("data-k"), Some("S"));
    }

    #[test]
    fn test_parse_template_contents() {
        let mut tree = DomTree::new();
        let frag = HtmlParser::new()
            .parse_fragment(&mut tree, "<template><em>inert</em></template>")
            .unwrap();

        let template = tree.child_ids(frag)[0];
        assert!(tree.child_ids(template).is_empty());
        let content = tree.template_content(template).unwrap();
        assert_eq!(tree.text_content(content), "inert");
    }
}
