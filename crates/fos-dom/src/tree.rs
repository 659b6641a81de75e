//! DOM Tree (arena-based allocation)
//!
//! Nodes are never freed; removal only unlinks them. Every structural change
//! appends a child-list record to the tree's journal, which the owning
//! `Document` routes to mutation observers.

use crate::{DomError, DomResult, ElementData, MutationRecord, Node, NodeData, NodeId};

/// Arena-based DOM tree
#[derive(Debug)]
pub struct DomTree {
    nodes: Vec<Node>,
    journal: Vec<MutationRecord>,
}

impl DomTree {
    /// Create a tree holding only the document root
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::document()],
            journal: Vec::new(),
        }
    }

    /// Root (document) node
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Number of nodes ever allocated
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(Node::as_element)
    }

    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.get_mut(id).and_then(Node::as_element_mut)
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Create a detached element. `<template>` gets its contents fragment.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let id = self.push(Node::element(tag));
        let is_template = self.element(id).is_some_and(|e| e.tag == "template");
        if is_template {
            let content = self.create_fragment();
            if let Some(elem) = self.element_mut(id) {
                elem.template_content = content;
            }
        }
        id
    }

    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(Node::text(text))
    }

    pub fn create_comment(&mut self, text: &str) -> NodeId {
        self.push(Node::comment(text))
    }

    pub fn create_fragment(&mut self) -> NodeId {
        self.push(Node::fragment())
    }

    /// Contents fragment of a `<template>` element
    pub fn template_content(&self, id: NodeId) -> Option<NodeId> {
        self.element(id)
            .map(|e| e.template_content)
            .filter(NodeId::is_valid)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).map(|n| n.parent).filter(NodeId::is_valid)
    }

    /// Iterate over direct children
    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            tree: self,
            next: self.get(id).map_or(NodeId::NONE, |n| n.first_child),
        }
    }

    pub fn child_ids(&self, id: NodeId) -> Vec<NodeId> {
        self.children(id).map(|(child, _)| child).collect()
    }

    /// All descendants in tree order (pre-order), excluding `root`
    pub fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.child_ids(root).into_iter().rev().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.child_ids(id).into_iter().rev());
        }
        out
    }

    /// Check whether `ancestor` is `node` or one of its ancestors
    pub fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = node;
        while current.is_valid() {
            if current == ancestor {
                return true;
            }
            current = self.get(current).map_or(NodeId::NONE, |n| n.parent);
        }
        false
    }

    /// Whether the node is reachable from the document root
    pub fn is_connected(&self, id: NodeId) -> bool {
        self.is_inclusive_ancestor(NodeId::ROOT, id)
    }

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self, id: NodeId) -> String {
        self.descendants(id)
            .into_iter()
            .filter_map(|d| self.get(d).and_then(Node::as_text))
            .collect()
    }

    /// Elements under `root` carrying `name`, in tree order
    pub fn elements_with_attribute(&self, root: NodeId, name: &str) -> Vec<NodeId> {
        self.descendants(root)
            .into_iter()
            .filter(|&id| self.element(id).is_some_and(|e| e.has_attribute(name)))
            .collect()
    }

    /// Append `child` to `parent`, moving it from its old position if attached.
    /// Appending a fragment moves the fragment's children instead.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        self.validate_insert(parent, child)?;

        let moved = if self.get(child).is_some_and(Node::is_fragment) {
            let kids = self.child_ids(child);
            if !kids.is_empty() {
                self.unlink_all(child);
            }
            kids
        } else {
            if let Some(old_parent) = self.parent(child) {
                self.remove_child(old_parent, child)?;
            }
            vec![child]
        };

        if moved.is_empty() {
            return Ok(child);
        }

        let previous_sibling = self.get(parent).map(|n| n.last_child).filter(NodeId::is_valid);
        for &id in &moved {
            self.link_last(parent, id);
        }
        self.journal.push(MutationRecord::child_list(
            parent,
            moved,
            Vec::new(),
            previous_sibling,
            None,
        ));
        Ok(child)
    }

    /// Remove `child` from `parent`
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        let node = self.get(child).ok_or(DomError::NotFound(child))?;
        if node.parent != parent {
            return Err(DomError::NotAChild { parent, child });
        }
        let previous_sibling = Some(node.prev_sibling).filter(NodeId::is_valid);
        let next_sibling = Some(node.next_sibling).filter(NodeId::is_valid);

        self.unlink(child);
        self.journal.push(MutationRecord::child_list(
            parent,
            Vec::new(),
            vec![child],
            previous_sibling,
            next_sibling,
        ));
        Ok(child)
    }

    /// Detach a node from its parent (`ChildNode.remove()`); detached nodes are a no-op
    pub fn remove(&mut self, id: NodeId) -> DomResult<()> {
        match self.parent(id) {
            Some(parent) => self.remove_child(parent, id).map(|_| ()),
            None => Ok(()),
        }
    }

    /// Replace all children of `parent` with `node` (or nothing)
    pub fn replace_children(&mut self, parent: NodeId, node: Option<NodeId>) -> DomResult<()> {
        if let Some(node) = node {
            self.validate_insert(parent, node)?;
            if let Some(old_parent) = self.parent(node) {
                self.remove_child(old_parent, node)?;
            }
        }

        let removed = self.child_ids(parent);
        let added = match node {
            Some(node) if self.get(node).is_some_and(Node::is_fragment) => {
                let kids = self.child_ids(node);
                self.unlink_all(node);
                kids
            }
            Some(node) => vec![node],
            None => Vec::new(),
        };

        if removed.is_empty() && added.is_empty() {
            return Ok(());
        }

        self.unlink_all(parent);
        for &id in &added {
            self.link_last(parent, id);
        }
        self.journal.push(MutationRecord::child_list(parent, added, removed, None, None));
        Ok(())
    }

    /// Drain pending child-list records
    pub(crate) fn take_journal(&mut self) -> Vec<MutationRecord> {
        std::mem::take(&mut self.journal)
    }

    fn validate_insert(&self, parent: NodeId, child: NodeId) -> DomResult<()> {
        let parent_node = self.get(parent).ok_or(DomError::NotFound(parent))?;
        let child_node = self.get(child).ok_or(DomError::NotFound(child))?;

        let parent_ok = matches!(
            parent_node.data,
            NodeData::Document | NodeData::Fragment | NodeData::Element(_)
        );
        if !parent_ok || matches!(child_node.data, NodeData::Document) {
            return Err(DomError::InvalidNodeType(child));
        }
        if self.is_inclusive_ancestor(child, parent) {
            return Err(DomError::HierarchyRequest { parent, child });
        }
        Ok(())
    }

    fn link_last(&mut self, parent: NodeId, child: NodeId) {
        let last = self.nodes[parent.index()].last_child;
        {
            let node = &mut self.nodes[child.index()];
            node.parent = parent;
            node.prev_sibling = last;
            node.next_sibling = NodeId::NONE;
        }
        if last.is_valid() {
            self.nodes[last.index()].next_sibling = child;
        } else {
            self.nodes[parent.index()].first_child = child;
        }
        self.nodes[parent.index()].last_child = child;
    }

    fn unlink(&mut self, child: NodeId) {
        let (parent, prev, next) = {
            let node = &self.nodes[child.index()];
            (node.parent, node.prev_sibling, node.next_sibling)
        };
        if prev.is_valid() {
            self.nodes[prev.index()].next_sibling = next;
        } else if parent.is_valid() {
            self.nodes[parent.index()].first_child = next;
        }
        if next.is_valid() {
            self.nodes[next.index()].prev_sibling = prev;
        } else if parent.is_valid() {
            self.nodes[parent.index()].last_child = prev;
        }
        let node = &mut self.nodes[child.index()];
        node.parent = NodeId::NONE;
        node.prev_sibling = NodeId::NONE;
        node.next_sibling = NodeId::NONE;
    }

    fn unlink_all(&mut self, parent: NodeId) {
        for child in self.child_ids(parent) {
            self.unlink(child);
        }
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over a node's children
pub struct Children<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl<'a> Iterator for Children<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next;
        let node = self.tree.get(id)?;
        self.next = node.next_sibling;
        Some((id, node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_and_order() {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        let a = tree.create_text("a");
        let b = tree.create_text("b");

        tree.append_child(tree.root(), div).unwrap();
        tree.append_child(div, a).unwrap();
        tree.append_child(div, b).unwrap();

        assert_eq!(tree.child_ids(div), vec![a, b]);
        assert_eq!(tree.parent(b), Some(div));
        assert_eq!(tree.text_content(div), "ab");
        assert!(tree.is_connected(b));
    }

    #[test]
    fn test_remove_child_records() {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        let span = tree.create_element("span");
        tree.append_child(tree.root(), div).unwrap();
        tree.append_child(div, span).unwrap();
        tree.take_journal();

        tree.remove_child(div, span).unwrap();
        let records = tree.take_journal();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].target, div);
        assert_eq!(records[0].removed_nodes, vec![span]);
        assert!(!tree.is_connected(span));
    }

    #[test]
    fn test_remove_child_wrong_parent() {
        let mut tree = DomTree::new();
        let a = tree.create_element("div");
        let b = tree.create_element("div");
        tree.append_child(tree.root(), a).unwrap();

        assert_eq!(
            tree.remove_child(b, a),
            Err(DomError::NotAChild { parent: b, child: a })
        );
    }

    #[test]
    fn test_hierarchy_request() {
        let mut tree = DomTree::new();
        let outer = tree.create_element("div");
        let inner = tree.create_element("div");
        tree.append_child(outer, inner).unwrap();

        assert!(matches!(
            tree.append_child(inner, outer),
            Err(DomError::HierarchyRequest { .. })
        ));
    }

    #[test]
    fn test_fragment_moves_children() {
        let mut tree = DomTree::new();
        let frag = tree.create_fragment();
        let x = tree.create_element("b");
        let y = tree.create_element("i");
        tree.append_child(frag, x).unwrap();
        tree.append_child(frag, y).unwrap();

        let host = tree.create_element("div");
        tree.append_child(host, frag).unwrap();

        assert_eq!(tree.child_ids(host), vec![x, y]);
        assert!(tree.child_ids(frag).is_empty());
    }

    #[test]
    fn test_replace_children() {
        let mut tree = DomTree::new();
        let host = tree.create_element("div");
        let old = tree.create_text("old");
        tree.append_child(host, old).unwrap();

        let new = tree.create_element("p");
        tree.replace_children(host, Some(new)).unwrap();
        assert_eq!(tree.child_ids(host), vec![new]);
        assert_eq!(tree.parent(old), None);

        tree.replace_children(host, None).unwrap();
        assert!(tree.child_ids(host).is_empty());
    }

    #[test]
    fn test_template_has_content() {
        let mut tree = DomTree::new();
        let template = tree.create_element("template");
        let div = tree.create_element("div");

        assert!(tree.template_content(template).is_some());
        assert!(tree.template_content(div).is_none());
    }

    #[test]
    fn test_descendants_preorder() {
        let mut tree = DomTree::new();
        let a = tree.create_element("a");
        let b = tree.create_element("b");
        let c = tree.create_element("c");
        tree.append_child(tree.root(), a).unwrap();
        tree.append_child(a, b).unwrap();
        tree.append_child(tree.root(), c).unwrap();

        assert_eq!(tree.descendants(tree.root()), vec![a, b, c]);
    }
}
