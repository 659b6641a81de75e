//! Layout provider seam
//!
//! The DOM does not lay itself out. Geometry queries
//! (`getBoundingClientRect`, computed margins) are answered by whatever
//! layout engine the host installs on the `Document`.

use std::collections::HashMap;

use crate::{DOMRect, DomTree, EdgeSizes, NodeId, Size, Viewport};

/// Source of layout geometry for DOM nodes
pub trait LayoutProvider {
    /// Border box of `node` in viewport coordinates
    fn bounding_client_rect(&self, tree: &DomTree, viewport: &Viewport, node: NodeId) -> DOMRect;

    /// Computed margins of `node`
    fn margins(&self, tree: &DomTree, node: NodeId) -> EdgeSizes;
}

/// Deterministic layout for hosts without a real layout pass.
///
/// Every node is treated as absolutely positioned:
/// - an explicit rect registered with [`StaticLayout::set_rect`] wins;
/// - otherwise `left`/`top` are read from the inline style (document
///   coordinates, so scroll is subtracted) and the size comes from inline
///   `width`/`height`, a per-node size, or the first matching class size;
/// - a non-negative inline `max-height` caps the height.
#[derive(Debug, Clone, Default)]
pub struct StaticLayout {
    rects: HashMap<NodeId, DOMRect>,
    sizes: HashMap<NodeId, Size>,
    class_sizes: Vec<(String, Size)>,
    margins: HashMap<NodeId, EdgeSizes>,
    class_margins: Vec<(String, EdgeSizes)>,
}

impl StaticLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin a node to a fixed client rect
    pub fn set_rect(&mut self, node: NodeId, rect: DOMRect) {
        self.rects.insert(node, rect);
    }

    /// Intrinsic size of one node
    pub fn set_size(&mut self, node: NodeId, size: Size) {
        self.sizes.insert(node, size);
    }

    pub fn set_margins(&mut self, node: NodeId, margins: EdgeSizes) {
        self.margins.insert(node, margins);
    }

    /// Intrinsic size for every element carrying `class`
    pub fn with_class_size(mut self, class: &str, size: Size) -> Self {
        self.class_sizes.push((class.to_string(), size));
        self
    }

    /// Margins for every element carrying `class`
    pub fn with_class_margins(mut self, class: &str, margins: EdgeSizes) -> Self {
        self.class_margins.push((class.to_string(), margins));
        self
    }

    fn class_rule<T: Copy>(rules: &[(String, T)], tree: &DomTree, node: NodeId) -> Option<T> {
        let classes = tree.element(node)?.class_list();
        rules
            .iter()
            .find(|(class, _)| classes.contains(class))
            .map(|(_, value)| *value)
    }
}

impl LayoutProvider for StaticLayout {
    fn bounding_client_rect(&self, tree: &DomTree, viewport: &Viewport, node: NodeId) -> DOMRect {
        if let Some(rect) = self.rects.get(&node) {
            return *rect;
        }
        let Some(elem) = tree.element(node) else {
            return DOMRect::default();
        };
        let style = elem.style();

        let intrinsic = self
            .sizes
            .get(&node)
            .copied()
            .or_else(|| Self::class_rule(&self.class_sizes, tree, node))
            .unwrap_or_default();
        let width = style.px("width").unwrap_or(intrinsic.width);
        let mut height = style.px("height").unwrap_or(intrinsic.height);
        // Negative max-height is invalid CSS and ignored
        if let Some(max) = style.px("max-height").filter(|max| *max >= 0.0) {
            height = height.min(max);
        }

        let x = style.px("left").unwrap_or(0.0) - viewport.scroll_x;
        let y = style.px("top").unwrap_or(0.0) - viewport.scroll_y;
        DOMRect::from_xywh(x, y, width, height)
    }

    fn margins(&self, tree: &DomTree, node: NodeId) -> EdgeSizes {
        self.margins
            .get(&node)
            .copied()
            .or_else(|| Self::class_rule(&self.class_margins, tree, node))
            .unwrap_or_default()
    }
}
