//! Tooltip lifecycle and positioning
//!
//! A `Tooltip` is a cheap handle (`Rc`) onto one instance. The dismissal
//! listener and the anchor watcher each hold a handle while the tooltip is
//! open, so an open tooltip stays alive even if the caller drops theirs.
//! Both are released on close.

use std::cell::RefCell;
use std::rc::Rc;

use fos_dom::{Document, ListenerId, ListenerOptions, MutationObserverInit, NodeId, ObserverHandle};

use crate::placement::{self, Placement, Side};
use crate::{ID_ATTR, MARKER_ATTR, TooltipContent, TooltipOptions};

/// Association key: anchor -> instance
const ANCHOR_KEY: &str = "tooltip";
/// Association key: rendered node -> instance
const ELEMENT_KEY: &str = "tooltip-owner";

struct TooltipInner {
    anchor: NodeId,
    options: TooltipOptions,
    state: RefCell<TooltipState>,
}

#[derive(Default)]
struct TooltipState {
    id: u32,
    element: Option<NodeId>,
    placement: Placement,
    watcher: Option<ObserverHandle>,
    close_listener: Option<ListenerId>,
    closing: bool,
}

/// Floating annotation anchored to one element
#[derive(Clone)]
pub struct Tooltip {
    inner: Rc<TooltipInner>,
}

impl Tooltip {
    /// Create a tooltip for `anchor` and open it immediately
    pub fn new(document: &mut Document, anchor: NodeId, options: TooltipOptions) -> Self {
        let tooltip = Self {
            inner: Rc::new(TooltipInner {
                anchor,
                options,
                state: RefCell::new(TooltipState::default()),
            }),
        };
        tooltip.open(document);
        tooltip
    }

    /// Instance most recently opened on `anchor`, if still open
    pub fn for_anchor(document: &Document, anchor: NodeId) -> Option<Self> {
        document
            .association::<TooltipInner>(anchor, ANCHOR_KEY)
            .map(|inner| Self { inner })
    }

    /// Render the tooltip. No-op while already open.
    pub fn open(&self, document: &mut Document) {
        if self.is_open() {
            return;
        }
        let anchor = self.inner.anchor;

        let element = document.create_element("div");
        let id = next_tooltip_id(document);
        if let Some(elem) = document.tree_mut().element_mut(element) {
            elem.set_attribute(MARKER_ATTR, "");
            for class in self.inner.options.tooltip_classes.to_list() {
                elem.add_class(&class);
            }
            elem.set_attribute(ID_ATTR, &id.to_string());
        }
        {
            let mut state = self.inner.state.borrow_mut();
            state.id = id;
            state.element = Some(element);
            state.placement = Placement::default();
        }

        self.update_content(document, self.inner.options.content.clone(), false);

        // Single-fire: detach before closing
        let this = self.clone();
        let listener = document.add_event_listener(
            anchor,
            &self.inner.options.close_event,
            move |document, _event| {
                let own = this.inner.state.borrow_mut().close_listener.take();
                if let Some(own) = own {
                    document.remove_event_listener(this.inner.anchor, own);
                }
                this.close(document);
            },
            ListenerOptions::default(),
        );

        let watcher = match document.tree().parent(anchor) {
            Some(parent) => {
                let this = self.clone();
                Some(document.observe(parent, MutationObserverInit::child_list(), move |document, records| {
                    let removed = records
                        .iter()
                        .any(|record| record.removed_nodes.contains(&this.inner.anchor));
                    if removed {
                        tracing::debug!("Anchor {:?} removed, closing tooltip {}", this.inner.anchor, this.id());
                        this.close(document);
                    }
                }))
            }
            None => {
                tracing::debug!("Anchor {:?} has no parent; removal will not be observed", anchor);
                None
            }
        };
        {
            let mut state = self.inner.state.borrow_mut();
            state.close_listener = Some(listener);
            state.watcher = watcher;
        }

        document.set_association(anchor, ANCHOR_KEY, &self.inner);
        document.set_association(element, ELEMENT_KEY, &self.inner);

        let body = document.body();
        if let Err(err) = document.append_child(body, element) {
            tracing::debug!("Failed to attach tooltip {}: {}", id, err);
        }
        tracing::debug!("Opened tooltip {} on {:?}", id, anchor);

        if let Some(on_open) = self.inner.options.on_open.clone() {
            on_open(document, self);
        }

        self.reposition(document);
    }

    /// Replace the content and reposition
    pub fn set_content(&self, document: &mut Document, content: impl Into<TooltipContent>) {
        self.update_content(document, content, true);
    }

    /// Replace the content; pass `reposition = false` when more changes follow
    pub fn update_content(&self, document: &mut Document, content: impl Into<TooltipContent>, reposition: bool) {
        let Some(element) = self.element() else {
            return;
        };

        match content.into() {
            TooltipContent::Node(node) => {
                let inserted = document.tree().template_content(node).unwrap_or(node);
                if let Err(err) = document.replace_children(element, Some(inserted)) {
                    tracing::debug!("Cannot move {:?} into tooltip {}: {}", node, self.id(), err);
                }
            }
            TooltipContent::Markup(markup) => {
                if let Err(err) = fos_html::set_inner_html(document, element, &markup) {
                    tracing::debug!("Cannot set tooltip {} markup: {}", self.id(), err);
                }
            }
        }

        if reposition {
            self.reposition(document);
        }
    }

    /// Remove the tooltip. Redundant calls are no-ops.
    pub fn close(&self, document: &mut Document) {
        {
            let mut state = self.inner.state.borrow_mut();
            if state.element.is_none() || state.closing {
                return;
            }
            state.closing = true;
        }

        if let Some(on_close) = self.inner.options.on_close.clone() {
            on_close(document, self);
        }

        let (id, element, watcher, listener) = {
            let mut state = self.inner.state.borrow_mut();
            state.closing = false;
            (state.id, state.element.take(), state.watcher.take(), state.close_listener.take())
        };
        let anchor = self.inner.anchor;

        if let Some(element) = element {
            // Our own node, wherever it hangs now; a foreign node reusing the id is left alone
            if let Err(err) = document.remove(element) {
                tracing::debug!("Failed to detach tooltip {}: {}", id, err);
            }
            document.clear_association_if(element, ELEMENT_KEY, &self.inner);
        }
        if let Some(watcher) = watcher {
            watcher.disconnect(document);
        }
        if let Some(listener) = listener {
            document.remove_event_listener(anchor, listener);
        }
        document.clear_association_if(anchor, ANCHOR_KEY, &self.inner);

        tracing::debug!("Closed tooltip {}", id);
    }

    /// Close every tooltip in the document.
    ///
    /// Nodes owned by a live instance go through that instance's `close`;
    /// orphaned marker nodes are simply removed.
    pub fn close_all(document: &mut Document) {
        let nodes = document.elements_with_attribute(MARKER_ATTR);
        tracing::debug!("Closing {} tooltip(s)", nodes.len());

        for node in nodes {
            let owner = document
                .association::<TooltipInner>(node, ELEMENT_KEY)
                .map(|inner| Self { inner })
                .filter(|tooltip| tooltip.element() == Some(node));

            match owner {
                Some(tooltip) => tooltip.close(document),
                None => {
                    if let Err(err) = document.remove(node) {
                        tracing::debug!("Failed to remove tooltip node {:?}: {}", node, err);
                    }
                }
            }
        }
    }

    /// Re-run placement against current geometry. No-op when closed.
    pub fn reposition(&self, document: &mut Document) {
        let Some(element) = self.element() else {
            return;
        };
        let offset = self.inner.options.offset;

        // Earlier passes must not bias the measurement
        if let Some(elem) = document.tree_mut().element_mut(element) {
            elem.update_style(|style| {
                style.remove_property("max-height");
                style.remove_property("left");
                style.remove_property("top");
            });
        }

        let viewport = document.viewport();
        let anchor_rect = document.bounding_client_rect(self.inner.anchor);
        let space = placement::space_available(&anchor_rect, &viewport, offset);

        let tip_rect = document.bounding_client_rect(element);
        let margins = document.computed_margins(element);
        let vertical_margins = margins.vertical();

        let x = placement::horizontal_position(&anchor_rect, tip_rect.width, margins.horizontal(), viewport.client_width);
        let side = placement::choose_side(tip_rect.height, &space);
        let max_height = placement::max_height(side, &space, vertical_margins, tip_rect.height);
        set_style_px(document, element, "max-height", max_height);

        let height = match side {
            Side::Bottom => tip_rect.height,
            // Capping can change the box; measure again
            Side::Top => document.bounding_client_rect(element).height,
        };
        let y = placement::vertical_position(side, &anchor_rect, height, vertical_margins, offset);

        set_style_px(document, element, "left", viewport.scroll_x + x);
        set_style_px(document, element, "top", viewport.scroll_y + y);

        tracing::trace!("Tooltip {} placed {:?} at ({}, {}), max-height {}", self.id(), side, x, y, max_height);
        self.inner.state.borrow_mut().placement = Placement {
            x,
            y,
            side,
            max_height,
            space_available: space,
        };
    }

    /// The rendered node, or `None` when closed
    pub fn element(&self) -> Option<NodeId> {
        self.inner.state.borrow().element
    }

    pub fn is_open(&self) -> bool {
        self.element().is_some()
    }

    /// Id assigned by the most recent open
    pub fn id(&self) -> u32 {
        self.inner.state.borrow().id
    }

    pub fn anchor(&self) -> NodeId {
        self.inner.anchor
    }

    /// Result of the most recent placement pass
    pub fn position(&self) -> Placement {
        self.inner.state.borrow().placement
    }

    pub fn options(&self) -> &TooltipOptions {
        &self.inner.options
    }

    /// Whether both handles refer to the same instance
    pub fn ptr_eq(&self, other: &Tooltip) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl std::fmt::Debug for Tooltip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.state.borrow();
        f.debug_struct("Tooltip")
            .field("id", &state.id)
            .field("anchor", &self.inner.anchor)
            .field("element", &state.element)
            .field("placement", &state.placement)
            .finish()
    }
}

/// One more than the highest id among tooltip nodes in the document, or 1
fn next_tooltip_id(document: &Document) -> u32 {
    document
        .elements_with_attribute(MARKER_ATTR)
        .into_iter()
        .filter_map(|node| document.get_attribute(node, ID_ATTR)?.parse::<u32>().ok())
        .max()
        .map_or(1, |max| max.saturating_add(1))
}

fn set_style_px(document: &mut Document, element: NodeId, property: &str, value: f64) {
    if let Some(elem) = document.tree_mut().element_mut(element) {
        elem.update_style(|style| style.set_px(property, value));
    }
}
