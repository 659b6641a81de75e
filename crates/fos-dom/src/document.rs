//! Document - High-level document API
//!
//! Owns the tree plus everything that hangs off it at runtime: viewport
//! metrics, the installed layout provider, event listeners, mutation
//! observers, and weak node associations (expando-style back references).

use std::any::Any;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use crate::events::ListenerRegistry;
use crate::observer::ObserverRegistry;
use crate::{
    DOMRect, DomResult, DomTree, EdgeSizes, Event, LayoutProvider, ListenerId, ListenerOptions,
    MutationObserverInit, MutationRecord, NodeId, ObserverHandle, StaticLayout, Viewport,
};

/// HTML Document
pub struct Document {
    tree: DomTree,
    url: String,
    html_element: NodeId,
    head_element: NodeId,
    body_element: NodeId,
    viewport: Viewport,
    layout: Box<dyn LayoutProvider>,
    observers: ObserverRegistry,
    listeners: ListenerRegistry,
    associations: HashMap<(NodeId, &'static str), Weak<dyn Any>>,
}

impl Document {
    /// Create a document with `<html><head></head><body></body></html>`
    pub fn new(url: &str) -> Self {
        let mut tree = DomTree::new();
        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");

        if let Err(err) = Self::link_skeleton(&mut tree, html, head, body) {
            tracing::error!("Failed to build document skeleton: {}", err);
        }
        tree.take_journal();

        Self {
            tree,
            url: url.to_string(),
            html_element: html,
            head_element: head,
            body_element: body,
            viewport: Viewport::default(),
            layout: Box::new(StaticLayout::new()),
            observers: ObserverRegistry::default(),
            listeners: ListenerRegistry::default(),
            associations: HashMap::new(),
        }
    }

    fn link_skeleton(tree: &mut DomTree, html: NodeId, head: NodeId, body: NodeId) -> DomResult<()> {
        let root = tree.root();
        tree.append_child(root, html)?;
        tree.append_child(html, head)?;
        tree.append_child(html, body)?;
        Ok(())
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get `<html>` element
    pub fn document_element(&self) -> NodeId {
        self.html_element
    }

    /// Get `<head>` element
    pub fn head(&self) -> NodeId {
        self.head_element
    }

    /// Get `<body>` element
    pub fn body(&self) -> NodeId {
        self.body_element
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably.
    ///
    /// Structural changes made here are routed to observers at the next
    /// document-level mutation or `flush_mutations`.
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }

    // ------------------------------------------------------------------
    // Viewport and layout
    // ------------------------------------------------------------------

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// `window.scrollTo(x, y)`
    pub fn scroll_to(&mut self, x: f64, y: f64) {
        self.viewport = self.viewport.scrolled_to(x, y);
    }

    /// Install the layout engine that answers geometry queries
    pub fn set_layout(&mut self, layout: impl LayoutProvider + 'static) {
        self.layout = Box::new(layout);
    }

    /// `element.getBoundingClientRect()`
    pub fn bounding_client_rect(&self, node: NodeId) -> DOMRect {
        self.layout.bounding_client_rect(&self.tree, &self.viewport, node)
    }

    /// Margins from `getComputedStyle(element)`
    pub fn computed_margins(&self, node: NodeId) -> EdgeSizes {
        self.layout.margins(&self.tree, node)
    }

    // ------------------------------------------------------------------
    // Tree mutation
    // ------------------------------------------------------------------

    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.tree.create_element(tag)
    }

    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.tree.create_text(text)
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        let result = self.tree.append_child(parent, child);
        self.route_journal();
        result
    }

    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        let result = self.tree.remove_child(parent, child);
        self.route_journal();
        result
    }

    /// `node.remove()`
    pub fn remove(&mut self, node: NodeId) -> DomResult<()> {
        let result = self.tree.remove(node);
        self.route_journal();
        result
    }

    /// `parent.replaceChildren(node)`
    pub fn replace_children(&mut self, parent: NodeId, node: Option<NodeId>) -> DomResult<()> {
        let result = self.tree.replace_children(parent, node);
        self.route_journal();
        result
    }

    pub fn get_attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.tree.element(node)?.get_attribute(name)
    }

    /// Set an attribute; non-elements are ignored
    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(elem) = self.tree.element_mut(node) {
            elem.set_attribute(name, value);
        }
    }

    /// Elements in the document carrying `name`, in tree order
    pub fn elements_with_attribute(&self, name: &str) -> Vec<NodeId> {
        self.tree.elements_with_attribute(self.tree.root(), name)
    }

    // ------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------

    pub fn add_event_listener(
        &mut self,
        target: NodeId,
        event_type: &str,
        listener: impl Fn(&mut Document, &Event) + 'static,
        options: ListenerOptions,
    ) -> ListenerId {
        self.listeners.add(target, event_type, Rc::new(listener), options)
    }

    pub fn remove_event_listener(&mut self, target: NodeId, id: ListenerId) -> bool {
        self.listeners.remove(target, id)
    }

    /// Number of listeners registered on `target`
    pub fn listener_count(&self, target: NodeId) -> usize {
        self.listeners.count(target)
    }

    /// Dispatch `event` at `target`, bubbling to ancestors if the event
    /// bubbles. Returns the number of listeners invoked.
    ///
    /// Listeners are snapshotted per node before invocation; one removed by
    /// an earlier listener in the same dispatch is skipped.
    pub fn dispatch_event(&mut self, target: NodeId, mut event: Event) -> usize {
        event.target = target;

        let mut path = vec![target];
        if event.bubbles {
            let mut current = self.tree.parent(target);
            while let Some(node) = current {
                path.push(node);
                current = self.tree.parent(node);
            }
        }

        let mut invoked = 0;
        for node in path {
            event.current_target = node;
            for (id, listener, options) in self.listeners.matching(node, &event.event_type) {
                if !self.listeners.contains(node, id) {
                    continue;
                }
                if options.once {
                    self.listeners.remove(node, id);
                }
                listener(self, &event);
                invoked += 1;
            }
        }
        tracing::trace!("Dispatched {} to {:?}: {} listener(s)", event.event_type, target, invoked);
        invoked
    }

    // ------------------------------------------------------------------
    // Mutation observers
    // ------------------------------------------------------------------

    /// `new MutationObserver(callback).observe(target, options)`
    pub fn observe(
        &mut self,
        target: NodeId,
        options: MutationObserverInit,
        callback: impl Fn(&mut Document, &[MutationRecord]) + 'static,
    ) -> ObserverHandle {
        self.route_journal();
        self.observers.observe(target, options, Rc::new(callback))
    }

    pub fn is_observing(&self, handle: &ObserverHandle) -> bool {
        self.observers.is_connected(handle.id())
    }

    /// Number of connected observers
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Microtask checkpoint: deliver queued records, one batch per observer,
    /// until no observer has pending records. Returns batches delivered.
    pub fn flush_mutations(&mut self) -> usize {
        let mut delivered = 0;
        loop {
            self.route_journal();
            let Some((callback, records)) = self.observers.take_next_batch() else {
                break;
            };
            callback(self, &records);
            delivered += 1;
        }
        delivered
    }

    /// Whether any records await delivery
    pub fn has_pending_mutations(&mut self) -> bool {
        self.route_journal();
        self.observers.has_pending()
    }

    pub(crate) fn observers_mut(&mut self) -> &mut ObserverRegistry {
        self.route_journal();
        &mut self.observers
    }

    fn route_journal(&mut self) {
        let records = self.tree.take_journal();
        if !records.is_empty() {
            self.observers.route(&self.tree, records);
        }
    }

    // ------------------------------------------------------------------
    // Weak associations
    // ------------------------------------------------------------------

    /// Associate `value` with `node` under `key` without keeping it alive
    pub fn set_association<T: Any>(&mut self, node: NodeId, key: &'static str, value: &Rc<T>) {
        let value: Rc<dyn Any> = value.clone();
        self.associations.insert((node, key), Rc::downgrade(&value));
    }

    /// Live value associated with `node` under `key`
    pub fn association<T: Any>(&self, node: NodeId, key: &'static str) -> Option<Rc<T>> {
        self.associations
            .get(&(node, key))?
            .upgrade()?
            .downcast::<T>()
            .ok()
    }

    /// Remove the association only if it still points at `value`
    pub fn clear_association_if<T: Any>(&mut self, node: NodeId, key: &'static str, value: &Rc<T>) {
        let matches = self
            .associations
            .get(&(node, key))
            .is_some_and(|weak| std::ptr::addr_eq(weak.as_ptr(), Rc::as_ptr(value)));
        if matches {
            self.associations.remove(&(node, key));
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("about:blank")
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("url", &self.url)
            .field("nodes", &self.tree.len())
            .field("viewport", &self.viewport)
            .field("observers", &self.observers)
            .field("listeners", &self.listeners)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    #[test]
    fn test_new_document_structure() {
        let doc = Document::default();
        assert_eq!(doc.url(), "about:blank");
        assert_eq!(doc.tree().parent(doc.body()), Some(doc.document_element()));
        assert_eq!(doc.tree().parent(doc.head()), Some(doc.document_element()));
        assert!(doc.tree().is_connected(doc.body()));
    }

    #[test]
    fn test_document_url() {
        let doc = Document::new("https://example.com/app");
        assert_eq!(doc.url(), "https://example.com/app");
        assert_eq!(doc.tree().child_ids(doc.document_element()), vec![doc.head(), doc.body()]);
    }

    #[test]
    fn test_observer_batches_removals() {
        let mut doc = Document::default();
        let list = doc.create_element("ul");
        let a = doc.create_element("li");
        let b = doc.create_element("li");
        let body = doc.body();
        doc.append_child(body, list).unwrap();
        doc.append_child(list, a).unwrap();
        doc.append_child(list, b).unwrap();

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let _handle = doc.observe(list, MutationObserverInit::child_list(), move |_, records| {
            sink.borrow_mut().push(records.len());
        });

        doc.remove(a).unwrap();
        doc.remove(b).unwrap();
        assert!(seen.borrow().is_empty(), "delivery waits for the checkpoint");

        assert_eq!(doc.flush_mutations(), 1);
        assert_eq!(*seen.borrow(), vec![2]);
    }

    #[test]
    fn test_disconnect_stops_delivery() {
        let mut doc = Document::default();
        let body = doc.body();
        let div = doc.create_element("div");
        doc.append_child(body, div).unwrap();

        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        let handle = doc.observe(body, MutationObserverInit::child_list(), move |_, _| {
            counter.set(counter.get() + 1);
        });
        doc.remove(div).unwrap();
        assert!(doc.is_observing(&handle));
        assert!(doc.has_pending_mutations());

        handle.disconnect(&mut doc);
        assert!(!doc.has_pending_mutations());
        assert_eq!(doc.flush_mutations(), 0);
        assert_eq!(hits.get(), 0);
        assert_eq!(doc.observer_count(), 0);
    }

    #[test]
    fn test_once_listener() {
        let mut doc = Document::default();
        let button = doc.create_element("button");
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        doc.add_event_listener(
            button,
            "click",
            move |_, _| counter.set(counter.get() + 1),
            ListenerOptions { once: true },
        );

        assert_eq!(doc.dispatch_event(button, Event::new("click")), 1);
        assert_eq!(doc.dispatch_event(button, Event::new("click")), 0);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_listener_removes_itself() {
        let mut doc = Document::default();
        let button = doc.create_element("button");
        let slot: Rc<Cell<Option<ListenerId>>> = Rc::new(Cell::new(None));
        let own = slot.clone();
        let id = doc.add_event_listener(
            button,
            "mouseout",
            move |doc, event| {
                if let Some(id) = own.get() {
                    doc.remove_event_listener(event.current_target, id);
                }
            },
            ListenerOptions::default(),
        );
        slot.set(Some(id));

        doc.dispatch_event(button, Event::new("mouseout"));
        assert_eq!(doc.listener_count(button), 0);
    }

    #[test]
    fn test_bubbling_reaches_ancestor() {
        let mut doc = Document::default();
        let body = doc.body();
        let outer = doc.create_element("div");
        let inner = doc.create_element("span");
        doc.append_child(body, outer).unwrap();
        doc.append_child(outer, inner).unwrap();

        let target_seen = Rc::new(Cell::new(NodeId::NONE));
        let sink = target_seen.clone();
        doc.add_event_listener(outer, "mouseout", move |_, e| sink.set(e.target), ListenerOptions::default());

        assert_eq!(doc.dispatch_event(inner, Event::new("mouseout")), 0);
        assert_eq!(doc.dispatch_event(inner, Event::bubbling("mouseout")), 1);
        assert_eq!(target_seen.get(), inner);
    }

    #[test]
    fn test_weak_association() {
        let mut doc = Document::default();
        let node = doc.create_element("div");
        let value = Rc::new(42_u32);
        doc.set_association(node, "value", &value);

        assert_eq!(doc.association::<u32>(node, "value").as_deref(), Some(&42));
        assert!(doc.association::<String>(node, "value").is_none());

        drop(value);
        assert!(doc.association::<u32>(node, "value").is_none());
    }

    #[test]
    fn test_clear_association_if_matches() {
        let mut doc = Document::default();
        let node = doc.create_element("div");
        let first = Rc::new(1_u8);
        let second = Rc::new(2_u8);
        doc.set_association(node, "k", &second);

        doc.clear_association_if(node, "k", &first);
        assert!(doc.association::<u8>(node, "k").is_some());

        doc.clear_association_if(node, "k", &second);
        assert!(doc.association::<u8>(node, "k").is_none());
    }
}
