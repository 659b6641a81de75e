//! DOM Observers
//!
//! MutationObserver for child-list changes. Records are queued per observer
//! as mutations happen and delivered in one batch per observer when the
//! document reaches a microtask checkpoint (`Document::flush_mutations`).

use std::rc::Rc;

use crate::{Document, DomTree, NodeId};

/// Callback invoked with a batch of records
pub type MutationCallback = Rc<dyn Fn(&mut Document, &[MutationRecord])>;

/// Mutation observer options
#[derive(Debug, Clone, Copy, Default)]
pub struct MutationObserverInit {
    pub child_list: bool,
    pub subtree: bool,
}

impl MutationObserverInit {
    /// `{ childList: true }`
    pub fn child_list() -> Self {
        Self {
            child_list: true,
            subtree: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationType {
    ChildList,
}

/// Mutation record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationRecord {
    pub mutation_type: MutationType,
    pub target: NodeId,
    pub added_nodes: Vec<NodeId>,
    pub removed_nodes: Vec<NodeId>,
    pub previous_sibling: Option<NodeId>,
    pub next_sibling: Option<NodeId>,
}

impl MutationRecord {
    pub fn child_list(
        target: NodeId,
        added_nodes: Vec<NodeId>,
        removed_nodes: Vec<NodeId>,
        previous_sibling: Option<NodeId>,
        next_sibling: Option<NodeId>,
    ) -> Self {
        Self {
            mutation_type: MutationType::ChildList,
            target,
            added_nodes,
            removed_nodes,
            previous_sibling,
            next_sibling,
        }
    }
}

/// Capability for one registered observer.
///
/// Not `Clone`: the subscription can be cancelled exactly once, by
/// consuming the handle.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "dropping the handle leaves the observer connected with no way to disconnect it"]
pub struct ObserverHandle {
    id: u32,
}

impl ObserverHandle {
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Stop observing and discard any undelivered records
    pub fn disconnect(self, document: &mut Document) {
        document.observers_mut().disconnect(self.id);
    }
}

struct ObserverEntry {
    id: u32,
    target: NodeId,
    options: MutationObserverInit,
    callback: MutationCallback,
    queue: Vec<MutationRecord>,
}

/// Observers registered on a document
#[derive(Default)]
pub(crate) struct ObserverRegistry {
    next_id: u32,
    entries: Vec<ObserverEntry>,
}

impl ObserverRegistry {
    pub(crate) fn observe(
        &mut self,
        target: NodeId,
        options: MutationObserverInit,
        callback: MutationCallback,
    ) -> ObserverHandle {
        self.next_id += 1;
        let id = self.next_id;
        self.entries.push(ObserverEntry {
            id,
            target,
            options,
            callback,
            queue: Vec::new(),
        });
        ObserverHandle { id }
    }

    pub(crate) fn disconnect(&mut self, id: u32) {
        self.entries.retain(|e| e.id != id);
    }

    pub(crate) fn is_connected(&self, id: u32) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Queue records onto every interested observer
    pub(crate) fn route(&mut self, tree: &DomTree, records: Vec<MutationRecord>) {
        for record in records {
            for entry in self.entries.iter_mut() {
                if !entry.options.child_list {
                    continue;
                }
                let interested = entry.target == record.target
                    || (entry.options.subtree && tree.is_inclusive_ancestor(entry.target, record.target));
                if interested {
                    entry.queue.push(record.clone());
                }
            }
        }
    }

    /// Take the next observer's pending batch, oldest observer first
    pub(crate) fn take_next_batch(&mut self) -> Option<(MutationCallback, Vec<MutationRecord>)> {
        let entry = self.entries.iter_mut().find(|e| !e.queue.is_empty())?;
        Some((entry.callback.clone(), std::mem::take(&mut entry.queue)))
    }

    pub(crate) fn has_pending(&self) -> bool {
        self.entries.iter().any(|e| !e.queue.is_empty())
    }
}

impl std::fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("observers", &self.entries.len())
            .finish()
    }
}
