//! DOM Events
//!
//! Named events dispatched to listeners registered on nodes.

use std::collections::HashMap;
use std::rc::Rc;

use crate::{Document, NodeId};

/// Listener callback
pub type EventListener = Rc<dyn Fn(&mut Document, &Event)>;

/// Identifies one registration; used for removal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Listener options
#[derive(Debug, Clone, Copy, Default)]
pub struct ListenerOptions {
    /// Remove the listener before its first invocation
    pub once: bool,
}

/// Event being dispatched
#[derive(Debug, Clone)]
pub struct Event {
    pub event_type: String,
    pub target: NodeId,
    pub current_target: NodeId,
    pub bubbles: bool,
}

impl Event {
    /// Non-bubbling event
    pub fn new(event_type: &str) -> Self {
        Self {
            event_type: event_type.to_string(),
            target: NodeId::NONE,
            current_target: NodeId::NONE,
            bubbles: false,
        }
    }

    /// Bubbling event (mouseover, mouseout, click, ...)
    pub fn bubbling(event_type: &str) -> Self {
        Self {
            bubbles: true,
            ..Self::new(event_type)
        }
    }
}

struct Registration {
    id: ListenerId,
    event_type: String,
    listener: EventListener,
    options: ListenerOptions,
}

/// Listeners registered on a document's nodes
#[derive(Default)]
pub(crate) struct ListenerRegistry {
    next_id: u64,
    by_target: HashMap<NodeId, Vec<Registration>>,
}

impl ListenerRegistry {
    pub(crate) fn add(
        &mut self,
        target: NodeId,
        event_type: &str,
        listener: EventListener,
        options: ListenerOptions,
    ) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.by_target.entry(target).or_default().push(Registration {
            id,
            event_type: event_type.to_string(),
            listener,
            options,
        });
        id
    }

    pub(crate) fn remove(&mut self, target: NodeId, id: ListenerId) -> bool {
        let Some(list) = self.by_target.get_mut(&target) else {
            return false;
        };
        let before = list.len();
        list.retain(|r| r.id != id);
        let removed = list.len() < before;
        if list.is_empty() {
            self.by_target.remove(&target);
        }
        removed
    }

    pub(crate) fn contains(&self, target: NodeId, id: ListenerId) -> bool {
        self.by_target
            .get(&target)
            .is_some_and(|list| list.iter().any(|r| r.id == id))
    }

    /// Snapshot of listeners for one target and type, in registration order
    pub(crate) fn matching(&self, target: NodeId, event_type: &str) -> Vec<(ListenerId, EventListener, ListenerOptions)> {
        self.by_target
            .get(&target)
            .map(|list| {
                list.iter()
                    .filter(|r| r.event_type == event_type)
                    .map(|r| (r.id, r.listener.clone(), r.options))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub(crate) fn count(&self, target: NodeId) -> usize {
        self.by_target.get(&target).map_or(0, Vec::len)
    }
}

impl std::fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("targets", &self.by_target.len())
            .finish()
    }
}
