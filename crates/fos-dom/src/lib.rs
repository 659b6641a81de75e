//! fOS DOM - Document Object Model
//!
//! Arena-backed DOM tree with the host-side plumbing floating UI needs:
//! attributes, class lists, inline style, event listeners, mutation
//! observers, viewport metrics and a pluggable layout provider.

mod attributes;
mod classlist;
mod document;
mod events;
mod geometry;
mod layout;
mod node;
mod observer;
mod operations;
mod style;
mod tree;

pub use attributes::{Attr, NamedNodeMap};
pub use classlist::DOMTokenList;
pub use document::Document;
pub use events::{Event, EventListener, ListenerId, ListenerOptions};
pub use geometry::{DOMRect, EdgeSizes, Size, Viewport};
pub use layout::{LayoutProvider, StaticLayout};
pub use node::{ElementData, Node, NodeData};
pub use observer::{MutationCallback, MutationObserverInit, MutationRecord, MutationType, ObserverHandle};
pub use operations::{DomError, DomResult};
pub use style::InlineStyle;
pub use tree::{Children, DomTree};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root node ID
    pub const ROOT: NodeId = NodeId(0);

    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check if this refers to a node
    #[inline]
    pub fn is_valid(&self) -> bool {
        *self != Self::NONE
    }

    /// Arena index
    #[inline]
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}
