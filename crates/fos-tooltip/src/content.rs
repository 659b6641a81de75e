//! Tooltip content

use fos_dom::NodeId;

/// What goes inside the tooltip node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TooltipContent {
    /// Markup, parsed as `innerHTML`. Plain text is just markup without tags.
    Markup(String),
    /// An existing node, moved into the tooltip. A `<template>` contributes
    /// its contents rather than itself.
    Node(NodeId),
}

impl Default for TooltipContent {
    fn default() -> Self {
        Self::Markup(String::new())
    }
}

impl From<&str> for TooltipContent {
    fn from(markup: &str) -> Self {
        Self::Markup(markup.to_string())
    }
}

impl From<String> for TooltipContent {
    fn from(markup: String) -> Self {
        Self::Markup(markup)
    }
}

impl From<NodeId> for TooltipContent {
    fn from(node: NodeId) -> Self {
        Self::Node(node)
    }
}
