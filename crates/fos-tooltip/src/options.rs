//! Tooltip configuration
//!
//! `TooltipOptions` is the full per-instance snapshot, callbacks included.
//! `TooltipConfig` is its data-only subset, deserializable from host
//! configuration files.

use std::rc::Rc;

use fos_dom::Document;
use serde::Deserialize;

use crate::{Tooltip, TooltipContent};

/// Open/close hook. Receives the document and the instance.
pub type TooltipCallback = Rc<dyn Fn(&mut Document, &Tooltip)>;

const DEFAULT_CLOSE_EVENT: &str = "mouseout";
const DEFAULT_CLASS: &str = "tooltip";

/// One class name or a list of them
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ClassNames {
    One(String),
    Many(Vec<String>),
}

impl ClassNames {
    /// Normalized list; a single name becomes a one-element list
    pub fn to_list(&self) -> Vec<String> {
        match self {
            Self::One(name) => vec![name.clone()],
            Self::Many(names) => names.clone(),
        }
    }
}

impl Default for ClassNames {
    fn default() -> Self {
        Self::Many(vec![DEFAULT_CLASS.to_string()])
    }
}

impl From<&str> for ClassNames {
    fn from(name: &str) -> Self {
        Self::One(name.to_string())
    }
}

impl From<String> for ClassNames {
    fn from(name: String) -> Self {
        Self::One(name)
    }
}

impl From<Vec<String>> for ClassNames {
    fn from(names: Vec<String>) -> Self {
        Self::Many(names)
    }
}

impl<const N: usize> From<[&str; N]> for ClassNames {
    fn from(names: [&str; N]) -> Self {
        Self::Many(names.iter().map(|s| s.to_string()).collect())
    }
}

/// Data-only tooltip configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TooltipConfig {
    /// Gap between anchor and tooltip, in px
    pub offset: f64,
    /// Event on the anchor that dismisses the tooltip
    #[serde(alias = "closeEvent")]
    pub close_event: String,
    /// Classes applied to the tooltip node
    #[serde(alias = "tooltipClasses", alias = "tooltipClass")]
    pub tooltip_classes: ClassNames,
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self {
            offset: 0.0,
            close_event: DEFAULT_CLOSE_EVENT.to_string(),
            tooltip_classes: ClassNames::default(),
        }
    }
}

/// Per-instance options, snapshotted at construction
#[derive(Clone)]
pub struct TooltipOptions {
    pub offset: f64,
    pub content: TooltipContent,
    pub on_open: Option<TooltipCallback>,
    pub on_close: Option<TooltipCallback>,
    pub close_event: String,
    pub tooltip_classes: ClassNames,
}

impl TooltipOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options seeded from a deserialized config
    pub fn from_config(config: TooltipConfig) -> Self {
        Self {
            offset: config.offset,
            close_event: config.close_event,
            tooltip_classes: config.tooltip_classes,
            ..Self::default()
        }
    }

    pub fn offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    pub fn content(mut self, content: impl Into<TooltipContent>) -> Self {
        self.content = content.into();
        self
    }

    pub fn on_open(mut self, callback: impl Fn(&mut Document, &Tooltip) + 'static) -> Self {
        self.on_open = Some(Rc::new(callback));
        self
    }

    pub fn on_close(mut self, callback: impl Fn(&mut Document, &Tooltip) + 'static) -> Self {
        self.on_close = Some(Rc::new(callback));
        self
    }

    pub fn close_event(mut self, event: impl Into<String>) -> Self {
        self.close_event = event.into();
        self
    }

    pub fn tooltip_classes(mut self, classes: impl Into<ClassNames>) -> Self {
        self.tooltip_classes = classes.into();
        self
    }
}

impl Default for TooltipOptions {
    fn default() -> Self {
        let config = TooltipConfig::default();
        Self {
            offset: config.offset,
            content: TooltipContent::default(),
            on_open: None,
            on_close: None,
            close_event: config.close_event,
            tooltip_classes: config.tooltip_classes,
        }
    }
}

impl std::fmt::Debug for TooltipOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TooltipOptions")
            .field("offset", &self.offset)
            .field("content", &self.content)
            .field("on_open", &self.on_open.is_some())
            .field("on_close", &self.on_close.is_some())
            .field("close_event", &self.close_event)
            .field("tooltip_classes", &self.tooltip_classes)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = TooltipOptions::default();
        assert_eq!(options.offset, 0.0);
        assert_eq!(options.content, TooltipContent::Markup(String::new()));
        assert!(options.on_open.is_none());
        assert!(options.on_close.is_none());
        assert_eq!(options.close_event, "mouseout");
        assert_eq!(options.tooltip_classes.to_list(), vec!["tooltip".to_string()]);
    }

    #[test]
    fn test_scalar_class_promoted() {
        let options = TooltipOptions::new().tooltip_classes("hint");
        assert_eq!(options.tooltip_classes.to_list(), vec!["hint".to_string()]);

        let options = TooltipOptions::new().tooltip_classes(["tooltip", "tooltip-dark"]);
        assert_eq!(options.tooltip_classes.to_list().len(), 2);
    }

    #[test]
    fn test_config_deserialize() {
        let config: TooltipConfig =
            serde_json::from_str(r#"{"offset": 4, "closeEvent": "click", "tooltipClasses": "hint"}"#).unwrap();
        assert_eq!(config.offset, 4.0);
        assert_eq!(config.close_event, "click");
        assert_eq!(config.tooltip_classes, ClassNames::One("hint".to_string()));

        let config: TooltipConfig = serde_json::from_str(r#"{"tooltip_classes": ["a", "b"]}"#).unwrap();
        assert_eq!(config.close_event, "mouseout");
        assert_eq!(config.tooltip_classes.to_list(), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_from_config() {
        let config = TooltipConfig {
            offset: 8.0,
            ..TooltipConfig::default()
        };
        let options = TooltipOptions::from_config(config).content("hi");
        assert_eq!(options.offset, 8.0);
        assert_eq!(options.content, TooltipContent::Markup("hi".to_string()));
    }
}
