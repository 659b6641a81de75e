//! fOS Tooltip
//!
//! A floating annotation element anchored to a target element.
//!
//! Each [`Tooltip`] owns at most one rendered node appended to `<body>`.
//! The node is tagged with `data-tooltip` and a numeric `data-tooltip-id`;
//! the document tree is the only record of which tooltips are open.
//!
//! A tooltip closes when:
//! - the configured dismissal event (default `mouseout`) fires on its anchor,
//! - its anchor is removed from the anchor's parent (observed through a
//!   child-list mutation observer), or
//! - [`Tooltip::close`] / [`Tooltip::close_all`] is called.
//!
//! # Example
//! ```rust,ignore
//! use fos_tooltip::{Tooltip, TooltipOptions};
//!
//! let tip = Tooltip::new(&mut document, button, TooltipOptions::new()
//!     .content("Save changes (<kbd>Ctrl</kbd>+<kbd>S</kbd>)")
//!     .offset(6.0));
//! ```

mod content;
mod options;
pub mod placement;
mod tooltip;

pub use content::TooltipContent;
pub use options::{ClassNames, TooltipCallback, TooltipConfig, TooltipOptions};
pub use placement::{Placement, Side};
pub use tooltip::Tooltip;

/// Presence marker carried by every tooltip node
pub const MARKER_ATTR: &str = "data-tooltip";

/// Numeric per-instance id attribute
pub const ID_ATTR: &str = "data-tooltip-id";
