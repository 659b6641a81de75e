//! Placement algorithm
//!
//! Pure geometry: given the anchor rect, the tooltip's measured size and
//! margins, and the viewport, decide where the tooltip goes. All inputs and
//! outputs are in viewport (client) coordinates; the caller adds scroll
//! offsets when writing `left`/`top`.
//!
//! Horizontal: centred on the anchor, right-aligned against the viewport if
//! it would overflow, never negative. Vertical: below the anchor unless the
//! tooltip does not fit below *and* there is strictly more room above.

use fos_dom::{DOMRect, EdgeSizes, Viewport};

/// Vertical side of the anchor the tooltip occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Side {
    Top,
    #[default]
    Bottom,
}

/// Result of one placement pass
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Placement {
    /// Left edge in client coordinates
    pub x: f64,
    /// Top edge in client coordinates
    pub y: f64,
    pub side: Side,
    /// Applied `max-height`
    pub max_height: f64,
    /// Room around the anchor, offset already subtracted
    pub space_available: EdgeSizes,
}

/// Room between the anchor and each viewport edge, minus `offset`
pub fn space_available(anchor: &DOMRect, viewport: &Viewport, offset: f64) -> EdgeSizes {
    EdgeSizes {
        top: anchor.top() - offset,
        right: viewport.client_width - anchor.right() - offset,
        bottom: viewport.client_height - anchor.bottom() - offset,
        left: anchor.left() - offset,
    }
}

/// Left edge for a tooltip `width` wide
pub fn horizontal_position(anchor: &DOMRect, width: f64, horizontal_margins: f64, client_width: f64) -> f64 {
    let mut x = anchor.center_x() - width / 2.0;

    if x + width + horizontal_margins > client_width {
        x = client_width - width - horizontal_margins;
    }

    x.max(0.0)
}

/// Bottom wins when the tooltip fits there with room to spare, or bottom has
/// at least as much room as top. An exact fit does not count as fitting.
pub fn choose_side(height: f64, space: &EdgeSizes) -> Side {
    if height < space.bottom || space.top <= space.bottom {
        Side::Bottom
    } else {
        Side::Top
    }
}

/// `max-height` for the chosen side
pub fn max_height(side: Side, space: &EdgeSizes, vertical_margins: f64, natural_height: f64) -> f64 {
    match side {
        Side::Bottom => space.bottom - vertical_margins,
        Side::Top => (space.top - vertical_margins).min(natural_height),
    }
}

/// Top edge for a tooltip `height` tall (measured after capping)
pub fn vertical_position(side: Side, anchor: &DOMRect, height: f64, vertical_margins: f64, offset: f64) -> f64 {
    match side {
        Side::Bottom => anchor.bottom() + offset,
        Side::Top => anchor.top() - height - vertical_margins - offset,
    }
}
