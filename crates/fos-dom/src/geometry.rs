//! Geometry APIs
//!
//! DOMRect, edge sizes and viewport metrics (`clientWidth`, `scrollX`, ...).

/// DOMRect - rectangle geometry in viewport (client) coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DOMRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl DOMRect {
    /// Create with dimensions
    pub fn from_xywh(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Top edge (same as y)
    pub fn top(&self) -> f64 {
        self.y
    }

    /// Right edge
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Left edge (same as x)
    pub fn left(&self) -> f64 {
        self.x
    }

    /// Horizontal midpoint
    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    /// Check if point is inside
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.bottom()
    }
}

/// Width/height pair
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Edge sizes (top, right, bottom, left)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EdgeSizes {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl EdgeSizes {
    pub fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self { top, right, bottom, left }
    }

    /// Same size on every edge
    pub fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }

    /// left + right
    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    /// top + bottom
    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }
}

/// Viewport metrics of the document element
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// `document.documentElement.clientWidth`
    pub client_width: f64,
    /// `document.documentElement.clientHeight`
    pub client_height: f64,
    /// `window.scrollX`
    pub scroll_x: f64,
    /// `window.scrollY`
    pub scroll_y: f64,
}

impl Viewport {
    pub fn new(client_width: f64, client_height: f64) -> Self {
        Self {
            client_width,
            client_height,
            scroll_x: 0.0,
            scroll_y: 0.0,
        }
    }

    /// Same viewport scrolled to the given offsets
    pub fn scrolled_to(mut self, x: f64, y: f64) -> Self {
        self.scroll_x = x.max(0.0);
        self.scroll_y = y.max(0.0);
        self
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1024.0, 768.0)
    }
}
