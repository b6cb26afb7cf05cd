use super::PageGeometry;
use crate::units::Pt;

/// How many consecutive page breaks a single line may trigger before layout gives up
pub const MAX_BREAK_ATTEMPTS: usize = 8;

// slack for accumulated floating point error when comparing against the limit
const EPSILON: Pt = Pt(0.001);

/// The vertical write position within the current page.
///
/// `y` is page-local and grows downwards. Between emissions it always satisfies
/// `y <= page_height - bottom_margin`, the low-water mark past which nothing flowing
/// may be drawn.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LayoutCursor {
    pub page_index: usize,
    pub y: Pt,
    pub page_height: Pt,
    pub top_margin: Pt,
    pub bottom_margin: Pt,
}

impl LayoutCursor {
    /// A cursor at the top of the first page
    pub fn new(geometry: &PageGeometry) -> LayoutCursor {
        LayoutCursor {
            page_index: 0,
            y: geometry.margins.top,
            page_height: geometry.height,
            top_margin: geometry.margins.top,
            bottom_margin: geometry.margins.bottom,
        }
    }

    /// The lowest `y` flowing content may reach
    pub fn limit(&self) -> Pt {
        self.page_height - self.bottom_margin
    }

    pub fn remaining(&self) -> Pt {
        (self.limit() - self.y).max(Pt::ZERO)
    }

    /// Whether `height` more content fits above the limit
    pub fn fits(&self, height: Pt) -> bool {
        self.y + height <= self.limit() + EPSILON
    }

    /// True while nothing has consumed vertical space on the current page
    pub fn at_page_top(&self) -> bool {
        self.y <= self.top_margin + EPSILON
    }

    pub fn within_bounds(&self) -> bool {
        self.y <= self.limit() + EPSILON
    }

    /// The cursor at the top of the following page
    pub fn next_page(self) -> LayoutCursor {
        LayoutCursor {
            page_index: self.page_index + 1,
            y: self.top_margin,
            ..self
        }
    }
}
