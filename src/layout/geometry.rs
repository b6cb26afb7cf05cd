use super::Margins;
use crate::pagesize::{self, PageSize};
use crate::units::{Mm, Pt};
use serde::{Deserialize, Serialize};

/// The fixed page every report is laid out on. Coordinates are page-local and grow
/// downwards from the top-left corner.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    pub width: Pt,
    pub height: Pt,
    pub margins: Margins,
    /// Baseline of the first footer line, measured from the top of the page
    pub footer_baseline: Pt,
}

impl PageGeometry {
    pub fn new(size: PageSize, margins: Margins, footer_baseline: Pt) -> PageGeometry {
        PageGeometry {
            width: size.0,
            height: size.1,
            margins,
            footer_baseline,
        }
    }

    /// A4 portrait with 20 mm side and top margins. Flowing content stops 250 mm down
    /// the page; the footer sits 285 mm down.
    pub fn a4_memo() -> PageGeometry {
        PageGeometry::new(
            pagesize::A4,
            Margins::trbl(Mm(20.0), Mm(20.0), Mm(47.0), Mm(20.0)),
            Mm(285.0).into(),
        )
    }

    pub fn content_left(&self) -> Pt {
        self.margins.left
    }

    pub fn content_width(&self) -> Pt {
        self.width - self.margins.left - self.margins.right
    }

    /// Horizontal centre of the content area
    pub fn center_x(&self) -> Pt {
        self.margins.left + self.content_width() / 2.0
    }

    /// Height available to flowing content on one page
    pub fn content_height(&self) -> Pt {
        self.height - self.margins.top - self.margins.bottom
    }
}
