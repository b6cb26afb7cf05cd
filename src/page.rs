use crate::asset::AssetName;
use crate::style::TextStyle;
use crate::units::Pt;

/// A positioned drawing primitive. Coordinates are page-local points measured from
/// the top-left corner of the page, growing downwards.
#[derive(Clone, PartialEq, Debug)]
pub enum DrawOp {
    /// A single line of text whose baseline starts at (`x`, `y`)
    Text {
        x: Pt,
        y: Pt,
        text: String,
        style: TextStyle,
    },
    /// A stroked rule
    Line {
        x1: Pt,
        y1: Pt,
        x2: Pt,
        y2: Pt,
        width: Pt,
    },
    /// An image whose top-left corner is at (`x`, `y`)
    Image {
        x: Pt,
        y: Pt,
        width: Pt,
        height: Pt,
        asset: AssetName,
    },
}

/// One page of laid out content, in drawing order
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Page {
    pub ops: Vec<DrawOp>,
}

impl Page {
    pub fn new() -> Page {
        Page::default()
    }

    pub fn push(&mut self, op: DrawOp) {
        self.ops.push(op);
    }

    /// The text of every text run on the page, in drawing order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn images(&self) -> impl Iterator<Item = &DrawOp> {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Image { .. }))
    }

    /// Whether any text run on the page contains `needle`
    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().any(|text| text.contains(needle))
    }
}
