//! Named text styles.
//!
//! Sections never pick fonts or sizes themselves; they ask the [`StyleSheet`] for a
//! style by name (see [`names`]) and get back a [`TextStyle`] bound to a face in the
//! [`FontBook`]. A missing name or an unregistered font is a fatal layout error.

use crate::colour::{colours, Colour};
use crate::error::LayoutError;
use crate::font::{FontBook, FontFace};
use crate::units::{Mm, Pt};
use id_arena::Id;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The style names the section renderers ask for
pub mod names {
    pub const TITLE: &str = "title";
    pub const LABEL: &str = "label";
    pub const VALUE: &str = "value";
    pub const CAPTION: &str = "caption";
    pub const BODY: &str = "body";
    pub const ACTIVITY_TITLE: &str = "activity_title";
    pub const SIGNER: &str = "signer";
    pub const FOOTER: &str = "footer";
}

/// How a style is written in configuration: the font is referenced by its name in
/// the font book
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleSpec {
    pub font: String,
    pub size: Pt,
    /// Vertical distance the cursor moves for each line set in this style
    pub line_height: Pt,
    #[serde(default)]
    pub colour: Colour,
}

/// A style resolved against a font book, ready to be attached to text runs
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TextStyle {
    pub font: Id<FontFace>,
    pub size: Pt,
    pub line_height: Pt,
    pub colour: Colour,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleSheet {
    styles: BTreeMap<String, StyleSpec>,
}

impl StyleSpec {
    pub fn new<S: ToString>(font: S, size: Pt, line_height: Pt) -> StyleSpec {
        StyleSpec {
            font: font.to_string(),
            size,
            line_height,
            colour: colours::BLACK,
        }
    }

    pub fn with_colour(mut self, colour: Colour) -> StyleSpec {
        self.colour = colour;
        self
    }
}

impl StyleSheet {
    pub fn empty() -> StyleSheet {
        StyleSheet {
            styles: BTreeMap::new(),
        }
    }

    /// The styles of the monthly memorandum: Helvetica throughout, 5 mm line pitch
    /// for body copy, grey 7 pt small print in the footer
    pub fn memo_default() -> StyleSheet {
        let line: Pt = Mm(5.0).into();
        let mut sheet = StyleSheet::empty();
        sheet
            .insert(names::TITLE, StyleSpec::new("Helvetica-Bold", Pt(11.0), Mm(6.0).into()))
            .insert(names::LABEL, StyleSpec::new("Helvetica-Bold", Pt(10.0), line))
            .insert(names::VALUE, StyleSpec::new("Helvetica", Pt(10.0), line))
            .insert(names::CAPTION, StyleSpec::new("Helvetica", Pt(9.0), line))
            .insert(names::BODY, StyleSpec::new("Helvetica", Pt(10.0), line))
            .insert(
                names::ACTIVITY_TITLE,
                StyleSpec::new("Helvetica-Bold", Pt(10.0), line),
            )
            .insert(names::SIGNER, StyleSpec::new("Helvetica-Bold", Pt(10.0), line))
            .insert(
                names::FOOTER,
                StyleSpec::new("Helvetica", Pt(7.0), Mm(3.5).into()).with_colour(colours::GREY),
            );
        sheet
    }

    pub fn insert<S: ToString>(&mut self, name: S, spec: StyleSpec) -> &mut Self {
        self.styles.insert(name.to_string(), spec);
        self
    }

    pub fn remove(&mut self, name: &str) -> Option<StyleSpec> {
        self.styles.remove(name)
    }

    /// Look up a style by name and bind it to its face in `fonts`
    pub fn resolve(&self, name: &str, fonts: &FontBook) -> Result<TextStyle, LayoutError> {
        let spec = self
            .styles
            .get(name)
            .ok_or_else(|| LayoutError::UndefinedStyle(name.to_string()))?;
        let font = fonts
            .id_of(&spec.font)
            .ok_or_else(|| LayoutError::UndefinedFont(spec.font.clone()))?;
        Ok(TextStyle {
            font,
            size: spec.size,
            line_height: spec.line_height,
            colour: spec.colour,
        })
    }
}
