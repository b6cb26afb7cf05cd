//! Vertical flow layout for report pages.
//!
//! Content is laid out top to bottom on a fixed [`PageGeometry`]. A
//! [`LayoutState`] carries the write position ([`LayoutCursor`]) together with the
//! pages produced so far, and is threaded by value through every section renderer.
//! Whenever the next line would cross the bottom margin the state breaks to a fresh
//! page; nothing but the footer is ever drawn below that margin.
//!
//! Text is measured and wrapped with a [`TextMeasurer`], which is a pure function
//! of the font book, so the same input always paginates the same way.
//!
//! # Example
//!
//! ```
//! use memo_gen::layout::{LayoutState, PageGeometry, TextMeasurer};
//! use memo_gen::style::{names, StyleSheet};
//! use memo_gen::{FontBook, Pt};
//!
//! let fonts = FontBook::with_builtin_fonts();
//! let body = StyleSheet::memo_default()
//!     .resolve(names::BODY, &fonts)
//!     .expect("body style is defined");
//!
//! let geometry = PageGeometry::a4_memo();
//! let mut state = LayoutState::new(&geometry);
//! let lines = TextMeasurer::new(&fonts)
//!     .wrap("Hello, world!", &body, geometry.content_width())
//!     .expect("font is registered");
//! for _ in &lines {
//!     state.advance(body.line_height).expect("line fits on a page");
//! }
//! assert_eq!(state.page_count(), 1);
//! assert!(state.cursor().y > Pt(56.0));
//! ```

mod cursor;
mod geometry;
mod margins;
mod pages;
mod text;

pub use cursor::*;
pub use geometry::*;
pub use margins::*;
pub use pages::*;
pub use text::*;
