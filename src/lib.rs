//! Layout and pagination of monthly activity memoranda.
//!
//! A [`ReportData`] (period, sender, recipient and the activities of the month) is
//! laid out by a [`DocumentBuilder`] into a [`Document`]: an ordered list of fixed
//! size pages, each holding positioned text runs, rules and images. The wording and
//! the styles come from a versioned [`Template`]; images are fetched through an
//! [`AssetProvider`]. A [`DocumentEncoder`] such as [`PdfEncoder`] turns the finished
//! document into bytes.

mod asset;
pub use asset::*;

mod builder;
pub use builder::*;

mod colour;
pub use colour::*;

mod content;

mod document;
pub use document::*;

mod encoder;
pub use encoder::*;

mod error;
pub use error::*;

mod font;
pub use font::*;

mod image;
pub use self::image::*;

mod info;
pub use info::*;

/// Vertical flow layout: page geometry, the write cursor, pages and text wrapping
pub mod layout;

mod page;
pub use page::*;

/// Standard page sizes
pub mod pagesize;

pub(crate) mod refs;

mod report;
pub use report::*;

/// The sections of a memorandum
pub mod sections;

/// Named text styles
pub mod style;

mod template;
pub use template::*;

mod units;
pub use units::*;

/// Re-export PDF-writer functionality
pub use pdf_writer;
