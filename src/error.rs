use crate::asset::AssetName;
use crate::units::Pt;
use thiserror::Error;

/// Fatal errors raised while laying out a report. A build that returns one of
/// these produces no document at all.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// A section asked for a text style the style sheet does not define
    #[error("text style `{0}` is not defined in the style sheet")]
    UndefinedStyle(String),

    /// A style refers to a font that was never registered in the font book
    #[error("font `{0}` is not registered")]
    UndefinedFont(String),

    /// The cursor could not get back within the page bounds
    #[error("a {height} tall line still overflowed the page after {attempts} page breaks")]
    Overflow { attempts: usize, height: Pt },

    /// The report data itself is unusable (blank identities, month out of range, ...)
    #[error("invalid report data: {0}")]
    InvalidReport(String),
}

/// Why an asset could not be resolved. These never abort a build; the asset is
/// treated as absent instead.
#[derive(Error, Debug)]
pub enum AssetError {
    #[error("asset `{0}` was not found")]
    NotFound(AssetName),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Decode(#[from] image::ImageError),
}

/// Errors loading a [`Template`](crate::Template) from configuration
#[derive(Error, Debug)]
pub enum TemplateError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("template version {found} is not supported (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
}

/// All errors that the PDF encoder can generate
#[derive(Error, Debug)]
pub enum PDFError {
    #[error(transparent)]
    /// An I/O error occurred
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse the font
    FaceParsingError(#[from] owned_ttf_parser::FaceParsingError),

    #[error(transparent)]
    /// [image] failed to re-encode an image
    Image(#[from] image::ImageError),

    #[error("draw operation refers to a font that is not in the document's font book")]
    /// A text run refers to a font the document does not carry
    MissingFont,

    #[error("draw operation refers to asset `{0}` which the document does not carry")]
    /// An image draw op refers to an asset that was not resolved
    MissingAsset(AssetName),
}
