//! Content stream rendering for laid out pages.

use crate::asset::AssetName;
use crate::colour::Colour;
use crate::document::Document;
use crate::error::PDFError;
use crate::page::{DrawOp, Page};
use crate::units::Pt;
use std::io::Write;

/// The index an asset's XObject is registered under (`/I{index}`)
pub(crate) fn image_index(name: AssetName) -> usize {
    match name {
        AssetName::Logo => 0,
        AssetName::Signature => 1,
    }
}

/// Renders one page's draw ops to a PDF content stream.
///
/// Draw ops use top-down coordinates; PDF user space grows upwards from the bottom of
/// the page, so every y is flipped against the page height here.
#[allow(clippy::write_with_newline)]
pub(crate) fn render_page(page: &Page, document: &Document) -> Result<Vec<u8>, PDFError> {
    let height = document.geometry.height;
    let flip = |y: Pt| (height - y).0;

    let mut content: Vec<u8> = Vec::default();
    for op in page.ops.iter() {
        match op {
            DrawOp::Text { x, y, text, style } => {
                let face = document.fonts.get(style.font).ok_or(PDFError::MissingFont)?;
                write!(&mut content, "BT\n")?;
                write!(&mut content, "/F{} {} Tf\n", style.font.index(), style.size.0)?;
                write_colour(&mut content, style.colour)?;
                write!(&mut content, "{} {} Td\n", x.0, flip(*y))?;
                write!(&mut content, "<")?;
                for byte in face.encode_text(text) {
                    write!(&mut content, "{byte:02x}")?;
                }
                write!(&mut content, "> Tj\n")?;
                write!(&mut content, "ET\n")?;
            }
            DrawOp::Line {
                x1,
                y1,
                x2,
                y2,
                width,
            } => {
                write!(&mut content, "q\n")?;
                write!(&mut content, "{} w\n0 G\n", width.0)?;
                write!(&mut content, "{} {} m\n", x1.0, flip(*y1))?;
                write!(&mut content, "{} {} l\n", x2.0, flip(*y2))?;
                write!(&mut content, "S\n")?;
                write!(&mut content, "Q\n")?;
            }
            DrawOp::Image {
                x,
                y,
                width,
                height: image_height,
                asset,
            } => {
                if !document.assets.contains_key(asset) {
                    return Err(PDFError::MissingAsset(*asset));
                }
                write!(&mut content, "q\n")?;
                write!(
                    &mut content,
                    "{} 0 0 {} {} {} cm\n",
                    width.0,
                    image_height.0,
                    x.0,
                    flip(*y + *image_height)
                )?;
                write!(&mut content, "/I{} Do\n", image_index(*asset))?;
                write!(&mut content, "Q\n")?;
            }
        }
    }

    Ok(content)
}

#[allow(clippy::write_with_newline)]
fn write_colour(content: &mut Vec<u8>, colour: Colour) -> Result<(), std::io::Error> {
    match colour {
        Colour::RGB { r, g, b } => write!(content, "{r} {g} {b} rg\n"),
        Colour::Grey { g } => write!(content, "{g} g\n"),
    }
}
