use crate::content::{image_index, render_page};
use crate::document::Document;
use crate::error::PDFError;
use crate::refs::{ObjectReferences, RefType};
use miniz_oxide::deflate::{compress_to_vec_zlib, CompressionLevel};
use pdf_writer::{Filter, Finish, Name, Pdf, Rect, Ref};
use std::io::Write;

/// Turns a laid out [`Document`] into its final binary form
pub trait DocumentEncoder {
    type Error;

    fn encode<W: Write>(&self, document: &Document, w: W) -> Result<(), Self::Error>;

    fn encode_to_vec(&self, document: &Document) -> Result<Vec<u8>, Self::Error> {
        let mut bytes = Vec::new();
        self.encode(document, &mut bytes)?;
        Ok(bytes)
    }
}

/// Encodes documents as PDF.
///
/// The entire document is rendered in memory before anything is written to the
/// output, so the writer only ever sees a complete file.
#[derive(Debug, Clone, Copy)]
pub struct PdfEncoder {
    /// Deflate page content streams
    pub compress: bool,
}

impl Default for PdfEncoder {
    fn default() -> Self {
        PdfEncoder { compress: true }
    }
}

impl PdfEncoder {
    pub fn new() -> PdfEncoder {
        PdfEncoder::default()
    }
}

impl DocumentEncoder for PdfEncoder {
    type Error = PDFError;

    fn encode<W: Write>(&self, document: &Document, mut w: W) -> Result<(), PDFError> {
        let mut refs = ObjectReferences::new();

        let catalog_id = refs.gen(RefType::Catalog);
        let page_tree_id = refs.gen(RefType::PageTree);

        let mut writer = Pdf::new();
        document.info.write(&mut refs, &mut writer);

        let page_refs: Vec<Ref> = (0..document.pages.len())
            .map(|i| refs.gen(RefType::Page(i)))
            .collect();

        writer
            .pages(page_tree_id)
            .count(page_refs.len() as i32)
            .kids(page_refs.iter().copied());

        let mut font_refs: Vec<(usize, Ref)> = Vec::new();
        for (id, face) in document.fonts.iter() {
            face.write(&mut refs, id.index(), &mut writer);
            if let Some(font_ref) = refs.get(RefType::Font(id.index())) {
                font_refs.push((id.index(), font_ref));
            }
        }

        let mut image_refs: Vec<(usize, Ref)> = Vec::new();
        for (name, image) in document.assets.iter() {
            let index = image_index(*name);
            image.write(&mut refs, index, &mut writer)?;
            if let Some(image_ref) = refs.get(RefType::Image(index)) {
                image_refs.push((index, image_ref));
            }
        }

        let media_box = Rect::new(0.0, 0.0, document.geometry.width.0, document.geometry.height.0);
        for (page_index, (page, page_ref)) in document.pages.iter().zip(&page_refs).enumerate() {
            let content_id = refs.gen(RefType::ContentForPage(page_index));

            let mut pdf_page = writer.page(*page_ref);
            pdf_page.media_box(media_box);
            pdf_page.parent(page_tree_id);
            pdf_page.contents(content_id);

            let mut resources = pdf_page.resources();
            let mut resource_fonts = resources.fonts();
            for (index, font_ref) in font_refs.iter() {
                resource_fonts.pair(Name(format!("F{index}").as_bytes()), *font_ref);
            }
            resource_fonts.finish();
            let mut resource_xobjects = resources.x_objects();
            for (index, image_ref) in image_refs.iter() {
                resource_xobjects.pair(Name(format!("I{index}").as_bytes()), *image_ref);
            }
            resource_xobjects.finish();
            resources.finish();
            pdf_page.finish();

            let rendered = render_page(page, document)?;
            if self.compress {
                let level = CompressionLevel::DefaultLevel as u8;
                let compressed = compress_to_vec_zlib(&rendered, level);
                writer
                    .stream(content_id, compressed.as_slice())
                    .filter(Filter::FlateDecode);
            } else {
                writer.stream(content_id, rendered.as_slice());
            }
        }

        writer.catalog(catalog_id).pages(page_tree_id);

        log::debug!(
            "encoded {} page(s), {} font(s), {} image(s)",
            page_refs.len(),
            font_refs.len(),
            image_refs.len()
        );
        w.write_all(writer.finish().as_slice()).map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::DocumentBuilder;
    use crate::sections::fixtures;
    use crate::template::{Template, TemplateVariant};

    #[test]
    fn encodes_a_complete_pdf() {
        let report = fixtures::report(3, 2025, 3);
        let document = DocumentBuilder::new(Template::for_variant(TemplateVariant::Standard))
            .build_without_assets(&report)
            .unwrap();

        let bytes = PdfEncoder { compress: false }
            .encode_to_vec(&document)
            .unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/Helvetica-Bold"));
        assert!(text.contains("/WinAnsiEncoding"));
        assert!(text.trim_end().ends_with("%%EOF"));
    }

    #[test]
    fn compressed_output_is_smaller() {
        let report = fixtures::report(3, 2025, 30);
        let document = DocumentBuilder::new(Template::for_variant(TemplateVariant::Standard))
            .build_without_assets(&report)
            .unwrap();

        let plain = PdfEncoder { compress: false }.encode_to_vec(&document).unwrap();
        let compressed = PdfEncoder::new().encode_to_vec(&document).unwrap();
        assert!(compressed.len() < plain.len());
    }
}
