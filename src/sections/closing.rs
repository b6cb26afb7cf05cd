use super::{lines_height, rule, write_lines, RenderContext, SectionRenderer, BLOCK_GAP};
use crate::asset::{AssetName, AssetRef};
use crate::error::LayoutError;
use crate::layout::LayoutState;
use crate::page::DrawOp;
use crate::style::names;
use crate::units::{Mm, Pt};

/// The closing sentence, the salutation and the signature block.
///
/// The signature block (salutation, signature image, rule, signer name and title) is
/// never split across pages. When the signature asset is absent its space is left
/// blank so the rule and name stay where they would otherwise be.
#[derive(Debug, Default, Copy, Clone)]
pub struct Closing;

const SIGNATURE_GAP: Mm = Mm(5.0);

impl SectionRenderer for Closing {
    fn name(&self) -> &'static str {
        "closing"
    }

    fn render(
        &self,
        ctx: &RenderContext<'_>,
        mut state: LayoutState,
    ) -> Result<LayoutState, LayoutError> {
        let closing = &ctx.template.closing;
        let body = ctx.style(names::BODY)?;
        let signer = ctx.style(names::SIGNER)?;
        let caption = ctx.style(names::CAPTION)?;
        let measurer = ctx.measurer();
        let left = ctx.geometry.content_left();
        let width = ctx.geometry.content_width();

        let closing_lines = measurer.wrap(&ctx.fill(&closing.closing_line), &body, width)?;
        state.ensure_space(lines_height(closing_lines.len(), &body));
        write_lines(&mut state, left, &closing_lines, &body)?;
        state.skip(BLOCK_GAP.into());

        let sender = &ctx.report.sender;
        let salutation = measurer.wrap(&ctx.fill(&closing.salutation), &body, width)?;
        let signer_title = measurer.wrap(&sender.title, &caption, width)?;
        let gap: Pt = SIGNATURE_GAP.into();
        let block = lines_height(salutation.len(), &body)
            + closing.signature_height
            + gap
            + signer.line_height
            + lines_height(signer_title.len(), &caption);
        state.ensure_space(block);

        write_lines(&mut state, left, &salutation, &body)?;

        let bottom = state.advance(closing.signature_height)?;
        match &ctx.assets.signature {
            AssetRef::Resolved(_) => state.emit(DrawOp::Image {
                x: left,
                y: bottom - closing.signature_height,
                width: closing.signature_width,
                height: closing.signature_height,
                asset: AssetName::Signature,
            }),
            AssetRef::Absent => log::debug!("no signature, leaving the space blank"),
        }

        state.skip(gap);
        rule(&mut state, left, left + closing.rule_width);

        let centre = left + closing.rule_width / 2.0;
        let name_x = ctx.centred_x(&sender.name, &signer, centre)?;
        let baseline = state.advance(signer.line_height)?;
        state.emit(DrawOp::Text {
            x: name_x,
            y: baseline,
            text: sender.name.clone(),
            style: signer,
        });
        for line in &signer_title {
            let x = ctx.centred_x(line, &caption, centre)?;
            let baseline = state.advance(caption.line_height)?;
            state.emit(DrawOp::Text {
                x,
                y: baseline,
                text: line.clone(),
                style: caption,
            });
        }

        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures;
    use super::*;
    use crate::asset::ResolvedAssets;
    use crate::font::FontBook;
    use crate::image::ImageAsset;
    use crate::layout::PageGeometry;
    use crate::template::{Template, TemplateVariant};
    use image::{DynamicImage, RgbaImage};
    use std::sync::Arc;

    fn rule_y(state: &LayoutState) -> Option<Pt> {
        state.pages().last()?.ops.iter().find_map(|op| match op {
            DrawOp::Line { y1, .. } => Some(*y1),
            _ => None,
        })
    }

    #[test]
    fn absent_signature_leaves_identical_blank_space() {
        let report = fixtures::report(3, 2025, 0);
        let template = Template::for_variant(TemplateVariant::Standard);
        let geometry = PageGeometry::a4_memo();
        let fonts = FontBook::with_builtin_fonts();
        let mut signed = ResolvedAssets::none();
        signed.signature = AssetRef::Resolved(Arc::new(ImageAsset::from_image(
            DynamicImage::ImageRgba8(RgbaImage::new(10, 3)),
        )));
        let unsigned = ResolvedAssets::none();

        let ctx = RenderContext {
            report: &report,
            template: &template,
            geometry: &geometry,
            fonts: &fonts,
            assets: &signed,
        };
        let with_signature = fixtures::run(&Closing, &ctx).unwrap();
        let ctx = RenderContext {
            assets: &unsigned,
            ..ctx
        };
        let without_signature = fixtures::run(&Closing, &ctx).unwrap();

        assert_eq!(with_signature.pages()[0].images().count(), 1);
        assert_eq!(without_signature.pages()[0].images().count(), 0);
        assert_eq!(rule_y(&with_signature), rule_y(&without_signature));
        assert_eq!(with_signature.cursor().y, without_signature.cursor().y);

        let page = &without_signature.pages()[0];
        assert!(page.contains_text("Es todo lo que informo para su conocimiento."));
        assert!(page.contains_text("Atentamente,"));
        assert!(page.contains_text("Rodrigo Lira Alvarez"));
    }

    #[test]
    fn signer_name_is_centred_under_the_rule() {
        let report = fixtures::report(3, 2025, 0);
        let template = Template::for_variant(TemplateVariant::Standard);
        let geometry = PageGeometry::a4_memo();
        let fonts = FontBook::with_builtin_fonts();
        let assets = ResolvedAssets::none();
        let ctx = RenderContext {
            report: &report,
            template: &template,
            geometry: &geometry,
            fonts: &fonts,
            assets: &assets,
        };

        let state = fixtures::run(&Closing, &ctx).unwrap();
        let signer = ctx.style(names::SIGNER).unwrap();
        let (x, y) = state.pages()[0]
            .ops
            .iter()
            .find_map(|op| match op {
                DrawOp::Text { x, y, text, .. } if text == "Rodrigo Lira Alvarez" => Some((*x, *y)),
                _ => None,
            })
            .unwrap();
        let width = ctx.measurer().width("Rodrigo Lira Alvarez", &signer).unwrap();
        let centre = geometry.content_left() + template.closing.rule_width / 2.0;
        assert!((x + width / 2.0 - centre).0.abs() < 0.01);
        assert!(y > rule_y(&state).unwrap());
    }

    #[test]
    fn signature_block_is_not_split() {
        let report = fixtures::report(3, 2025, 0);
        let template = Template::for_variant(TemplateVariant::Standard);
        let geometry = PageGeometry::a4_memo();
        let fonts = FontBook::with_builtin_fonts();
        let assets = ResolvedAssets::none();
        let ctx = RenderContext {
            report: &report,
            template: &template,
            geometry: &geometry,
            fonts: &fonts,
            assets: &assets,
        };

        // leave room for the closing sentence but not for the signature block
        let mut state = LayoutState::new(&geometry);
        let remaining = state.cursor().remaining();
        state.skip(remaining - Pt::from(Mm(15.0)));

        let state = Closing.render(&ctx, state).unwrap();
        assert_eq!(state.page_count(), 2);
        assert!(state.pages()[0].contains_text("Es todo lo que informo"));
        let second = &state.pages()[1];
        assert!(second.contains_text("Atentamente,"));
        assert!(second.contains_text("Rodrigo Lira Alvarez"));
        assert!(second.contains_text("Practicante del Comité de Mejora Continua"));
    }
}
