use super::{rule, RenderContext, SectionRenderer, BLOCK_GAP};
use crate::asset::{AssetName, AssetRef};
use crate::error::LayoutError;
use crate::layout::LayoutState;
use crate::page::DrawOp;
use crate::style::names;
use crate::units::Mm;

/// Optional logo, the centred title line and a rule beneath it
#[derive(Debug, Default, Copy, Clone)]
pub struct Header;

impl SectionRenderer for Header {
    fn name(&self) -> &'static str {
        "header"
    }

    fn render(
        &self,
        ctx: &RenderContext<'_>,
        mut state: LayoutState,
    ) -> Result<LayoutState, LayoutError> {
        let header = &ctx.template.header;
        let style = ctx.style(names::TITLE)?;
        let left = ctx.geometry.content_left();

        if header.show_logo {
            // the slot is reserved whether or not the logo resolved
            let bottom = state.advance(header.logo_height)?;
            match &ctx.assets.logo {
                AssetRef::Resolved(_) => state.emit(DrawOp::Image {
                    x: left,
                    y: bottom - header.logo_height,
                    width: header.logo_width,
                    height: header.logo_height,
                    asset: AssetName::Logo,
                }),
                AssetRef::Absent => {}
            }
            state.skip(Mm(2.0).into());
        }

        let title = ctx.title();
        let x = ctx.centred_x(&title, &style, ctx.geometry.center_x())?;
        let baseline = state.advance(style.line_height)?;
        state.emit(DrawOp::Text {
            x,
            y: baseline,
            text: title,
            style,
        });

        state.skip(Mm(3.0).into());
        rule(&mut state, left, left + ctx.geometry.content_width());
        state.skip(BLOCK_GAP.into());

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
    use image::{DynamicImage, RgbImage};
    use std::sync::Arc;

    #[test]
    fn title_is_centred_above_a_rule() {
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

        let state = fixtures::run(&Header, &ctx).unwrap();
        let ops = &state.pages()[0].ops;
        assert_eq!(ops.len(), 2);

        let (title_x, title_y, width) = match &ops[0] {
            DrawOp::Text { x, y, text, style } => {
                assert_eq!(text, "INFORME GENERAL Nº 003-2025-EPO");
                (*x, *y, ctx.measurer().width(text, style).unwrap())
            }
            other => panic!("expected the title, got {other:?}"),
        };
        let centre = title_x + width / 2.0;
        assert!((centre - geometry.center_x()).0.abs() < 0.01);

        match &ops[1] {
            DrawOp::Line { y1, x1, x2, .. } => {
                assert!(*y1 > title_y);
                assert!((*x2 - *x1 - geometry.content_width()).0.abs() < 0.01);
            }
            other => panic!("expected a rule, got {other:?}"),
        }
    }

    #[test]
    fn letterhead_draws_the_logo_when_resolved() {
        let report = fixtures::report(3, 2025, 0);
        let template = Template::for_variant(TemplateVariant::Letterhead);
        let geometry = PageGeometry::a4_memo();
        let fonts = FontBook::with_builtin_fonts();
        let mut assets = ResolvedAssets::none();
        assets.logo = AssetRef::Resolved(Arc::new(ImageAsset::from_image(
            DynamicImage::ImageRgb8(RgbImage::new(4, 2)),
        )));
        let ctx = RenderContext {
            report: &report,
            template: &template,
            geometry: &geometry,
            fonts: &fonts,
            assets: &assets,
        };

        let with_logo = fixtures::run(&Header, &ctx).unwrap();
        match with_logo.pages()[0].images().next() {
            Some(DrawOp::Image {
                x,
                y,
                width,
                asset,
                ..
            }) => {
                assert_eq!(*x, geometry.margins.left);
                assert!((*y - geometry.margins.top).0.abs() < 0.01);
                assert_eq!(*width, template.header.logo_width);
                assert_eq!(*asset, AssetName::Logo);
            }
            other => panic!("expected the logo, got {other:?}"),
        }

        let absent = ResolvedAssets::none();
        let ctx = RenderContext {
            assets: &absent,
            ..ctx
        };
        let without_logo = fixtures::run(&Header, &ctx).unwrap();
        assert_eq!(without_logo.pages()[0].images().count(), 0);
        assert_eq!(without_logo.cursor().y, with_logo.cursor().y);
    }
}
