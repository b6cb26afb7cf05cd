use super::RenderContext;
use crate::error::LayoutError;
use crate::page::DrawOp;
use crate::style::names;
use crate::template::interpolate;

/// Small print stamped at the bottom of every page after the flow is closed.
///
/// Lines are centred on the page's content area, starting at the geometry's footer
/// baseline. The optional page label is filled with the page number and the final
/// page count, so every page of a document agrees on the total.
#[derive(Debug, Default, Copy, Clone)]
pub struct Footer;

impl Footer {
    pub fn furniture(
        &self,
        ctx: &RenderContext<'_>,
        page_number: usize,
        page_count: usize,
    ) -> Result<Vec<DrawOp>, LayoutError> {
        let footer = &ctx.template.footer;
        let style = ctx.style(names::FOOTER)?;
        let page = page_number.to_string();
        let pages = page_count.to_string();

        let numbering = [("page", page.as_str()), ("pages", pages.as_str())];
        let label = footer
            .page_label
            .as_deref()
            .map(|label| interpolate(&ctx.fill(label), &numbering));
        let lines = footer
            .lines
            .iter()
            .map(|line| ctx.fill(line))
            .chain(label);

        let mut ops = Vec::new();
        let mut y = ctx.geometry.footer_baseline;
        for text in lines {
            let x = ctx.centred_x(&text, &style, ctx.geometry.center_x())?;
            ops.push(DrawOp::Text { x, y, text, style });
            y += style.line_height;
        }
        Ok(ops)
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures;
    use super::*;
    use crate::asset::ResolvedAssets;
    use crate::error::LayoutError;
    use crate::font::FontBook;
    use crate::layout::PageGeometry;
    use crate::template::{Template, TemplateVariant};

    #[test]
    fn letterhead_footer_numbers_pages() {
        let report = fixtures::report(3, 2025, 0);
        let template = Template::for_variant(TemplateVariant::Letterhead);
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

        let ops = Footer.furniture(&ctx, 2, 3).unwrap();
        let texts: Vec<&str> = ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(
            texts,
            vec![
                "Escuela Profesional de Odontología - Comité de Mejora Continua",
                "Depósitos: Banco de la Nación, Cta. Cte. Nº 00-068-000000",
                "Página 2 de 3",
            ]
        );
        match &ops[0] {
            DrawOp::Text { y, .. } => assert_eq!(*y, geometry.footer_baseline),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn missing_footer_style_is_fatal() {
        let report = fixtures::report(3, 2025, 0);
        let mut template = Template::for_variant(TemplateVariant::Standard);
        template.styles.remove(names::FOOTER);
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

        assert_eq!(
            Footer.furniture(&ctx, 1, 1),
            Err(LayoutError::UndefinedStyle(names::FOOTER.to_string()))
        );
    }
}
