use super::{write_lines, RenderContext, SectionRenderer, BLOCK_GAP};
use crate::error::LayoutError;
use crate::layout::LayoutState;
use crate::style::names;

/// The opening paragraph, wrapped to the full content width
#[derive(Debug, Default, Copy, Clone)]
pub struct Introduction;

impl SectionRenderer for Introduction {
    fn name(&self) -> &'static str {
        "introduction"
    }

    fn render(
        &self,
        ctx: &RenderContext<'_>,
        mut state: LayoutState,
    ) -> Result<LayoutState, LayoutError> {
        let style = ctx.style(names::BODY)?;
        let text = ctx.fill(&ctx.template.introduction);
        let lines = ctx
            .measurer()
            .wrap(&text, &style, ctx.geometry.content_width())?;

        write_lines(&mut state, ctx.geometry.content_left(), &lines, &style)?;
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
    use crate::layout::PageGeometry;
    use crate::template::{Template, TemplateVariant};

    #[test]
    fn paragraph_mentions_the_month_in_lower_case() {
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

        let state = fixtures::run(&Introduction, &ctx).unwrap();
        let page = &state.pages()[0];
        let lines: Vec<&str> = page.texts().collect();
        assert!(lines.len() > 1);
        assert!(lines.join(" ").contains("en el mes de marzo como practicante"));

        let style = ctx.style(names::BODY).unwrap();
        for line in lines {
            assert!(ctx.measurer().width(line, &style).unwrap() <= geometry.content_width());
        }
    }
}
