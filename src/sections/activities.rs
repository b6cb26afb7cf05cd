use super::{lines_height, write_line, write_lines, RenderContext, SectionRenderer, BLOCK_GAP};
use crate::document::Notice;
use crate::error::LayoutError;
use crate::layout::LayoutState;
use crate::style::names;

/// The list of activities of the period.
///
/// Each item is a marker and title in the `activity_title` style, followed by its
/// description indented beneath in the `body` style. An item is kept on one page
/// unless it is taller than a whole page. A period without activities prints the
/// template's placeholder line instead.
#[derive(Debug, Default, Copy, Clone)]
pub struct Activities;

impl SectionRenderer for Activities {
    fn name(&self) -> &'static str {
        "activities"
    }

    fn render(
        &self,
        ctx: &RenderContext<'_>,
        mut state: LayoutState,
    ) -> Result<LayoutState, LayoutError> {
        let template = &ctx.template.activities;
        let title_style = ctx.style(names::ACTIVITY_TITLE)?;
        let body = ctx.style(names::BODY)?;
        let measurer = ctx.measurer();

        let title_x = ctx.geometry.content_left() + template.indent;
        let title_width = ctx.geometry.content_width() - template.indent;
        let description_x = title_x + template.description_indent;
        let description_width = title_width - template.description_indent;

        let activities = &ctx.report.activities;
        if activities.is_empty() {
            log::debug!("no activities for {}", ctx.report.period.sequence_number());
            state.notice(Notice::EmptyDataset {
                period: ctx.report.period,
            });
            write_line(&mut state, title_x, &ctx.fill(&template.empty_placeholder), &body)?;
            state.skip(BLOCK_GAP.into());
            return Ok(state);
        }

        for (index, item) in activities.iter().enumerate() {
            let heading = format!("{} {}", template.marker.label(index), item.title.trim());
            let title_lines = measurer.wrap(&heading, &title_style, title_width)?;
            let description_lines = match item.description() {
                Some(description) => measurer.wrap(description, &body, description_width)?,
                None => Vec::new(),
            };

            let height = lines_height(title_lines.len(), &title_style)
                + lines_height(description_lines.len(), &body);
            if state.ensure_space(height) {
                log::debug!("activity {} moved to the next page", index + 1);
            }

            write_lines(&mut state, title_x, &title_lines, &title_style)?;
            write_lines(&mut state, description_x, &description_lines, &body)?;
            state.skip(template.item_spacing);
        }

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
    use crate::page::DrawOp;
    use crate::report::ActivityItem;
    use crate::template::{Template, TemplateVariant};
    use crate::units::Pt;

    #[test]
    fn empty_period_prints_placeholder_and_records_notice() {
        let report = fixtures::report(2, 2024, 0);
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

        let before = LayoutState::new(&geometry).cursor().y;
        let state = fixtures::run(&Activities, &ctx).unwrap();
        assert!(state.cursor().y > before);
        assert!(state.pages()[0].contains_text(&template.activities.empty_placeholder));

        let (_, notices) = state.close(|_, _| Ok(Vec::new())).unwrap();
        assert_eq!(
            notices,
            vec![Notice::EmptyDataset {
                period: report.period
            }]
        );
    }

    #[test]
    fn items_keep_their_order_and_markers() {
        let mut report = fixtures::report(5, 2025, 0);
        report.activities = vec![
            ActivityItem::new("Inventario de materiales"),
            ActivityItem::new("Encuesta de satisfacción").with_description("Aplicada a 40 pacientes"),
            ActivityItem::new("Informe de hallazgos").with_description("  "),
        ];
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

        let state = fixtures::run(&Activities, &ctx).unwrap();
        let texts: Vec<&str> = state.pages()[0].texts().collect();
        assert_eq!(
            texts,
            vec![
                "1. Inventario de materiales",
                "2. Encuesta de satisfacción",
                "Aplicada a 40 pacientes",
                "3. Informe de hallazgos",
            ]
        );

        let description_x = state.pages()[0].ops.iter().find_map(|op| match op {
            DrawOp::Text { x, text, .. } if text.starts_with("Aplicada") => Some(*x),
            _ => None,
        });
        assert_eq!(
            description_x,
            Some(
                geometry.content_left()
                    + template.activities.indent
                    + template.activities.description_indent
            )
        );
    }

    #[test]
    fn memorandum_bullets_items() {
        let report = fixtures::report(5, 2025, 2);
        let template = Template::for_variant(TemplateVariant::Memorandum);
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

        let state = fixtures::run(&Activities, &ctx).unwrap();
        let bulleted = state.pages()[0]
            .texts()
            .filter(|t| t.starts_with("• Actividad"))
            .count();
        assert_eq!(bulleted, 2);
        assert!(state.cursor().y > Pt(0.0));
    }
}
