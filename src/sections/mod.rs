//! The fixed sections of a memorandum, laid out top to bottom.
//!
//! Every flowing section implements [`SectionRenderer`]: it takes the
//! [`LayoutState`] by value, writes its content and hands the advanced state back.
//! The [`Footer`] is different in that it is not part of the flow; it is stamped
//! onto every page once the flow is closed and the page count is known.

use crate::asset::ResolvedAssets;
use crate::error::LayoutError;
use crate::font::FontBook;
use crate::layout::{LayoutState, PageGeometry, TextMeasurer};
use crate::page::DrawOp;
use crate::report::ReportData;
use crate::style::TextStyle;
use crate::template::{interpolate, Template};
use crate::units::{Mm, Pt};

mod activities;
mod closing;
mod footer;
mod header;
mod identification;
mod introduction;

pub use activities::*;
pub use closing::*;
pub use footer::*;
pub use header::*;
pub use identification::*;
pub use introduction::*;

/// Vertical gap between blocks
pub(crate) const BLOCK_GAP: Mm = Mm(5.0);
/// Stroke width of rule lines
pub(crate) const RULE_WIDTH: Pt = Pt(0.5);

/// Everything a section reads but never changes during a build
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    pub report: &'a ReportData,
    pub template: &'a Template,
    pub geometry: &'a PageGeometry,
    pub fonts: &'a FontBook,
    pub assets: &'a ResolvedAssets,
}

/// One flowing section of the memorandum
pub trait SectionRenderer {
    /// Short name used in log output
    fn name(&self) -> &'static str;

    fn render(
        &self,
        ctx: &RenderContext<'_>,
        state: LayoutState,
    ) -> Result<LayoutState, LayoutError>;
}

/// The flowing sections in the order they appear on the page
pub fn pipeline() -> [&'static dyn SectionRenderer; 5] {
    [&Header, &Identification, &Introduction, &Activities, &Closing]
}

impl<'a> RenderContext<'a> {
    /// Resolve a named style from the template's style sheet
    pub fn style(&self, name: &str) -> Result<TextStyle, LayoutError> {
        self.template.styles.resolve(name, self.fonts)
    }

    pub fn measurer(&self) -> TextMeasurer<'a> {
        TextMeasurer::new(self.fonts)
    }

    /// Fill the period placeholders (`{seq}`, `{month}`, `{month_lower}`, `{year}`)
    pub fn fill(&self, text: &str) -> String {
        let period = &self.report.period;
        let seq = period.sequence_number();
        let month = period.month_name().unwrap_or_default();
        let month_lower = month.to_lowercase();
        let year = period.year.to_string();
        interpolate(
            text,
            &[
                ("seq", seq.as_str()),
                ("month", month),
                ("month_lower", month_lower.as_str()),
                ("year", year.as_str()),
            ],
        )
    }

    /// The title line, e.g. `INFORME GENERAL Nº 003-2025-EPO`
    pub fn title(&self) -> String {
        let header = &self.template.header;
        self.fill(&format!(
            "{}{}{}",
            header.title_prefix,
            self.report.period.sequence_number(),
            header.title_suffix
        ))
    }

    /// The x at which `text` must start to be centred on `centre`
    pub(crate) fn centred_x(
        &self,
        text: &str,
        style: &TextStyle,
        centre: Pt,
    ) -> Result<Pt, LayoutError> {
        Ok(centre - self.measurer().width(text, style)? / 2.0)
    }
}

/// Total height of `lines` lines set in `style`
pub(crate) fn lines_height(lines: usize, style: &TextStyle) -> Pt {
    style.line_height * lines as f32
}

/// Advance over one line and draw `text` on its baseline. Empty text still takes up
/// its line.
pub(crate) fn write_line(
    state: &mut LayoutState,
    x: Pt,
    text: &str,
    style: &TextStyle,
) -> Result<Pt, LayoutError> {
    let baseline = state.advance(style.line_height)?;
    if !text.is_empty() {
        state.emit(DrawOp::Text {
            x,
            y: baseline,
            text: text.to_string(),
            style: *style,
        });
    }
    Ok(baseline)
}

pub(crate) fn write_lines(
    state: &mut LayoutState,
    x: Pt,
    lines: &[String],
    style: &TextStyle,
) -> Result<(), LayoutError> {
    for line in lines {
        write_line(state, x, line, style)?;
    }
    Ok(())
}

/// Draw a horizontal rule at the cursor
pub(crate) fn rule(state: &mut LayoutState, x1: Pt, x2: Pt) {
    let y = state.cursor().y;
    state.emit(DrawOp::Line {
        x1,
        y1: y,
        x2,
        y2: y,
        width: RULE_WIDTH,
    });
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::report::{ActivityItem, Identity, Period};
    use chrono::NaiveDate;

    pub fn report(month: u32, year: i32, activities: usize) -> ReportData {
        ReportData {
            period: Period::new(month, year),
            generated_on: NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(),
            sender: Identity::new("Rodrigo Lira Alvarez", "Practicante del Comité de Mejora Continua"),
            recipient: Identity::new("Angela Aquize Diaz", "Jefa del Comité de Mejora Continua"),
            activities: (0..activities)
                .map(|i| {
                    ActivityItem::new(format!("Actividad {}", i + 1))
                        .with_description("Revisión de la documentación del proceso de acreditación")
                })
                .collect(),
        }
    }

    pub fn run<S: SectionRenderer>(
        section: &S,
        ctx: &RenderContext<'_>,
    ) -> Result<LayoutState, LayoutError> {
        section.render(ctx, LayoutState::new(ctx.geometry))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::TemplateVariant;

    #[test]
    fn placeholders_are_filled_from_the_period() {
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

        assert_eq!(ctx.title(), "INFORME GENERAL Nº 003-2025-EPO");
        assert_eq!(
            ctx.fill("{month} / {month_lower} / {year}"),
            "Marzo / marzo / 2025"
        );
    }
}
