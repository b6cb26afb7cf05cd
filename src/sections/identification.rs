use super::{lines_height, rule, write_line, write_lines, RenderContext, SectionRenderer, BLOCK_GAP};
use crate::error::LayoutError;
use crate::layout::LayoutState;
use crate::page::DrawOp;
use crate::report::{long_date_es, Identity};
use crate::style::{names, TextStyle};
use crate::units::{Mm, Pt};

/// The From / To / Subject / Date block.
///
/// Labels are set at the left margin, values in a column `value_offset` further in.
/// Identities print the name on the label's line and the title beneath it in the
/// caption style.
#[derive(Debug, Default, Copy, Clone)]
pub struct Identification;

struct Columns {
    label: TextStyle,
    value: TextStyle,
    caption: TextStyle,
    label_x: Pt,
    value_x: Pt,
    value_width: Pt,
}

impl Columns {
    fn new(ctx: &RenderContext<'_>) -> Result<Columns, LayoutError> {
        let offset = ctx.template.identification.value_offset;
        Ok(Columns {
            label: ctx.style(names::LABEL)?,
            value: ctx.style(names::VALUE)?,
            caption: ctx.style(names::CAPTION)?,
            label_x: ctx.geometry.content_left(),
            value_x: ctx.geometry.content_left() + offset,
            value_width: ctx.geometry.content_width() - offset,
        })
    }

    /// A label with its (possibly wrapped) value, followed by `extra` caption lines
    fn row(
        &self,
        ctx: &RenderContext<'_>,
        state: &mut LayoutState,
        label: &str,
        value: &str,
        extra: &[String],
    ) -> Result<(), LayoutError> {
        let lines = ctx.measurer().wrap(value, &self.value, self.value_width)?;
        let first_height = self.label.line_height.max(self.value.line_height);
        state.ensure_space(
            first_height
                + lines_height(lines.len() - 1, &self.value)
                + lines_height(extra.len(), &self.caption),
        );

        let baseline = state.advance(first_height)?;
        state.emit(DrawOp::Text {
            x: self.label_x,
            y: baseline,
            text: label.to_string(),
            style: self.label,
        });
        if let Some(first) = lines.first().filter(|l| !l.is_empty()) {
            state.emit(DrawOp::Text {
                x: self.value_x,
                y: baseline,
                text: first.clone(),
                style: self.value,
            });
        }
        for line in lines.iter().skip(1) {
            write_line(state, self.value_x, line, &self.value)?;
        }
        write_lines(state, self.value_x, extra, &self.caption)
    }

    fn identity(
        &self,
        ctx: &RenderContext<'_>,
        state: &mut LayoutState,
        label: &str,
        identity: &Identity,
    ) -> Result<(), LayoutError> {
        let title = ctx
            .measurer()
            .wrap(&identity.title, &self.caption, self.value_width)?;
        self.row(ctx, state, label, &identity.name, &title)
    }
}

impl SectionRenderer for Identification {
    fn name(&self) -> &'static str {
        "identification"
    }

    fn render(
        &self,
        ctx: &RenderContext<'_>,
        mut state: LayoutState,
    ) -> Result<LayoutState, LayoutError> {
        let template = &ctx.template.identification;
        let report = ctx.report;
        let columns = Columns::new(ctx)?;

        columns.identity(ctx, &mut state, &template.from_label, &report.sender)?;
        state.skip(BLOCK_GAP.into());
        columns.identity(ctx, &mut state, &template.to_label, &report.recipient)?;
        state.skip(BLOCK_GAP.into());
        columns.row(
            ctx,
            &mut state,
            &template.subject_label,
            &ctx.fill(&template.subject),
            &[],
        )?;
        state.skip(BLOCK_GAP.into());
        columns.row(
            ctx,
            &mut state,
            &template.date_label,
            &long_date_es(report.generated_on),
            &[],
        )?;

        state.skip(Mm(2.0).into());
        let left = ctx.geometry.content_left();
        rule(&mut state, left, left + ctx.geometry.content_width());
        state.skip(BLOCK_GAP.into());

        Ok(state)
    }
}
