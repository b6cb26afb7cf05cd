use crate::asset::{AssetName, AssetProvider, AssetRef, ResolvedAssets};
use crate::document::Document;
use crate::error::LayoutError;
use crate::font::FontBook;
use crate::info::Info;
use crate::layout::{LayoutState, PageGeometry};
use crate::page::DrawOp;
use crate::report::ReportData;
use crate::sections::{pipeline, Footer, RenderContext};
use crate::template::Template;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Lays a [`ReportData`] out into a finished [`Document`].
///
/// The builder holds everything that stays the same from one report to the next: the
/// template, the page geometry and the font book. A single builder can be used for
/// any number of builds, including concurrent ones; each build owns its own layout
/// state and only shares the font book.
///
/// ```
/// use memo_gen::{DocumentBuilder, Template, TemplateVariant};
/// use memo_gen::{ActivityItem, Identity, Period, ReportData};
/// use chrono::NaiveDate;
///
/// let report = ReportData {
///     period: Period::new(3, 2025),
///     generated_on: NaiveDate::from_ymd_opt(2025, 4, 2).unwrap(),
///     sender: Identity::new("Rodrigo Lira Alvarez", "Practicante"),
///     recipient: Identity::new("Angela Aquize Diaz", "Jefa del Comité"),
///     activities: vec![ActivityItem::new("Inventario de materiales")],
/// };
///
/// let builder = DocumentBuilder::new(Template::for_variant(TemplateVariant::Standard));
/// let document = builder.build_without_assets(&report).expect("report lays out");
/// assert_eq!(document.page_count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct DocumentBuilder {
    template: Template,
    geometry: PageGeometry,
    fonts: Arc<FontBook>,
}

impl DocumentBuilder {
    /// A builder for `template` on the A4 memo page with the built-in fonts
    pub fn new(template: Template) -> DocumentBuilder {
        DocumentBuilder {
            template,
            geometry: PageGeometry::a4_memo(),
            fonts: Arc::new(FontBook::with_builtin_fonts()),
        }
    }

    pub fn with_geometry(mut self, geometry: PageGeometry) -> DocumentBuilder {
        self.geometry = geometry;
        self
    }

    pub fn with_fonts(mut self, fonts: Arc<FontBook>) -> DocumentBuilder {
        self.fonts = fonts;
        self
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    /// Resolve the assets from `provider`, then lay the report out. Asset failures
    /// are recorded as notices on the document; only layout errors fail the build.
    pub async fn build<P: AssetProvider>(
        &self,
        report: &ReportData,
        provider: &P,
    ) -> Result<Document, LayoutError> {
        report.validate()?;
        let assets = ResolvedAssets::resolve(provider, self.template.header.show_logo).await;
        self.lay_out(report, assets)
    }

    /// Lay the report out without any images
    pub fn build_without_assets(&self, report: &ReportData) -> Result<Document, LayoutError> {
        self.build_with_assets(report, ResolvedAssets::none())
    }

    /// Lay the report out with assets that were already resolved
    pub fn build_with_assets(
        &self,
        report: &ReportData,
        assets: ResolvedAssets,
    ) -> Result<Document, LayoutError> {
        report.validate()?;
        self.lay_out(report, assets)
    }

    /// Run the section pipeline over a report that has already been validated
    fn lay_out(
        &self,
        report: &ReportData,
        assets: ResolvedAssets,
    ) -> Result<Document, LayoutError> {
        let ctx = RenderContext {
            report,
            template: &self.template,
            geometry: &self.geometry,
            fonts: &self.fonts,
            assets: &assets,
        };

        let mut state = LayoutState::new(&self.geometry);
        for notice in &assets.notices {
            state.notice(notice.clone());
        }
        for section in pipeline() {
            log::debug!("laying out {}", section.name());
            state = section.render(&ctx, state)?;
        }
        let (pages, notices) =
            state.close(|page, count| Footer.furniture(&ctx, page, count))?;

        let title = ctx.title();
        log::info!(
            "laid out {} over {} page(s) with {} notice(s)",
            title,
            pages.len(),
            notices.len()
        );

        let mut resolved = BTreeMap::new();
        for name in [AssetName::Logo, AssetName::Signature] {
            if let AssetRef::Resolved(image) = assets.get(name) {
                let drawn = pages
                    .iter()
                    .flat_map(|page| page.images())
                    .any(|op| matches!(op, DrawOp::Image { asset, .. } if *asset == name));
                if drawn {
                    resolved.insert(name, Arc::clone(image));
                }
            }
        }

        Ok(Document {
            geometry: self.geometry,
            pages,
            fonts: Arc::clone(&self.fonts),
            assets: resolved,
            info: Info::for_report(&title, report),
            notices,
        })
    }
}
