use crate::asset::AssetName;
use crate::font::FontBook;
use crate::image::ImageAsset;
use crate::info::Info;
use crate::layout::PageGeometry;
use crate::page::Page;
use crate::report::Period;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Something worth telling the caller about a build that nevertheless succeeded
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    /// An asset could not be resolved; its space was left blank
    AssetUnavailable { asset: AssetName, reason: String },
    /// The period had no activities; a placeholder line was printed instead of a list
    EmptyDataset { period: Period },
}

/// A finished, laid out report.
///
/// A document is produced in one go by the [`DocumentBuilder`](crate::DocumentBuilder)
/// and not changed afterwards. Pages reference fonts by their id in `fonts` and
/// images by their [`AssetName`] in `assets`; an encoder such as
/// [`PdfEncoder`](crate::PdfEncoder) turns it into bytes.
#[derive(Debug, Clone)]
pub struct Document {
    pub geometry: PageGeometry,
    pub pages: Vec<Page>,
    pub fonts: Arc<FontBook>,
    pub assets: BTreeMap<AssetName, Arc<ImageAsset>>,
    pub info: Info,
    pub notices: Vec<Notice>,
}

impl Document {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Whether the build recorded a notice matching `predicate`
    pub fn has_notice<F: Fn(&Notice) -> bool>(&self, predicate: F) -> bool {
        self.notices.iter().any(predicate)
    }
}
