use super::cursor::{LayoutCursor, MAX_BREAK_ATTEMPTS};
use super::PageGeometry;
use crate::document::Notice;
use crate::error::LayoutError;
use crate::page::{DrawOp, Page};
use crate::units::Pt;

/// Owns the pages of a build while they are being written.
///
/// Pages are only ever appended. Once the section pipeline is finished the manager is
/// consumed by [`PageManager::close`], which stamps the per-page furniture using the
/// final page count and hands back the finished page list.
#[derive(Debug)]
pub struct PageManager {
    pages: Vec<Page>,
}

impl PageManager {
    /// A manager holding one empty page
    pub fn new() -> PageManager {
        PageManager {
            pages: vec![Page::new()],
        }
    }

    /// Append a new empty page, returning its index
    pub fn start_page(&mut self) -> usize {
        self.pages.push(Page::new());
        self.pages.len() - 1
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    // never empty: `new` starts with one page and pages are only appended
    fn current_mut(&mut self) -> &mut Page {
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    /// Finish the document: `furniture(page_number, page_count)` is called once per
    /// page (1-based page numbers) and its draw ops are appended to that page.
    pub fn close<F>(self, mut furniture: F) -> Result<Vec<Page>, LayoutError>
    where
        F: FnMut(usize, usize) -> Result<Vec<DrawOp>, LayoutError>,
    {
        let page_count = self.pages.len();
        let mut pages = self.pages;
        for (index, page) in pages.iter_mut().enumerate() {
            page.ops.extend(furniture(index + 1, page_count)?);
        }
        Ok(pages)
    }
}

impl Default for PageManager {
    fn default() -> Self {
        PageManager::new()
    }
}

/// Everything a section renderer reads and advances: the cursor, the pages written so
/// far and the notices raised along the way. Renderers take the state by value and
/// return the advanced state.
#[derive(Debug)]
pub struct LayoutState {
    cursor: LayoutCursor,
    pages: PageManager,
    notices: Vec<Notice>,
}

impl LayoutState {
    pub fn new(geometry: &PageGeometry) -> LayoutState {
        LayoutState {
            cursor: LayoutCursor::new(geometry),
            pages: PageManager::new(),
            notices: Vec::new(),
        }
    }

    pub fn cursor(&self) -> &LayoutCursor {
        &self.cursor
    }

    pub fn page_count(&self) -> usize {
        self.pages.page_count()
    }

    pub fn pages(&self) -> &[Page] {
        self.pages.pages()
    }

    /// Move on to a fresh page. Does nothing while the current page is still untouched,
    /// so a break can never produce an empty page.
    fn break_page(&mut self) {
        if self.cursor.at_page_top() {
            return;
        }
        let index = self.pages.start_page();
        self.cursor = self.cursor.next_page();
        debug_assert_eq!(index, self.cursor.page_index);
        log::debug!("page break, now on page {}", index + 1);
    }

    /// Claim a line of `line_height`, breaking to a new page first if the line would
    /// cross the bottom margin. Returns the baseline the line must be drawn at.
    pub fn advance(&mut self, line_height: Pt) -> Result<Pt, LayoutError> {
        let mut attempts = 0;
        while !self.cursor.fits(line_height) {
            if attempts == MAX_BREAK_ATTEMPTS || self.cursor.at_page_top() {
                return Err(LayoutError::Overflow {
                    attempts,
                    height: line_height,
                });
            }
            self.break_page();
            attempts += 1;
        }
        self.cursor.y += line_height;
        Ok(self.cursor.y)
    }

    /// Leave a vertical gap. A gap that would cross the bottom margin ends the page
    /// instead; it is not carried over to the next one.
    pub fn skip(&mut self, space: Pt) {
        if self.cursor.fits(space) {
            self.cursor.y += space;
        } else {
            self.break_page();
        }
    }

    /// Make sure a block of `height` can be drawn without a page break, starting a new
    /// page if it cannot. Blocks taller than a whole page are left to flow across
    /// pages. Returns whether a break was taken.
    pub fn ensure_space(&mut self, height: Pt) -> bool {
        if self.cursor.fits(height) || self.cursor.at_page_top() {
            return false;
        }
        self.break_page();
        true
    }

    /// Append a draw op to the current page
    pub fn emit(&mut self, op: DrawOp) {
        self.pages.current_mut().push(op);
    }

    pub fn notice(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    /// Close the flow, applying `furniture` to every page. See [`PageManager::close`].
    pub fn close<F>(self, furniture: F) -> Result<(Vec<Page>, Vec<Notice>), LayoutError>
    where
        F: FnMut(usize, usize) -> Result<Vec<DrawOp>, LayoutError>,
    {
        let pages = self.pages.close(furniture)?;
        Ok((pages, self.notices))
    }
}
