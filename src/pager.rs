//! Fixed-size paging over the raw rows of a trip table.

use crate::trips::{Trip, TripTable};

pub const DEFAULT_PAGE_SIZE: usize = 5;

/// One slice of rows plus where it sits in the table.
#[derive(Debug, PartialEq)]
pub struct Page<'a> {
    pub rows: &'a [Trip],
    /// Index of the first row on this page.
    pub start: usize,
    /// Cursor after this page, i.e. one past the last row returned.
    pub cursor: usize,
    pub total: usize,
    pub exhausted: bool,
}

/// Returns up to `page_size` rows starting at `cursor`.
///
/// Never fails: a cursor at or past the end yields an empty, exhausted page.
/// A `page_size` of 0 is treated as 1 so every call makes progress.
pub fn next_page(table: &TripTable, cursor: usize, page_size: usize) -> Page<'_> {
    let rows = table.as_slice();
    let start = cursor.min(rows.len());
    let end = start.saturating_add(page_size.max(1)).min(rows.len());

    Page {
        rows: &rows[start..end],
        start,
        cursor: end,
        total: rows.len(),
        exhausted: end >= rows.len(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagerState {
    Ready,
    Exhausted,
}

/// Read cursor over a table. Once exhausted it stays exhausted.
#[derive(Debug, Clone)]
pub struct RawRowPager {
    cursor: usize,
    page_size: usize,
    state: PagerState,
}

impl Default for RawRowPager {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl RawRowPager {
    pub fn new(page_size: usize) -> Self {
        RawRowPager {
            cursor: 0,
            page_size: page_size.max(1),
            state: PagerState::Ready,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn state(&self) -> PagerState {
        self.state
    }

    pub fn next_page<'a>(&mut self, table: &'a TripTable) -> Page<'a> {
        if self.state == PagerState::Exhausted {
            return next_page(table, table.len(), self.page_size);
        }

        let page = next_page(table, self.cursor, self.page_size);
        self.cursor = page.cursor;
        if page.exhausted {
            self.state = PagerState::Exhausted;
        }
        page
    }
}
