use serde::Serialize;

use crate::config::PageSize;

const WINDOW_RADIUS: usize = 2;

/// One page of an ordered sequence. `page` is 1-based and never clamped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl<T> Page<'_, T> {
    /// 1-based position of the first visible row, or 0 for an empty page.
    pub fn first_position(&self) -> usize {
        if self.items.is_empty() {
            return 0;
        }
        (self.page.max(1) - 1) * self.page_size + 1
    }

    pub fn last_position(&self) -> usize {
        if self.items.is_empty() {
            return 0;
        }
        self.first_position() + self.items.len() - 1
    }

    pub fn is_past_end(&self) -> bool {
        self.page > self.total_pages.max(1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "page", rename_all = "snake_case")]
pub enum PageMarker {
    Page(usize),
    Gap,
}

pub fn total_pages(total_items: usize, page_size: PageSize) -> usize {
    total_items.div_ceil(page_size.get())
}

/// Slices `[(page-1)*size, page*size)`. Page 0 reads as page 1; a page past
/// the end yields an empty slice.
pub fn paginate<T>(items: &[T], page_size: PageSize, page: usize) -> Page<'_, T> {
    let size = page_size.get();
    let start = page.saturating_sub(1).saturating_mul(size).min(items.len());
    let end = start.saturating_add(size).min(items.len());

    Page {
        items: &items[start..end],
        page,
        page_size: size,
        total_items: items.len(),
        total_pages: total_pages(items.len(), page_size),
    }
}

/// Pager buttons: first, last, and pages within two of `current`, with one
/// gap marker per skipped run.
pub fn page_window(current: usize, total_pages: usize) -> Vec<PageMarker> {
    let mut markers = Vec::new();
    let mut gap_open = false;

    for page in 1..=total_pages {
        let near_current = page + WINDOW_RADIUS >= current && page <= current + WINDOW_RADIUS;
        if page == 1 || page == total_pages || near_current {
            markers.push(PageMarker::Page(page));
            gap_open = false;
        } else if !gap_open {
            markers.push(PageMarker::Gap);
            gap_open = true;
        }
    }

    markers
}
