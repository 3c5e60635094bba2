//! Pager model handed to the render surface.

use serde::Serialize;

use crate::list_view::ListPage;

/// Pages shown at each end of the pager.
const EDGE_PAGES: usize = 2;
/// Pages shown before the current one.
const PAGES_BEFORE: usize = 2;
/// Pages shown after the current one.
const PAGES_AFTER: usize = 4;

/// Page numbers to draw in the pager; `None` marks an ellipsis.
fn pager_window(total_pages: usize, current_page: usize) -> Vec<Option<usize>> {
    if total_pages == 0 {
        return vec![];
    }

    let mut pages = Vec::new();

    let left_end = (1 + EDGE_PAGES).min(total_pages + 1);
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current_page.saturating_sub(PAGES_BEFORE));
    let mid_end = (current_page + PAGES_AFTER + 1).min(total_pages + 1);

    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(total_pages.saturating_sub(EDGE_PAGES) + 1);

    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=total_pages).map(Some));

    pages
}

/// One page of items plus what a pager needs to render around it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pages: Vec<Option<usize>>,
    pub page: usize,
    pub total_pages: usize,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, current_page: usize, total_pages: usize) -> Self {
        let current_page = current_page.max(1);

        Self {
            items,
            pages: pager_window(total_pages, current_page),
            page: current_page,
            total_pages,
        }
    }

    /// Copies the borrowed items of an engine page into an owned pager.
    pub fn from_page(page: &ListPage<'_, T>) -> Self
    where
        T: Clone,
    {
        let items = page.items.iter().map(|item| (*item).clone()).collect();
        Self::new(items, page.page.current_page, page.total_pages)
    }
}
