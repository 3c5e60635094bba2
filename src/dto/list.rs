use serde::Serialize;

use crate::list_view::{DateRange, FilterState, PageState};
use crate::pagination::Paginated;

/// Validated filter and page request for a list view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub filters: FilterState,
    /// Requested page, 1-based.
    pub page: usize,
    /// Page size requested by the user interface, if any.
    pub per_page: Option<usize>,
}

impl ListQuery {
    pub fn page_state(&self, default_per_page: usize) -> PageState {
        PageState::new(self.page, self.per_page.unwrap_or(default_per_page))
    }
}

/// Data required to render one list page.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPageData<T> {
    /// Records of the current page with the pager around them.
    pub records: Paginated<T>,
    /// Number of records matching the filters, across all pages.
    pub total: usize,
    /// Search query echoed back to the view when present.
    pub search_query: Option<String>,
    /// Active tag filter, if any.
    pub tag: Option<String>,
    /// Values offered by the tag dropdown.
    pub tag_options: Vec<String>,
    pub date_range: DateRange,
}
