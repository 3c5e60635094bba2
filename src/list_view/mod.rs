//! Generic list-view engine: search, tag filter, date-range filter, paginate.
//!
//! Every list page of the portal runs the same pipeline over its records,
//! configured by a [`ListViewSpec`]:
//!
//! `records → search → tag filter → date filter → page`
//!
//! The pipeline holds no state between calls. Running it twice on the same
//! input gives the same output.

pub mod date;
pub mod filters;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::record::Record;

pub use date::{DateParseError, DateRange, normalize_date, parse_timestamp};
pub use filters::{
    ALL_TAGS, filter_by_date_range, filter_by_tag, paginate, search, total_pages,
};

/// Fields a list view searches and filters on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ListViewSpec {
    /// Fields tested by the free-text search, in order.
    pub searchable_fields: &'static [&'static str],
    /// Field matched exactly by the tag dropdown.
    pub tag_field: Option<&'static str>,
    /// Field compared against the date range.
    pub date_field: Option<&'static str>,
}

/// User-controlled filters of a list view.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub search_term: String,
    pub tag: Option<String>,
    pub date_range: DateRange,
}

impl FilterState {
    /// The tag to filter by, if any. `""` and `"all"` mean no filter.
    pub fn active_tag(&self) -> Option<&str> {
        self.tag
            .as_deref()
            .filter(|tag| !tag.is_empty() && *tag != ALL_TAGS)
    }
}

/// Current page and page size. Both are 1 or more.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageState {
    pub current_page: usize,
    pub items_per_page: usize,
}

impl PageState {
    /// Builds a page state, raising zero values to 1.
    pub fn new(current_page: usize, items_per_page: usize) -> Self {
        Self {
            current_page: current_page.max(1),
            items_per_page: items_per_page.max(1),
        }
    }

    /// Moves the page into `[1, total_pages(filtered_count)]`.
    #[must_use]
    pub fn clamp(self, filtered_count: usize) -> Self {
        let items_per_page = self.items_per_page.max(1);
        let last = total_pages(filtered_count, items_per_page);
        Self {
            current_page: self.current_page.clamp(1, last),
            items_per_page,
        }
    }
}

/// Filter and page state of one mounted list view.
///
/// Changing any filter sends the view back to page 1.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListViewState {
    filters: FilterState,
    page: PageState,
}

impl ListViewState {
    pub fn new(items_per_page: usize) -> Self {
        Self {
            filters: FilterState::default(),
            page: PageState::new(1, items_per_page),
        }
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn page(&self) -> PageState {
        self.page
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.filters.search_term = term.into();
        self.page.current_page = 1;
    }

    pub fn set_tag(&mut self, tag: Option<String>) {
        self.filters.tag = tag;
        self.page.current_page = 1;
    }

    pub fn set_date_range(&mut self, range: DateRange) {
        self.filters.date_range = range;
        self.page.current_page = 1;
    }

    /// Selects a page. Out-of-range pages are clamped by [`ListViewSpec::apply`].
    pub fn set_page(&mut self, page: usize) {
        self.page.current_page = page.max(1);
    }

    pub fn set_items_per_page(&mut self, items_per_page: usize) {
        self.page = PageState::new(1, items_per_page);
    }
}

/// One rendered page of a list view.
#[derive(Debug, PartialEq)]
pub struct ListPage<'a, R: ?Sized> {
    pub items: Vec<&'a R>,
    /// Records left after filtering, across all pages.
    pub total: usize,
    pub total_pages: usize,
    /// Page actually shown, after clamping.
    pub page: PageState,
}

impl ListViewSpec {
    /// Runs search, tag and date filters in that order.
    pub fn filter<'a, R>(&self, records: &'a [R], filters: &FilterState) -> Vec<&'a R>
    where
        R: Record,
    {
        let mut found = search(records, &filters.search_term, self.searchable_fields);
        if let (Some(field), Some(tag)) = (self.tag_field, filters.active_tag()) {
            found = filter_by_tag(found, field, tag);
        }
        if let Some(field) = self.date_field {
            found = filter_by_date_range(found, field, &filters.date_range);
        }
        found
    }

    /// Filters `records`, clamps `page` to the result and slices it.
    pub fn apply<'a, R>(&self, records: &'a [R], filters: &FilterState, page: PageState) -> ListPage<'a, R>
    where
        R: Record,
    {
        let filtered = self.filter(records, filters);
        let page = page.clamp(filtered.len());
        let items = paginate(&filtered, page.current_page, page.items_per_page).to_vec();
        ListPage {
            total: filtered.len(),
            total_pages: total_pages(filtered.len(), page.items_per_page),
            items,
            page,
        }
    }

    /// Distinct values of the tag field, sorted, for the filter dropdown.
    pub fn tag_options<R: Record>(&self, records: &[R]) -> Vec<String> {
        let Some(field) = self.tag_field else {
            return Vec::new();
        };
        records
            .iter()
            .filter_map(|record| record.field(field).map(|value| value.as_text().into_owned()))
            .filter(|value| !value.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
