//! Query-string form shared by every list view.

use serde::Deserialize;
use validator::Validate;

use crate::dto::list::ListQuery;
use crate::forms::FormError;
use crate::list_view::{ALL_TAGS, DateRange, FilterState};

/// Raw list-view query, e.g. `?search=acme&tag=active&from=2024-01-01&page=2`.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ListQueryForm {
    #[validate(length(max = 200))]
    pub search: Option<String>,
    pub tag: Option<String>,
    /// Inclusive start date.
    pub from: Option<String>,
    /// Inclusive end date.
    pub to: Option<String>,
    #[validate(range(min = 1))]
    pub page: Option<usize>,
    #[validate(range(min = 1, max = 500))]
    pub per_page: Option<usize>,
}

impl ListQueryForm {
    /// Parses a URL query string, with or without the leading `?`.
    pub fn from_query_string(query: &str) -> Result<Self, FormError> {
        let query = query.strip_prefix('?').unwrap_or(query);
        serde_html_form::from_str(query).map_err(|err| FormError::Malformed(err.to_string()))
    }
}

impl TryFrom<ListQueryForm> for ListQuery {
    type Error = FormError;

    fn try_from(form: ListQueryForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let search_term = form
            .search
            .map(|s| s.trim().to_string())
            .unwrap_or_default();
        let tag = form
            .tag
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty() && t != ALL_TAGS);
        let date_range = DateRange::from_strs(
            form.from.as_deref().unwrap_or_default(),
            form.to.as_deref().unwrap_or_default(),
        )
        .map_err(|err| FormError::InvalidDate(err.0))?;

        Ok(ListQuery {
            filters: FilterState {
                search_term,
                tag,
                date_range,
            },
            page: form.page.unwrap_or(1),
            per_page: form.per_page,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn parses_full_query_string() {
        let form = ListQueryForm::from_query_string(
            "?search=+Acme%20Co+&tag=active&from=2024-01-01&to=2024-12-31&page=2&per_page=25",
        )
        .unwrap();
        let query = ListQuery::try_from(form).unwrap();

        assert_eq!(query.filters.search_term, "Acme Co");
        assert_eq!(query.filters.tag.as_deref(), Some("active"));
        assert_eq!(
            query.filters.date_range,
            DateRange::new(
                NaiveDate::from_ymd_opt(2024, 1, 1),
                NaiveDate::from_ymd_opt(2024, 12, 31)
            )
        );
        assert_eq!(query.page, 2);
        assert_eq!(query.per_page, Some(25));
    }

    #[test]
    fn empty_query_means_no_filters() {
        let form = ListQueryForm::from_query_string("").unwrap();
        let query = ListQuery::try_from(form).unwrap();
        assert_eq!(query.filters, FilterState::default());
        assert_eq!(query.page, 1);
        assert_eq!(query.per_page, None);
    }

    #[test]
    fn all_tag_and_blank_dates_are_ignored() {
        let form = ListQueryForm::from_query_string("tag=all&from=&to=").unwrap();
        let query = ListQuery::try_from(form).unwrap();
        assert_eq!(query.filters.tag, None);
        assert!(!query.filters.date_range.is_active());
    }

    #[test]
    fn rejects_invalid_date() {
        let form = ListQueryForm::from_query_string("from=31-31-2024").unwrap();
        assert!(matches!(
            ListQuery::try_from(form),
            Err(FormError::InvalidDate(_))
        ));
    }

    #[test]
    fn rejects_out_of_range_paging() {
        let form = ListQueryForm {
            page: Some(0),
            ..ListQueryForm::default()
        };
        assert!(matches!(ListQuery::try_from(form), Err(FormError::Validation(_))));

        let form = ListQueryForm::from_query_string("per_page=100000").unwrap();
        assert!(matches!(ListQuery::try_from(form), Err(FormError::Validation(_))));
    }

    #[test]
    fn rejects_non_numeric_page() {
        assert!(matches!(
            ListQueryForm::from_query_string("page=two"),
            Err(FormError::Malformed(_))
        ));
    }
}
