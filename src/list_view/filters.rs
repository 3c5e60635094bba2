//! The four pipeline stages. Each stage is pure and keeps the input order.

use crate::domain::record::Record;
use crate::list_view::date::{DateRange, field_date};

/// Tag value meaning "no tag filter", as sent by the filter dropdown.
pub const ALL_TAGS: &str = "all";

/// Keeps records where any of `fields` contains `term`, ignoring case.
///
/// Missing fields never match. An empty term keeps everything.
pub fn search<'a, R, I>(records: I, term: &str, fields: &[&str]) -> Vec<&'a R>
where
    R: Record + ?Sized + 'a,
    I: IntoIterator<Item = &'a R>,
{
    if term.is_empty() {
        return records.into_iter().collect();
    }
    let needle = term.to_lowercase();
    records
        .into_iter()
        .filter(|record| {
            fields.iter().any(|name| {
                record
                    .field(name)
                    .is_some_and(|value| value.as_text().to_lowercase().contains(&needle))
            })
        })
        .collect()
}

/// Keeps records whose `tag_field` equals `tag_value` exactly.
///
/// `""` and [`ALL_TAGS`] keep everything.
pub fn filter_by_tag<'a, R, I>(records: I, tag_field: &str, tag_value: &str) -> Vec<&'a R>
where
    R: Record + ?Sized + 'a,
    I: IntoIterator<Item = &'a R>,
{
    if tag_value.is_empty() || tag_value == ALL_TAGS {
        return records.into_iter().collect();
    }
    records
        .into_iter()
        .filter(|record| {
            record
                .field(tag_field)
                .is_some_and(|value| value.as_text() == tag_value)
        })
        .collect()
}

/// Keeps records whose `date_field`, taken as a calendar date, lies in `range`.
///
/// While any bound is set, records without a parsable date are dropped.
/// Without bounds every record is kept, dated or not.
pub fn filter_by_date_range<'a, R, I>(records: I, date_field: &str, range: &DateRange) -> Vec<&'a R>
where
    R: Record + ?Sized + 'a,
    I: IntoIterator<Item = &'a R>,
{
    if !range.is_active() {
        return records.into_iter().collect();
    }
    records
        .into_iter()
        .filter(|record| {
            record
                .field(date_field)
                .as_ref()
                .and_then(field_date)
                .is_some_and(|date| range.contains(date))
        })
        .collect()
}

/// Number of pages needed for `count` items. Never less than one.
pub fn total_pages(count: usize, items_per_page: usize) -> usize {
    if items_per_page == 0 {
        return 1;
    }
    count.div_ceil(items_per_page).max(1)
}

/// Returns page `current_page` (1-based) of `records`.
///
/// The page is not clamped here: page 0, a page past the end, or a zero page
/// size give an empty slice. Callers clamp with [`PageState::clamp`] first.
///
/// [`PageState::clamp`]: crate::list_view::PageState::clamp
pub fn paginate<T>(records: &[T], current_page: usize, items_per_page: usize) -> &[T] {
    if current_page == 0 || items_per_page == 0 {
        return &[];
    }
    let Some(start) = (current_page - 1).checked_mul(items_per_page) else {
        return &[];
    };
    if start >= records.len() {
        return &[];
    }
    let end = start.saturating_add(items_per_page).min(records.len());
    &records[start..end]
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use serde_json::json;

    use super::*;
    use crate::domain::record::DynamicRecord;

    fn person(name: &str, email: Option<&str>, role: &str) -> DynamicRecord {
        let record = DynamicRecord::new().with("name", name).with("role", role);
        match email {
            Some(email) => record.with("email", email),
            None => record,
        }
    }

    fn people() -> Vec<DynamicRecord> {
        vec![
            person("John Doe", Some("john@example.com"), "admin"),
            person("Mary Major", None, "broker"),
            person("Johnny Cash", Some("cash@example.com"), "broker"),
        ]
    }

    fn names<R: Record>(records: &[&R]) -> Vec<String> {
        records
            .iter()
            .filter_map(|r| r.field("name").map(|v| v.as_text().into_owned()))
            .collect()
    }

    #[test]
    fn empty_search_is_identity() {
        let records = people();
        let found = search(&records, "", &["name"]);
        assert_eq!(found.len(), records.len());
        assert!(found.iter().zip(&records).all(|(a, b)| std::ptr::eq(*a, b)));
    }

    #[test]
    fn search_ignores_case() {
        let records = people();
        let found = search(&records, "JOHN", &["name"]);
        assert_eq!(names(&found), vec!["John Doe", "Johnny Cash"]);
    }

    #[test]
    fn search_matches_any_field_and_skips_missing() {
        let records = people();
        let found = search(&records, "example.com", &["email", "name"]);
        assert_eq!(names(&found), vec!["John Doe", "Johnny Cash"]);
    }

    #[test]
    fn search_covers_numbers() {
        let records = vec![
            DynamicRecord::new().with("policy", 120045),
            DynamicRecord::new().with("policy", 99),
        ];
        assert_eq!(search(&records, "2004", &["policy"]).len(), 1);
    }

    #[test]
    fn tag_filter_identity_values() {
        let records = people();
        assert_eq!(filter_by_tag(&records, "role", ALL_TAGS).len(), 3);
        assert_eq!(filter_by_tag(&records, "role", "").len(), 3);
    }

    #[test]
    fn tag_filter_is_exact() {
        let records = people();
        assert_eq!(
            names(&filter_by_tag(&records, "role", "broker")),
            vec!["Mary Major", "Johnny Cash"]
        );
        assert!(filter_by_tag(&records, "role", "Broker").is_empty());
        assert!(filter_by_tag(&records, "role", "brok").is_empty());
    }

    #[test]
    fn date_filter_without_bounds_keeps_undated() {
        let records = vec![
            DynamicRecord::new().with("submitDate", "2024-02-02"),
            DynamicRecord::new(),
            DynamicRecord::new().with("submitDate", "not a date"),
        ];
        let kept = filter_by_date_range(&records, "submitDate", &DateRange::default());
        assert_eq!(kept.len(), 3);
    }

    #[test]
    fn date_filter_drops_undated_when_bounded() {
        let records = vec![
            DynamicRecord::new().with("submitDate", "2024-02-02T17:45:00"),
            DynamicRecord::new(),
            DynamicRecord::new().with("submitDate", json!(null)),
            DynamicRecord::new().with("submitDate", "not a date"),
        ];
        let range = DateRange::new(NaiveDate::from_ymd_opt(2024, 1, 1), None);
        let kept = filter_by_date_range(&records, "submitDate", &range);
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn date_filter_single_sided() {
        let records = vec![
            DynamicRecord::new().with("d", "2023-06-30"),
            DynamicRecord::new().with("d", "2024-06-30"),
        ];
        let until = DateRange::new(None, NaiveDate::from_ymd_opt(2023, 12, 31));
        assert_eq!(filter_by_date_range(&records, "d", &until).len(), 1);
        let since = DateRange::new(NaiveDate::from_ymd_opt(2024, 6, 30), None);
        assert_eq!(filter_by_date_range(&records, "d", &since).len(), 1);
    }

    #[test]
    fn total_pages_minimum_is_one() {
        assert_eq!(total_pages(0, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(5, 0), 1);
    }

    #[test]
    fn paginate_slices_and_clips() {
        let items: Vec<u32> = (1..=7).collect();
        assert_eq!(paginate(&items, 1, 3), &[1, 2, 3]);
        assert_eq!(paginate(&items, 3, 3), &[7]);
        assert!(paginate(&items, 4, 3).is_empty());
        assert!(paginate(&items, 0, 3).is_empty());
        assert!(paginate(&items, 1, 0).is_empty());
        assert_eq!(paginate(&items, 1, 100), items.as_slice());
    }

    #[test]
    fn paginate_survives_huge_page_numbers() {
        let items = [1, 2, 3];
        assert!(paginate(&items, usize::MAX, 2).is_empty());
    }
}
