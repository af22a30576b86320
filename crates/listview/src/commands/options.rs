use chrono::{Datelike, FixedOffset, Month};
use std::collections::BTreeSet;

use crate::facets::{FacetKind, FacetSpec, FacetValue, NOT_SPECIFIED};
use crate::model::Entity;

/// Distinct values of one facet across `items`, for a filter dropdown.
///
/// Text values are sorted, months follow the calendar, dates are local
/// `YYYY-MM-DD` days in ascending order. [`NOT_SPECIFIED`] is appended when
/// any entity has no value.
pub fn run<'a, I>(items: I, spec: &FacetSpec, offset: FixedOffset) -> Vec<String>
where
    I: IntoIterator<Item = &'a Entity>,
{
    let mut texts = BTreeSet::new();
    let mut months = BTreeSet::new();
    let mut unspecified = false;

    for entity in items {
        let value = FacetValue::extract(entity, spec, offset);
        if value.is_unspecified() {
            unspecified = true;
            continue;
        }
        match (spec.kind, value.as_date()) {
            (FacetKind::Month, Some(date)) => {
                months.insert(date.month());
            }
            (FacetKind::Date, Some(date)) => {
                texts.insert(date.format("%Y-%m-%d").to_string());
            }
            _ => texts.extend(value.texts().into_iter().map(str::to_string)),
        }
    }

    let mut options: Vec<String> = if spec.kind == FacetKind::Month {
        months
            .into_iter()
            .filter_map(|m| u8::try_from(m).ok().and_then(|m| Month::try_from(m).ok()))
            .map(|m| m.name().to_string())
            .collect()
    } else {
        texts.into_iter().collect()
    };
    if unspecified {
        options.push(NOT_SPECIFIED.to_string());
    }
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    #[test]
    fn scalar_options_are_sorted_and_distinct() {
        let items = vec![
            Entity::new(json!({ "status": "Inactive" })),
            Entity::new(json!({ "status": "Active" })),
            Entity::new(json!({ "status": "Active" })),
        ];
        assert_eq!(
            run(&items, &FacetSpec::scalar("status"), utc()),
            vec!["Active", "Inactive"]
        );
    }

    #[test]
    fn nested_options_flatten_and_flag_missing() {
        let items = vec![
            Entity::new(json!({ "interest": [{ "category": "Electronics", "brands": ["Sony", "LG"] }] })),
            Entity::new(json!({ "interest": [{ "category": "Furniture", "brands": ["Ikea"] }] })),
            Entity::new(json!({ "interest": [] })),
        ];
        assert_eq!(
            run(&items, &FacetSpec::nested("category", "interest", "category"), utc()),
            vec!["Electronics", "Furniture", NOT_SPECIFIED]
        );
        assert_eq!(
            run(&items, &FacetSpec::nested("brands", "interest", "brands"), utc()),
            vec!["Ikea", "LG", "Sony", NOT_SPECIFIED]
        );
    }

    #[test]
    fn month_options_follow_calendar() {
        let items = vec![
            Entity::new(json!({ "createdAt": "2026-12-01T10:00:00Z" })),
            Entity::new(json!({ "createdAt": "2026-02-01T10:00:00Z" })),
            Entity::new(json!({ "createdAt": "2025-04-20T10:00:00Z" })),
        ];
        assert_eq!(
            run(&items, &FacetSpec::month("month", "createdAt"), utc()),
            vec!["February", "April", "December"]
        );
    }

    #[test]
    fn date_options_are_local_days() {
        let ist = FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
        let items = vec![
            Entity::new(json!({ "visitedAt": "2026-01-15T20:00:00Z" })),
            Entity::new(json!({ "visitedAt": "2026-01-10" })),
        ];
        assert_eq!(
            run(&items, &FacetSpec::date("visitedAt"), ist),
            vec!["2026-01-10", "2026-01-16"]
        );
    }

    #[test]
    fn no_items_no_options() {
        assert!(run(&[], &FacetSpec::scalar("status"), utc()).is_empty());
    }
}
