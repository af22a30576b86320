//! Facet filtering.
//!
//! [`FacetCriteria`] maps facet keys to accepted values. An entity passes when
//! every facet with a non-empty accepted set is satisfied (AND across facets).
//! Within a facet, accepted values are alternatives (OR).

use chrono::{FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;

use super::spec::{find_spec, FacetKind, FacetSpec};
use super::value::{is_sentinel, month_name, parse_date_str, same_day, FacetValue};
use crate::model::Entity;

/// Accepted values per facet key.
///
/// An empty list for a key imposes no constraint; it never means "match nothing".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FacetCriteria(BTreeMap<String, Vec<String>>);

impl FacetCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`FacetCriteria::set`].
    pub fn with<I, V>(mut self, key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.set(key, values);
        self
    }

    /// Replace the accepted values of a facet. Duplicates are dropped, order kept.
    pub fn set<I, V>(&mut self, key: impl Into<String>, values: I)
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let mut accepted: Vec<String> = Vec::new();
        for value in values {
            let value = value.into();
            if !accepted.contains(&value) {
                accepted.push(value);
            }
        }
        self.0.insert(key.into(), accepted);
    }

    /// Add `value` to the facet if absent, remove it if present.
    pub fn toggle(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let value = value.into();
        let accepted = self.0.entry(key.into()).or_default();
        if let Some(pos) = accepted.iter().position(|v| *v == value) {
            accepted.remove(pos);
        } else {
            accepted.push(value);
        }
    }

    pub fn clear(&mut self, key: &str) {
        self.0.remove(key);
    }

    pub fn get(&self, key: &str) -> &[String] {
        self.0.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    /// True when no facet constrains the list.
    pub fn is_empty(&self) -> bool {
        self.active().next().is_none()
    }

    /// Facets with at least one accepted value.
    pub fn active(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0
            .iter()
            .filter(|(_, values)| !values.is_empty())
            .map(|(key, values)| (key.as_str(), values.as_slice()))
    }

    /// Check every active facet against the entity.
    ///
    /// Keys without a spec are treated as scalar facets on the field of the same name.
    pub fn matches(&self, entity: &Entity, specs: &[FacetSpec], offset: FixedOffset) -> bool {
        self.active()
            .all(|(key, accepted)| FacetFilter::resolve(key, accepted, specs).matches(entity, offset))
    }
}

/// One active facet: its spec paired with the accepted values.
#[derive(Debug, Clone)]
pub struct FacetFilter<'a> {
    pub spec: Cow<'a, FacetSpec>,
    pub accepted: &'a [String],
}

impl<'a> FacetFilter<'a> {
    pub fn new(spec: &'a FacetSpec, accepted: &'a [String]) -> Self {
        Self {
            spec: Cow::Borrowed(spec),
            accepted,
        }
    }

    pub fn resolve(key: &str, accepted: &'a [String], specs: &'a [FacetSpec]) -> Self {
        let spec = match find_spec(specs, key) {
            Some(spec) => Cow::Borrowed(spec),
            None => Cow::Owned(FacetSpec::scalar(key)),
        };
        Self { spec, accepted }
    }

    pub fn matches(&self, entity: &Entity, offset: FixedOffset) -> bool {
        if self.accepted.is_empty() {
            return true;
        }

        let value = FacetValue::extract(entity, &self.spec, offset);
        if value.is_unspecified() && self.accepted.iter().any(|v| is_sentinel(v)) {
            return true;
        }

        match self.spec.kind {
            FacetKind::Date => self.date_matches(&value, offset),
            FacetKind::Month => value
                .as_date()
                .map(|date| self.accepts(month_name(&date)))
                .unwrap_or(false),
            FacetKind::Scalar | FacetKind::Nested => {
                value.texts().into_iter().any(|text| self.accepts(text))
            }
        }
    }

    fn accepts(&self, candidate: &str) -> bool {
        self.accepted.iter().any(|v| v == candidate)
    }

    fn date_matches(&self, value: &FacetValue, offset: FixedOffset) -> bool {
        let Some(date) = value.as_date() else {
            return false;
        };
        self.accepted
            .iter()
            .filter(|v| !is_sentinel(v))
            .any(|v| match NaiveDate::parse_from_str(v.trim(), "%Y-%m-%d") {
                // A bare day names the local calendar day.
                Ok(day) => date.date_naive() == day,
                Err(_) => parse_date_str(v, offset).is_some_and(|wanted| same_day(&date, &wanted)),
            })
    }
}

/// Keep the entities that satisfy every active facet, in order.
pub fn filter<'a, I>(
    items: I,
    criteria: &FacetCriteria,
    specs: &[FacetSpec],
    offset: FixedOffset,
) -> Vec<&'a Entity>
where
    I: IntoIterator<Item = &'a Entity>,
{
    if criteria.is_empty() {
        return items.into_iter().collect();
    }
    items
        .into_iter()
        .filter(|entity| criteria.matches(entity, specs, offset))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    fn ids(items: &[&Entity]) -> Vec<String> {
        items.iter().map(|e| e.id().unwrap().to_string()).collect()
    }

    fn interest_entities() -> Vec<Entity> {
        vec![
            Entity::new(json!({
                "id": "1",
                "interest": [{ "category": "Electronics", "brands": ["Sony", "LG"] }]
            })),
            Entity::new(json!({
                "id": "2",
                "interest": [{ "category": "Electronics", "brands": ["Samsung"] }]
            })),
            Entity::new(json!({ "id": "3", "interest": [] })),
            Entity::new(json!({
                "id": "4",
                "interest": [{ "category": "Furniture", "brands": ["Sony"] }]
            })),
        ]
    }

    fn interest_specs() -> Vec<FacetSpec> {
        vec![
            FacetSpec::nested("category", "interest", "category"),
            FacetSpec::nested("brands", "interest", "brands"),
        ]
    }

    #[test]
    fn empty_criteria_keeps_everything() {
        let items = interest_entities();
        let out = filter(&items, &FacetCriteria::new(), &interest_specs(), utc());
        assert_eq!(out.len(), items.len());
    }

    #[test]
    fn empty_value_list_is_no_constraint() {
        let items = interest_entities();
        let criteria = FacetCriteria::new().with("category", Vec::<String>::new());
        assert!(criteria.is_empty());
        let out = filter(&items, &criteria, &interest_specs(), utc());
        assert_eq!(out.len(), items.len());
    }

    #[test]
    fn sentinel_matches_empty_interest() {
        let items = interest_entities();
        let criteria = FacetCriteria::new().with("category", ["Not Specified"]);
        let out = filter(&items, &criteria, &interest_specs(), utc());
        assert_eq!(ids(&out), vec!["3"]);
    }

    #[test]
    fn sentinel_combines_with_concrete_values() {
        let items = interest_entities();
        let criteria = FacetCriteria::new().with("category", ["None", "Furniture"]);
        let out = filter(&items, &criteria, &interest_specs(), utc());
        assert_eq!(ids(&out), vec!["3", "4"]);
    }

    #[test]
    fn facets_combine_with_and() {
        let items = interest_entities();
        let criteria = FacetCriteria::new()
            .with("category", ["Electronics"])
            .with("brands", ["Sony"]);
        let out = filter(&items, &criteria, &interest_specs(), utc());
        assert_eq!(ids(&out), vec!["1"]);
    }

    #[test]
    fn scalar_object_compares_by_name() {
        let items = vec![
            Entity::new(json!({ "id": "1", "createdBy": { "name": "Alice" } })),
            Entity::new(json!({ "id": "2", "createdBy": { "name": "Bob" } })),
        ];
        let specs = vec![FacetSpec::scalar("creator").at("createdBy")];
        let criteria = FacetCriteria::new().with("creator", ["Alice"]);
        assert_eq!(ids(&filter(&items, &criteria, &specs, utc())), vec!["1"]);
    }

    #[test]
    fn unknown_key_is_a_scalar_facet_on_that_field() {
        let items = vec![
            Entity::new(json!({ "id": "1", "status": "Active" })),
            Entity::new(json!({ "id": "2", "status": "Inactive" })),
            Entity::new(json!({ "id": "3" })),
        ];
        let criteria = FacetCriteria::new().with("status", ["Active"]);
        assert_eq!(ids(&filter(&items, &criteria, &[], utc())), vec!["1"]);
    }

    #[test]
    fn missing_field_fails_unless_sentinel_requested() {
        let entity = Entity::new(json!({ "id": "1" }));
        let spec = FacetSpec::scalar("status");
        let concrete = vec!["Active".to_string()];
        let sentinel = vec!["Not Specified".to_string()];
        assert!(!FacetFilter::new(&spec, &concrete).matches(&entity, utc()));
        assert!(FacetFilter::new(&spec, &sentinel).matches(&entity, utc()));
    }

    #[test]
    fn values_compare_case_sensitively() {
        let entity = Entity::new(json!({ "id": "1", "status": "Active" }));
        let criteria = FacetCriteria::new().with("status", ["active"]);
        assert!(!criteria.matches(&entity, &[], utc()));
    }

    #[test]
    fn date_facet_matches_calendar_day() {
        let entity = Entity::new(json!({ "id": "1", "receivedDate": "2026-01-15" }));
        let specs = vec![FacetSpec::date("receivedDate")];

        let same_day = FacetCriteria::new().with("receivedDate", ["2026-01-15T00:00:00Z"]);
        let later_that_day = FacetCriteria::new().with("receivedDate", ["2026-01-15T18:45:00Z"]);
        let next_day = FacetCriteria::new().with("receivedDate", ["2026-01-16"]);

        assert!(same_day.matches(&entity, &specs, utc()));
        assert!(later_that_day.matches(&entity, &specs, utc()));
        assert!(!next_day.matches(&entity, &specs, utc()));
    }

    #[test]
    fn date_facet_excludes_entities_without_the_date() {
        let entity = Entity::new(json!({ "id": "1" }));
        let specs = vec![FacetSpec::date("expiresAt")];
        let criteria = FacetCriteria::new().with("expiresAt", ["2026-01-15"]);
        assert!(!criteria.matches(&entity, &specs, utc()));
    }

    #[test]
    fn date_facet_uses_local_offset() {
        let ist = FixedOffset::east_opt(5 * 3600 + 1800).unwrap();
        let entity = Entity::new(json!({ "id": "1", "visitedAt": "2026-01-15T20:00:00Z" }));
        let specs = vec![FacetSpec::date("visitedAt")];
        let criteria = FacetCriteria::new().with("visitedAt", ["2026-01-16T09:00:00+05:30"]);
        assert!(criteria.matches(&entity, &specs, ist));
        assert!(!criteria.matches(&entity, &specs, utc()));
    }

    #[test]
    fn bare_day_names_local_calendar_day() {
        let pst = FixedOffset::west_opt(8 * 3600).unwrap();
        let entity = Entity::new(json!({ "id": "1", "visitedAt": "2026-01-15T06:00:00Z" }));
        let specs = vec![FacetSpec::date("visitedAt")];
        let criteria = FacetCriteria::new().with("visitedAt", ["2026-01-14"]);
        assert!(criteria.matches(&entity, &specs, pst));
        assert!(!criteria.matches(&entity, &specs, utc()));
    }

    #[test]
    fn month_facet_compares_long_names() {
        let items = vec![
            Entity::new(json!({ "id": "1", "createdAt": "2026-01-15T10:00:00Z" })),
            Entity::new(json!({ "id": "2", "createdAt": "2026-02-01T10:00:00Z" })),
            Entity::new(json!({ "id": "3" })),
        ];
        let specs = vec![FacetSpec::month("month", "createdAt")];
        let criteria = FacetCriteria::new().with("month", ["February"]);
        assert_eq!(ids(&filter(&items, &criteria, &specs, utc())), vec!["2"]);
    }

    #[test]
    fn toggle_adds_then_removes() {
        let mut criteria = FacetCriteria::new();
        criteria.toggle("status", "Active");
        assert_eq!(criteria.get("status"), ["Active".to_string()]);
        criteria.toggle("status", "Active");
        assert!(criteria.get("status").is_empty());
        assert!(criteria.is_empty());
    }

    #[test]
    fn set_deduplicates_preserving_order() {
        let criteria = FacetCriteria::new().with("status", ["b", "a", "b"]);
        assert_eq!(criteria.get("status"), ["b".to_string(), "a".to_string()]);
    }

    #[test]
    fn clear_removes_facet() {
        let mut criteria = FacetCriteria::new().with("status", ["Active"]);
        criteria.clear("status");
        assert!(criteria.is_empty());
        assert!(criteria.get("status").is_empty());
    }
}
