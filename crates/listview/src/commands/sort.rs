use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::search::project;
use crate::facets::parse_date;
use crate::model::Entity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKind {
    /// Case-insensitive string order.
    #[default]
    Text,
    Number,
    Date,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: String,
    #[serde(default)]
    pub direction: SortDirection,
    #[serde(default)]
    pub kind: SortKind,
}

impl SortSpec {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
            kind: SortKind::Text,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            direction: SortDirection::Desc,
            ..Self::asc(field)
        }
    }

    pub fn of_kind(mut self, kind: SortKind) -> Self {
        self.kind = kind;
        self
    }

    /// Parses `field` or `field:desc` / `field:asc`.
    pub fn parse(s: &str) -> Self {
        match s.rsplit_once(':') {
            Some((field, "desc")) => Self::desc(field),
            Some((field, "asc")) => Self::asc(field),
            _ => Self::asc(s),
        }
    }
}

#[derive(Debug, PartialEq, PartialOrd)]
enum SortKey {
    Text(String),
    Number(f64),
    Date(i64),
}

fn sort_key(entity: &Entity, spec: &SortSpec, offset: FixedOffset) -> Option<SortKey> {
    let value = entity.get(&spec.field)?;
    match spec.kind {
        SortKind::Text => {
            let text = project(Some(value));
            (!text.is_empty()).then(|| SortKey::Text(text.to_lowercase()))
        }
        SortKind::Number => value
            .as_f64()
            .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
            .filter(|n: &f64| n.is_finite())
            .map(SortKey::Number),
        SortKind::Date => parse_date(value, offset).map(|d| SortKey::Date(d.timestamp_millis())),
    }
}

/// Stable sort by `spec`. Entities without a usable value go last in either direction;
/// for numbers that includes `NaN` and infinities.
pub fn sort(items: &mut [&Entity], spec: &SortSpec, offset: FixedOffset) {
    let mut keyed: Vec<(Option<SortKey>, &Entity)> = items
        .iter()
        .map(|entity| (sort_key(entity, spec, offset), *entity))
        .collect();

    keyed.sort_by(|(a, _), (b, _)| match (a, b) {
        (Some(a), Some(b)) => {
            let ord = a.partial_cmp(b).unwrap_or(Ordering::Equal);
            match spec.direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    for (slot, (_, entity)) in items.iter_mut().zip(keyed) {
        *slot = entity;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    fn sorted_ids(items: &[Entity], spec: &SortSpec) -> Vec<String> {
        let mut refs: Vec<&Entity> = items.iter().collect();
        sort(&mut refs, spec, utc());
        refs.iter().map(|e| e.id().unwrap().to_string()).collect()
    }

    #[test]
    fn text_sort_is_case_insensitive() {
        let items = vec![
            Entity::new(json!({ "id": "1", "name": "beta" })),
            Entity::new(json!({ "id": "2", "name": "Alpha" })),
            Entity::new(json!({ "id": "3", "name": "gamma" })),
        ];
        assert_eq!(sorted_ids(&items, &SortSpec::asc("name")), vec!["2", "1", "3"]);
        assert_eq!(sorted_ids(&items, &SortSpec::desc("name")), vec!["3", "1", "2"]);
    }

    #[test]
    fn number_sort_accepts_numeric_strings() {
        let items = vec![
            Entity::new(json!({ "id": "1", "amount": 100 })),
            Entity::new(json!({ "id": "2", "amount": "20.5" })),
            Entity::new(json!({ "id": "3", "amount": 3 })),
        ];
        let spec = SortSpec::asc("amount").of_kind(SortKind::Number);
        assert_eq!(sorted_ids(&items, &spec), vec!["3", "2", "1"]);
    }

    #[test]
    fn number_sort_puts_non_finite_values_last() {
        let mut items: Vec<Entity> = (0..40)
            .map(|i| {
                let amount = if i % 7 == 0 { json!("NaN") } else { json!((i * 37) % 101) };
                Entity::new(json!({ "id": i.to_string(), "amount": amount }))
            })
            .collect();
        items.push(Entity::new(json!({ "id": "inf", "amount": "inf" })));
        let spec = SortSpec::asc("amount").of_kind(SortKind::Number);

        let mut refs: Vec<&Entity> = items.iter().collect();
        sort(&mut refs, &spec, utc());
        let amounts: Vec<Option<f64>> = refs
            .iter()
            .map(|e| e.get("amount").unwrap().as_f64())
            .collect();

        let finite = amounts.iter().take_while(|a| a.is_some()).count();
        assert_eq!(finite, 34);
        assert!(amounts[finite..].iter().all(Option::is_none));
        assert!(amounts[..finite].windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn date_sort_orders_by_instant() {
        let items = vec![
            Entity::new(json!({ "id": "1", "date": "2026-02-01" })),
            Entity::new(json!({ "id": "2", "date": "2026-01-15T12:00:00Z" })),
            Entity::new(json!({ "id": "3", "date": "2026-01-15" })),
        ];
        let spec = SortSpec::desc("date").of_kind(SortKind::Date);
        assert_eq!(sorted_ids(&items, &spec), vec!["1", "2", "3"]);
    }

    #[test]
    fn missing_values_sort_last_both_ways() {
        let items = vec![
            Entity::new(json!({ "id": "1" })),
            Entity::new(json!({ "id": "2", "name": "b" })),
            Entity::new(json!({ "id": "3", "name": "a" })),
        ];
        assert_eq!(sorted_ids(&items, &SortSpec::asc("name")), vec!["3", "2", "1"]);
        assert_eq!(sorted_ids(&items, &SortSpec::desc("name")), vec!["2", "3", "1"]);
    }

    #[test]
    fn sort_is_stable() {
        let items = vec![
            Entity::new(json!({ "id": "1", "status": "Active" })),
            Entity::new(json!({ "id": "2", "status": "Active" })),
            Entity::new(json!({ "id": "3", "status": "Active" })),
        ];
        assert_eq!(sorted_ids(&items, &SortSpec::desc("status")), vec!["1", "2", "3"]);
    }

    #[test]
    fn parse_direction_suffix() {
        assert_eq!(SortSpec::parse("name"), SortSpec::asc("name"));
        assert_eq!(SortSpec::parse("createdAt:desc"), SortSpec::desc("createdAt"));
        assert_eq!(SortSpec::parse("amount:asc"), SortSpec::asc("amount"));
    }
}
