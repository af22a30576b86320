use serde::Serialize;
use serde_json::Value;

use crate::facets::normalize_scalar;
use crate::model::Entity;

/// A piece of a field split around search matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "lowercase")]
pub enum MatchSegment {
    Plain(String),
    Match(String),
}

/// String projection of a field for search and export.
///
/// Missing and `null` fields project to `""`, objects to their `name`,
/// arrays to their element projections joined by a space.
pub fn project(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| project(Some(item)))
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" "),
        Some(other) => normalize_scalar(other).unwrap_or_default(),
    }
}

/// Case-insensitive substring match across `fields`.
///
/// No fields or a blank term means no search constraint.
pub fn matches<S: AsRef<str>>(entity: &Entity, term: &str, fields: &[S]) -> bool {
    if fields.is_empty() || term.trim().is_empty() {
        return true;
    }
    let term_lower = term.to_lowercase();
    fields.iter().any(|field| {
        project(entity.get(field.as_ref()))
            .to_lowercase()
            .contains(&term_lower)
    })
}

pub fn filter<'a, I, S>(items: I, term: &str, fields: &[S]) -> Vec<&'a Entity>
where
    I: IntoIterator<Item = &'a Entity>,
    S: AsRef<str>,
{
    items
        .into_iter()
        .filter(|entity| matches(entity, term, fields))
        .collect()
}

/// Splits `text` around case-insensitive occurrences of `term`.
pub fn highlight(text: &str, term: &str) -> Vec<MatchSegment> {
    if term.trim().is_empty() {
        return vec![MatchSegment::Plain(text.to_string())];
    }

    let term_lower = term.to_lowercase();

    // Lowercasing can change byte lengths outside ASCII, so each char's offset in
    // the lowercased text is paired with its offset in `text`.
    let mut lower = String::with_capacity(text.len());
    let mut bounds = Vec::with_capacity(text.len() + 1);
    for (idx, c) in text.char_indices() {
        bounds.push((lower.len(), idx));
        lower.extend(c.to_lowercase());
    }
    bounds.push((lower.len(), text.len()));
    let to_text = |lower_idx: usize| {
        bounds
            .binary_search_by_key(&lower_idx, |&(l, _)| l)
            .ok()
            .map(|i| bounds[i].1)
    };

    let mut segments = Vec::new();
    let mut last_idx = 0;

    for (start, found) in lower.match_indices(&term_lower) {
        // Matches that start or end inside one char's lowercase expansion are skipped.
        let (Some(start_idx), Some(end_idx)) = (to_text(start), to_text(start + found.len()))
        else {
            continue;
        };
        if start_idx > last_idx {
            segments.push(MatchSegment::Plain(text[last_idx..start_idx].to_string()));
        }
        segments.push(MatchSegment::Match(text[start_idx..end_idx].to_string()));
        last_idx = end_idx;
    }

    if last_idx < text.len() {
        segments.push(MatchSegment::Plain(text[last_idx..].to_string()));
    }

    segments
}
