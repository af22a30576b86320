use listview::commands::search::{highlight, project, MatchSegment};
use listview::commands::view::ListView;
use listview::config::PageConfig;
use listview::model::EntityId;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::styles;

const MAX_CELL_WIDTH: usize = 32;
const ELLIPSIS: &str = "…";

/// Columns shown in the terminal: the export columns if configured,
/// otherwise the search fields, otherwise just the id.
fn columns(page: &PageConfig) -> Vec<(String, String)> {
    if !page.columns.is_empty() {
        return page
            .columns
            .iter()
            .map(|c| (c.header.clone(), c.field.clone()))
            .collect();
    }
    if !page.search_fields.is_empty() {
        return page
            .search_fields
            .iter()
            .map(|f| (f.clone(), f.clone()))
            .collect();
    }
    let id = page.id_field.clone().unwrap_or_else(|| "id".to_string());
    vec![(id.clone(), id)]
}

pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    let budget = max_width.saturating_sub(ELLIPSIS.width());
    let mut out = String::new();
    let mut width = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if width + w > budget {
            break;
        }
        out.push(c);
        width += w;
    }
    out.push_str(ELLIPSIS);
    out
}

fn pad(styled: String, plain_width: usize, width: usize) -> String {
    format!("{}{}", styled, " ".repeat(width.saturating_sub(plain_width)))
}

fn highlighted(text: &str, term: &str) -> String {
    highlight(text, term)
        .into_iter()
        .map(|segment| match segment {
            MatchSegment::Plain(s) => s,
            MatchSegment::Match(s) => styles::highlight().apply_to(s).to_string(),
        })
        .collect()
}

/// One page as a table, with selection marks and a footer.
pub fn list(view: &ListView<'_>, page: &PageConfig, search: &str) -> String {
    let cols = columns(page);
    let rows: Vec<(bool, Vec<String>)> = view
        .items
        .iter()
        .map(|entity| {
            let cells = cols
                .iter()
                .map(|(_, field)| truncate_to_width(&project(entity.get(field)), MAX_CELL_WIDTH))
                .collect();
            (view.is_selected(entity), cells)
        })
        .collect();

    let widths: Vec<usize> = cols
        .iter()
        .enumerate()
        .map(|(i, (header, _))| {
            rows.iter()
                .map(|(_, cells)| cells[i].width())
                .chain(std::iter::once(header.width()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    let header_line: Vec<String> = cols
        .iter()
        .zip(&widths)
        .map(|((header, _), &w)| pad(styles::header().apply_to(header).to_string(), header.width(), w))
        .collect();
    out.push_str(&format!("    {}\n", header_line.join("  ").trim_end()));

    if rows.is_empty() {
        out.push_str(&format!("    {}\n", styles::muted().apply_to("No matching items.")));
    }

    for (selected, cells) in &rows {
        let mark = if *selected {
            styles::selected().apply_to("[x]").to_string()
        } else {
            "[ ]".to_string()
        };
        let line: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, &w)| pad(highlighted(cell, search), cell.width(), w))
            .collect();
        out.push_str(&format!("{} {}\n", mark, line.join("  ").trim_end()));
    }

    out.push_str(&format!("\n{}\n", styles::muted().apply_to(footer(view))));
    out
}

pub fn footer(view: &ListView<'_>) -> String {
    format!(
        "Page {} of {} · {} item(s) · {} selected",
        view.current_page,
        view.total_pages.max(1),
        view.total_items,
        view.selected_ids.len()
    )
}

/// A facet heading followed by its options.
pub fn facet(label: &str, options: &[String]) -> String {
    let mut out = format!("{}\n", styles::title().apply_to(label));
    if options.is_empty() {
        out.push_str(&format!("  {}\n", styles::muted().apply_to("(no values)")));
    }
    for option in options {
        out.push_str(&format!("  {}\n", option));
    }
    out
}

pub fn deleted(ids: &[EntityId]) -> String {
    let joined = ids
        .iter()
        .map(EntityId::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    styles::success()
        .apply_to(format!("Deleted {} item(s): {}", ids.len(), joined))
        .to_string()
}
