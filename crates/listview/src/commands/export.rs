use serde::{Deserialize, Serialize};

use super::search::project;
use crate::config::{ListSettings, PageConfig};
use crate::facets::parse_date;
use crate::model::Entity;

pub const SERIAL_HEADER: &str = "S.No.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    #[default]
    Text,
    /// Formatted with the configured `date_format` in local time.
    Date,
}

/// One exported column: a header and the dotted path it reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportColumn {
    pub header: String,
    pub field: String,
    #[serde(default)]
    pub kind: ColumnKind,
}

impl ExportColumn {
    pub fn text(header: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            field: field.into(),
            kind: ColumnKind::Text,
        }
    }

    pub fn date(header: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            kind: ColumnKind::Date,
            ..Self::text(header, field)
        }
    }
}

/// A rectangular table ready for a spreadsheet or CSV writer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportTable {
    pub title: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

fn cell(entity: &Entity, column: &ExportColumn, settings: &ListSettings) -> String {
    let value = entity.get(&column.field);
    match column.kind {
        ColumnKind::Text => project(value),
        ColumnKind::Date => value
            .and_then(|v| parse_date(v, settings.offset))
            .map(|d| d.format(&settings.date_format).to_string())
            .unwrap_or_default(),
    }
}

/// Shape `entities` into an export table using the page's columns.
pub fn run(entities: &[&Entity], page_config: &PageConfig, settings: &ListSettings) -> ExportTable {
    let serial = page_config.serial_numbers;

    let mut headers = Vec::with_capacity(page_config.columns.len() + usize::from(serial));
    if serial {
        headers.push(SERIAL_HEADER.to_string());
    }
    headers.extend(page_config.columns.iter().map(|c| c.header.clone()));

    let rows = entities
        .iter()
        .enumerate()
        .map(|(index, entity)| {
            let mut row = Vec::with_capacity(headers.len());
            if serial {
                row.push((index + 1).to_string());
            }
            row.extend(
                page_config
                    .columns
                    .iter()
                    .map(|column| cell(entity, column, settings)),
            );
            row
        })
        .collect();

    ExportTable {
        title: page_config
            .export_title
            .clone()
            .unwrap_or_else(|| page_config.entity.clone()),
        headers,
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ListViewConfig;
    use serde_json::json;

    fn page_config() -> PageConfig {
        PageConfig::new("expenses")
            .with_column(ExportColumn::text("Party", "party.name"))
            .with_column(ExportColumn::text("Amount", "amount"))
            .with_column(ExportColumn::date("Date", "date"))
    }

    fn expenses() -> Vec<Entity> {
        vec![
            Entity::new(json!({ "party": { "name": "Acme" }, "amount": 120, "date": "2026-03-05T22:30:00Z" })),
            Entity::new(json!({ "party": null, "amount": 45.5 })),
        ]
    }

    #[test]
    fn test_headers_and_serials() {
        let items = expenses();
        let refs: Vec<&Entity> = items.iter().collect();
        let cfg = page_config();
        let table = run(&refs, &cfg, &cfg.settings(&ListViewConfig::default()));

        assert_eq!(table.title, "expenses");
        assert_eq!(table.headers, vec!["S.No.", "Party", "Amount", "Date"]);
        assert_eq!(table.rows[0], vec!["1", "Acme", "120", "2026-03-05"]);
        assert_eq!(table.rows[1], vec!["2", "", "45.5", ""]);
    }

    #[test]
    fn test_dates_use_local_offset_and_format() {
        let items = expenses();
        let refs: Vec<&Entity> = items.iter().take(1).collect();
        let cfg = page_config();
        let base = ListViewConfig {
            utc_offset_minutes: 330,
            date_format: "%d/%m/%Y".into(),
            ..Default::default()
        };
        let table = run(&refs, &cfg, &cfg.settings(&base));
        assert_eq!(table.rows[0][3], "06/03/2026");
    }

    #[test]
    fn test_without_serial_numbers() {
        let items = expenses();
        let refs: Vec<&Entity> = items.iter().collect();
        let mut cfg = page_config();
        cfg.serial_numbers = false;
        cfg.export_title = Some("Expense Report".into());

        let table = run(&refs, &cfg, &cfg.settings(&ListViewConfig::default()));
        assert_eq!(table.title, "Expense Report");
        assert_eq!(table.headers[0], "Party");
        assert_eq!(table.rows[0].len(), 3);
    }

    #[test]
    fn test_empty_export_keeps_headers() {
        let cfg = page_config();
        let table = run(&[], &cfg, &cfg.settings(&ListViewConfig::default()));
        assert_eq!(table.headers.len(), 4);
        assert!(table.rows.is_empty());
    }

    #[test]
    fn test_column_from_toml() {
        let column: ExportColumn = toml::from_str("header = \"Visited\"\nfield = \"visitDate\"\nkind = \"date\"\n").unwrap();
        assert_eq!(column, ExportColumn::date("Visited", "visitDate"));
    }
}
