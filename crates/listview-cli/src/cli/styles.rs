//! Terminal styles.
//!
//! `console` drops the escape codes when stdout is not a terminal, so piped
//! output stays plain.

use console::Style;

pub fn header() -> Style {
    Style::new().bold().underlined()
}

pub fn muted() -> Style {
    Style::new().dim()
}

/// Search matches inside cells.
pub fn highlight() -> Style {
    Style::new().yellow().bold()
}

pub fn selected() -> Style {
    Style::new().cyan()
}

pub fn success() -> Style {
    Style::new().green()
}

pub fn title() -> Style {
    Style::new().bold()
}
