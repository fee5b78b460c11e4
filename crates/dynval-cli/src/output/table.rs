//! Table formatting utilities for CLI output.

use comfy_table::{presets, ContentArrangement, Table};

/// Validation outcome for one rendered component instance.
pub struct ValidationRow {
    /// Component id.
    pub id: String,
    /// Scoped data of a template instance, as compact JSON.
    pub scope: Option<String>,
    /// Whether every check passed.
    pub valid: bool,
    /// Messages of the failed checks.
    pub errors: Vec<String>,
}

/// Format validation results as a table.
pub fn format_validation_table(rows: &[ValidationRow]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Component", "Scope", "Status", "Errors"]);

    for row in rows {
        table.add_row(vec![
            row.id.clone(),
            row.scope.clone().unwrap_or_default(),
            if row.valid { "valid" } else { "invalid" }.to_string(),
            row.errors.join("\n"),
        ]);
    }

    table
}
