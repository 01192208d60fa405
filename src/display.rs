//! Tabular rendering of query results for terminal output.

use crate::sqlite::ResultSet;
use comfy_table::{
    modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement,
    Table,
};

/// Renders a result set as a table with one header row of column names.
pub fn render_table(set: &ResultSet) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(
        set.columns()
            .iter()
            .map(|name| Cell::new(name).set_alignment(CellAlignment::Center)),
    );
    for row in set.rows() {
        table.add_row(row.iter().map(|value| Cell::new(value.to_string())));
    }
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::Value;

    #[test]
    fn test_render_table_contains_headers_and_values() {
        let set = ResultSet::new(
            vec!["employee_id".to_string(), "pay_rate".to_string()],
            vec![
                vec![Value::Integer(101), Value::from("HIDDEN")],
                vec![Value::Integer(102), Value::Null],
            ],
        )
        .unwrap();

        let rendered = render_table(&set);
        assert!(rendered.contains("employee_id"));
        assert!(rendered.contains("pay_rate"));
        assert!(rendered.contains("101"));
        assert!(rendered.contains("HIDDEN"));
        assert!(rendered.contains("NULL"));
    }

    #[test]
    fn test_render_empty_set_keeps_header() {
        let set = ResultSet::new(vec!["status".to_string()], Vec::new()).unwrap();
        assert!(render_table(&set).contains("status"));
    }
}
