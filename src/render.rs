//! Tabular previews
//!
//! Formats a store as a text table. Large stores are truncated to their
//! first and last rows with an ellipsis row between them.

use std::fmt;

use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Table};

use crate::config::Config;
use crate::store::ColumnStore;
use crate::value::Value;

/// Render `store` as a table with sorted column headers
pub fn render_table(store: &ColumnStore, config: &Config) -> String {
    let (rows, names) = preview_rows(store, config);

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(names.iter().map(Cell::new));

    for row in rows {
        table.add_row(row.into_iter().map(Cell::new));
    }

    table.to_string()
}

/// Cell text for the preview, already truncated per `config`
pub fn preview_rows(store: &ColumnStore, config: &Config) -> (Vec<Vec<String>>, Vec<String>) {
    let len = store.len();
    let format_rows = |rows: Vec<Vec<Value>>| -> Vec<Vec<String>> {
        rows.into_iter()
            .map(|row| row.iter().map(|cell| format_cell(cell, config)).collect())
            .collect()
    };

    // Head and tail never overlap; if together they cover every row there
    // is nothing to elide.
    let head_len = config.preview_head.min(len);
    let tail_len = config.preview_tail.min(len - head_len);

    if len <= config.preview_threshold || head_len + tail_len >= len {
        let (rows, names) = store.to_rows();
        return (format_rows(rows), names);
    }

    let iloc = store.iloc();
    let (head, names) = iloc.range(None, Some(head_len as isize)).to_rows();
    let (tail, _) = iloc.range(Some((len - tail_len) as isize), None).to_rows();

    let mut rows = format_rows(head);
    rows.push(vec![config.ellipsis.clone(); names.len()]);
    rows.extend(format_rows(tail));
    (rows, names)
}

fn format_cell(cell: &Value, config: &Config) -> String {
    match cell {
        Value::Null => config.missing.clone(),
        other => other.to_string(),
    }
}

impl fmt::Display for ColumnStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_table(self, &Config::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(rows: i64) -> ColumnStore {
        ColumnStore::from_rows(
            &["n", "sq"],
            "n",
            (0..rows).map(|i| vec![Value::Int(i), Value::Int(i * i)]),
        )
        .unwrap()
    }

    #[test]
    fn test_small_store_not_truncated() {
        let (rows, names) = preview_rows(&numbered(20), &Config::default());
        assert_eq!(rows.len(), 20);
        assert_eq!(names, vec!["n", "sq"]);
    }

    #[test]
    fn test_large_store_truncated() {
        let (rows, _) = preview_rows(&numbered(21), &Config::default());
        assert_eq!(rows.len(), 17);
        assert_eq!(rows[7], vec!["7", "49"]);
        assert_eq!(rows[8], vec!["...", "..."]);
        assert_eq!(rows[9], vec!["13", "169"]);
        assert_eq!(rows[16], vec!["20", "400"]);
    }

    #[test]
    fn test_wide_edges_show_each_row_once() {
        let config = Config::builder()
            .preview_threshold(5)
            .preview_head(8)
            .preview_tail(8)
            .build();
        let (rows, _) = preview_rows(&numbered(10), &config);

        assert_eq!(rows.len(), 10);
        assert!(rows.iter().all(|row| row[0] != "..."));
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row[0], i.to_string());
        }
    }

    #[test]
    fn test_uneven_edges_truncated() {
        let config = Config::builder()
            .preview_threshold(5)
            .preview_head(3)
            .preview_tail(1)
            .build();
        let (rows, _) = preview_rows(&numbered(10), &config);

        let firsts: Vec<&str> = rows.iter().map(|row| row[0].as_str()).collect();
        assert_eq!(firsts, vec!["0", "1", "2", "...", "9"]);
    }

    #[test]
    fn test_null_placeholder() {
        let store = ColumnStore::from_rows(
            &["n", "x"],
            "n",
            vec![vec![Value::Int(1), Value::Null]],
        )
        .unwrap();
        let config = Config::builder().missing("-").build();
        let (rows, _) = preview_rows(&store, &config);
        assert_eq!(rows, vec![vec!["1".to_string(), "-".to_string()]]);
    }

    #[test]
    fn test_display_contains_headers_and_marker() {
        let text = numbered(30).to_string();
        assert!(text.contains("sq"));
        assert!(text.contains("..."));
        assert!(text.contains("841"));
        assert!(!text.contains("225"));
    }
}
