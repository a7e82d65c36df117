//! Plain-text rendering of query results.

use std::fmt::Write;

use salesboard_core::{CollectionSchema, FieldValue, Record};
use salesboard_query::{GroupSummary, Summary};

/// Columns shown for a collection, in schema order without repeats.
pub fn columns(schema: &CollectionSchema) -> Vec<&str> {
    let mut columns: Vec<&str> = Vec::new();
    for field in schema.designated_fields() {
        if !columns.contains(&field) {
            columns.push(field);
        }
    }
    columns
}

/// Format a number the way field values display: integers without decimals.
pub fn number(value: f64) -> String {
    if value.fract() == 0.0 {
        FieldValue::Number(value).to_string()
    } else {
        format!("{:.2}", value)
    }
}

/// Left-aligned table with a header row.
pub fn table(records: &[&Record], columns: &[&str]) -> String {
    let cells: Vec<Vec<String>> = records
        .iter()
        .map(|record| {
            columns
                .iter()
                .map(|c| record.get(c).map(ToString::to_string).unwrap_or_default())
                .collect()
        })
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, c)| {
            cells
                .iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(c.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    let header: Vec<String> = columns.iter().map(|c| c.to_string()).collect();
    push_row(&mut out, &header, &widths);
    for row in &cells {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, row: &[String], widths: &[usize]) {
    let line: Vec<String> = row
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}

pub fn summary(summary: &Summary) -> String {
    let mean = summary.mean.map(number).unwrap_or_else(|| "n/a".to_string());
    format!(
        "{}: count {}, sum {}, mean {}\n",
        summary.field,
        summary.count,
        number(summary.sum),
        mean
    )
}

pub fn counts(counts: &[(String, usize)]) -> String {
    let width = counts.iter().map(|(k, _)| k.chars().count()).max().unwrap_or(0);
    let mut out = String::new();
    for (key, count) in counts {
        let _ = writeln!(out, "{:<width$}  {}", key, count, width = width);
    }
    out
}

pub fn groups(groups: &[GroupSummary]) -> String {
    let width = groups.iter().map(|g| g.key.chars().count()).max().unwrap_or(0);
    let mut out = String::new();
    for group in groups {
        let _ = writeln!(
            out,
            "{:<width$}  {} records, total {}, mean {}",
            group.key,
            group.count,
            number(group.total),
            number(group.mean),
            width = width
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use salesboard_core::CollectionKind;

    #[test]
    fn test_columns_dedup() {
        let schema = CollectionSchema::builtin(CollectionKind::Orders);
        let columns = columns(&schema);
        assert_eq!(columns.iter().filter(|c| **c == "id").count(), 1);
        assert_eq!(columns[0], "id");
        assert!(columns.contains(&"created"));
    }

    #[test]
    fn test_number_format() {
        assert_eq!(number(143000.0), "143000");
        assert_eq!(number(35750.5), "35750.50");
    }

    #[test]
    fn test_table_alignment() {
        let a = Record::new().with("name", "Metro Mart").with("sales", 45000);
        let b = Record::new().with("name", "7UP").with("sales", 80);
        let out = table(&[&a, &b], &["name", "sales"]);

        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "name        sales");
        assert_eq!(lines[1], "Metro Mart  45000");
        assert_eq!(lines[2], "7UP         80");
    }

    #[test]
    fn test_table_missing_cell_is_blank() {
        let a = Record::new().with("name", "Metro Mart");
        let out = table(&[&a], &["name", "sales"]);
        assert_eq!(out.lines().nth(1), Some("Metro Mart"));
    }

    #[test]
    fn test_summary_without_mean() {
        let s = Summary {
            field: "sales".to_string(),
            count: 0,
            sum: 0.0,
            mean: None,
        };
        assert_eq!(summary(&s), "sales: count 0, sum 0, mean n/a\n");
    }

    #[test]
    fn test_counts() {
        let out = counts(&[("Delivered".to_string(), 2), ("Pending".to_string(), 1)]);
        assert_eq!(out, "Delivered  2\nPending    1\n");
    }
}
