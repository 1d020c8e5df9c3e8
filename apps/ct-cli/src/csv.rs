//! Minimal numeric CSV reader and writer.
//!
//! One row per sample, comma separated. Lines starting with `#` and blank
//! lines are skipped.

use std::path::Path;

use crate::error::{AppError, AppResult};

/// A rectangular table of numbers, stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub columns: usize,
    pub values: Vec<f64>,
}

impl Table {
    pub fn rows(&self) -> usize {
        if self.columns == 0 {
            0
        } else {
            self.values.len() / self.columns
        }
    }

    /// Split off the first column, returning it and the remaining table.
    pub fn split_first_column(&self) -> (Vec<f64>, Table) {
        let mut first = Vec::with_capacity(self.rows());
        let mut rest = Vec::with_capacity(self.values.len().saturating_sub(self.rows()));
        for row in self.values.chunks_exact(self.columns) {
            first.push(row[0]);
            rest.extend_from_slice(&row[1..]);
        }
        let table = Table {
            columns: self.columns.saturating_sub(1),
            values: rest,
        };
        (first, table)
    }
}

pub fn parse(text: &str) -> AppResult<Table> {
    let mut columns = 0;
    let mut values = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let number = index + 1;
        let start = values.len();
        for field in line.split(',') {
            let field = field.trim();
            let value = field.parse::<f64>().map_err(|_| AppError::Csv {
                line: number,
                message: format!("`{field}` is not a number"),
            })?;
            values.push(value);
        }
        let width = values.len() - start;
        if columns == 0 {
            columns = width;
        } else if width != columns {
            return Err(AppError::Csv {
                line: number,
                message: format!("expected {columns} columns, found {width}"),
            });
        }
    }
    Ok(Table { columns, values })
}

pub fn read(path: &Path) -> AppResult<Table> {
    let text = std::fs::read_to_string(path).map_err(|source| AppError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&text)
}

/// Render a table with a commented header line.
pub fn format(header: &[String], values: &[f64]) -> String {
    let mut out = format!("# {}\n", header.join(","));
    for row in values.chunks(header.len().max(1)) {
        let fields: Vec<String> = row.iter().map(|v| v.to_string()).collect();
        out.push_str(&fields.join(","));
        out.push('\n');
    }
    out
}
