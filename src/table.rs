use std::borrow::Cow;

use serde::Serialize;

/// A single tabular cell. Unparseable or absent cells degrade to `Null`
/// rather than aborting the run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Value {
    Text(String),
    Number(f64),
    Null,
}

static NULL: Value = Value::Null;

impl Value {
    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Borrow the textual content, if this cell holds text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Render the cell as a string for key building. Numbers format without
    /// a trailing `.0` when they are whole; `Null` yields `None`.
    pub fn to_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Value::Text(s) => Some(Cow::Borrowed(s)),
            Value::Number(n) => {
                if n.fract() == 0.0 && n.is_finite() && n.abs() < 1e15 {
                    Some(Cow::Owned(format!("{}", *n as i64)))
                } else {
                    Some(Cow::Owned(n.to_string()))
                }
            }
            Value::Null => None,
        }
    }
}

/// An in-memory table: ordered column names plus row-major cells. All rows
/// share the column set; lookup of a column the table never had returns
/// `Null` so the BRAND_1-only path can flow through every stage.
#[derive(Debug, Clone, Default)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Append a row, padding or truncating to the current column count so
    /// ragged input (flexible CSV) cannot desynchronize lookups.
    pub fn push_row(&mut self, mut row: Vec<Value>) {
        row.resize(self.columns.len(), Value::Null);
        self.rows.push(row);
    }

    /// Cell at (row, column name); `Null` when the column is absent.
    pub fn value(&self, row: usize, column: &str) -> &Value {
        match self.column_index(column) {
            Some(idx) => self.rows.get(row).map_or(&NULL, |r| &r[idx]),
            None => &NULL,
        }
    }

    /// All cells of one column, in row order; `None` when the column is
    /// absent.
    pub fn column_values(&self, column: &str) -> Option<Vec<Value>> {
        let idx = self.column_index(column)?;
        Some(self.rows.iter().map(|r| r[idx].clone()).collect())
    }

    /// Add a derived column. The values vector is padded with `Null` if it
    /// is shorter than the table.
    pub fn add_column(&mut self, name: impl Into<String>, mut values: Vec<Value>) {
        values.resize(self.rows.len(), Value::Null);
        self.columns.push(name.into());
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.push(value);
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Value]> {
        self.rows.iter().map(|r| r.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_column_reads_as_null() {
        let mut t = Table::new(vec!["A".to_string()]);
        t.push_row(vec![Value::text("x")]);
        assert!(t.value(0, "MISSING").is_null());
        assert_eq!(t.value(0, "A").as_text(), Some("x"));
    }

    #[test]
    fn short_rows_are_padded() {
        let mut t = Table::new(vec!["A".to_string(), "B".to_string()]);
        t.push_row(vec![Value::text("only")]);
        assert!(t.value(0, "B").is_null());
    }

    #[test]
    fn add_column_aligns_with_rows() {
        let mut t = Table::new(vec!["A".to_string()]);
        t.push_row(vec![Value::text("r1")]);
        t.push_row(vec![Value::text("r2")]);
        t.add_column("B", vec![Value::Number(1.0)]);
        assert_eq!(t.value(0, "B"), &Value::Number(1.0));
        assert!(t.value(1, "B").is_null());
    }

    #[test]
    fn whole_numbers_render_without_decimal() {
        assert_eq!(Value::Number(42.0).to_text().unwrap(), "42");
        assert_eq!(Value::Number(1.5).to_text().unwrap(), "1.5");
        assert!(Value::Null.to_text().is_none());
    }
}
