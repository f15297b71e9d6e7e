use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use csv::ReaderBuilder;
use tracing::{debug, info};

use crate::error::{AlignError, Result};
use crate::table::{Table, Value};

/// Decodes one tabular byte payload into a [`Table`]. Implementations exist
/// per accepted encoding; dispatch is by file extension.
pub trait TabularReader: std::fmt::Debug {
    fn read(&self, bytes: &[u8]) -> Result<Table>;
}

/// Pick a reader for `file_name`, or fail with `Format` for an extension we
/// do not accept. Surfacing this explicitly beats silently skipping the file
/// and reporting it as absent later.
pub fn reader_for(file_name: &str) -> Result<Box<dyn TabularReader>> {
    let extension = file_name
        .rsplit('.')
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();
    match extension.as_str() {
        "csv" => Ok(Box::new(CsvReader)),
        "xls" | "xlsx" => Ok(Box::new(WorkbookReader)),
        _ => Err(AlignError::Format(file_name.to_string())),
    }
}

pub fn read_table(file_name: &str, bytes: &[u8]) -> Result<Table> {
    let table = reader_for(file_name)?.read(bytes)?;
    info!(
        file = %file_name,
        rows = table.row_count(),
        columns = table.columns().len(),
        "Loaded table"
    );
    Ok(table)
}

/// Empty cells become `Null`; anything that parses as a number becomes
/// `Number`; the rest stays text verbatim.
fn parse_cell(raw: &str) -> Value {
    if raw.is_empty() {
        return Value::Null;
    }
    match raw.parse::<f64>() {
        Ok(n) => Value::Number(n),
        Err(_) => Value::text(raw),
    }
}

#[derive(Debug)]
pub struct CsvReader;

impl TabularReader for CsvReader {
    fn read(&self, bytes: &[u8]) -> Result<Table> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(bytes);

        let columns: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();
        debug!(columns = columns.len(), "CSV header row read");

        let mut table = Table::new(columns);
        for record in reader.records() {
            let record = record?;
            table.push_row(record.iter().map(parse_cell).collect());
        }
        Ok(table)
    }
}

#[derive(Debug)]
pub struct WorkbookReader;

impl TabularReader for WorkbookReader {
    fn read(&self, bytes: &[u8]) -> Result<Table> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;
        // First sheet only, by convention.
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| AlignError::Spreadsheet("workbook has no sheets".to_string()))??;

        let mut rows = range.rows();
        let header = rows
            .next()
            .ok_or_else(|| AlignError::Spreadsheet("first sheet is empty".to_string()))?;
        let columns: Vec<String> = header
            .iter()
            .enumerate()
            .map(|(i, cell)| match cell {
                Data::String(s) if !s.trim().is_empty() => s.trim().to_string(),
                Data::Empty => format!("UNNAMED_{}", i),
                other => other.to_string(),
            })
            .collect();

        let mut table = Table::new(columns);
        for row in rows {
            table.push_row(row.iter().map(convert_cell).collect());
        }
        Ok(table)
    }
}

fn convert_cell(cell: &Data) -> Value {
    match cell {
        Data::Empty => Value::Null,
        Data::String(s) => {
            if s.is_empty() {
                Value::Null
            } else {
                Value::text(s.clone())
            }
        }
        Data::Float(f) => Value::Number(*f),
        Data::Int(i) => Value::Number(*i as f64),
        Data::Bool(b) => Value::text(b.to_string()),
        Data::DateTime(dt) => Value::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Value::text(s.clone()),
        Data::Error(_) => Value::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_cells_are_typed() {
        let data = b"NAME,CODE,NOTE\nAcme,12,\n";
        let table = CsvReader.read(data).unwrap();
        assert_eq!(table.row_count(), 1);
        assert_eq!(table.value(0, "NAME"), &Value::text("Acme"));
        assert_eq!(table.value(0, "CODE"), &Value::Number(12.0));
        assert!(table.value(0, "NOTE").is_null());
    }

    #[test]
    fn ragged_csv_rows_pad_with_null() {
        let data = b"A,B,C\n1,2\n";
        let table = CsvReader.read(data).unwrap();
        assert!(table.value(0, "C").is_null());
    }

    #[test]
    fn unknown_extension_is_a_format_error() {
        let err = reader_for("ogrds_data.parquet").unwrap_err();
        assert!(matches!(err, AlignError::Format(_)));
    }

    #[test]
    fn extension_match_is_case_insensitive() {
        assert!(reader_for("EU_DATA.CSV").is_ok());
        assert!(reader_for("ogrds.XLSX").is_ok());
    }

    #[test]
    fn workbook_round_trips_through_reader() {
        // Build a minimal workbook in memory and read it back.
        let mut workbook = rust_xlsxwriter::Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "SUPER_GROUP").unwrap();
        sheet.write_string(0, 1, "BRAND_VALIDATED").unwrap();
        sheet.write_string(1, 0, "EMEA").unwrap();
        sheet.write_string(1, 1, "O1;Acme;Acme Europe").unwrap();
        sheet.write_number(2, 0, 7.0).unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let table = WorkbookReader.read(&bytes).unwrap();
        assert_eq!(table.columns(), ["SUPER_GROUP", "BRAND_VALIDATED"]);
        assert_eq!(table.value(0, "SUPER_GROUP"), &Value::text("EMEA"));
        assert_eq!(table.value(1, "SUPER_GROUP"), &Value::Number(7.0));
        assert!(table.value(1, "BRAND_VALIDATED").is_null());
    }
}
