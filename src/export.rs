use std::path::Path;

use rust_xlsxwriter::{Workbook, Worksheet};
use tracing::info;

use crate::error::Result;
use crate::table::{Table, Value};

/// Write the final table as a one-sheet workbook: header row first, then
/// data rows in original order. Null cells stay blank.
pub fn write_workbook(table: &Table, path: impl AsRef<Path>, sheet_name: &str) -> Result<()> {
    let path = path.as_ref();
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(sheet_name)?;
    fill_sheet(sheet, table)?;
    workbook.save(path)?;
    info!(
        rows = table.row_count(),
        columns = table.columns().len(),
        path = %path.display(),
        "Wrote output workbook"
    );
    Ok(())
}

/// In-memory variant, used by the round-trip tests.
pub fn workbook_bytes(table: &Table, sheet_name: &str) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(sheet_name)?;
    fill_sheet(sheet, table)?;
    Ok(workbook.save_to_buffer()?)
}

fn fill_sheet(sheet: &mut Worksheet, table: &Table) -> Result<()> {
    for (col, name) in table.columns().iter().enumerate() {
        sheet.write_string(0, col as u16, name)?;
    }
    for (row_idx, row) in table.rows().enumerate() {
        let excel_row = (row_idx + 1) as u32;
        for (col, cell) in row.iter().enumerate() {
            match cell {
                Value::Text(s) => {
                    sheet.write_string(excel_row, col as u16, s)?;
                }
                Value::Number(n) => {
                    sheet.write_number(excel_row, col as u16, *n)?;
                }
                Value::Null => {}
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::reader::{TabularReader, WorkbookReader};

    #[test]
    fn workbook_round_trips_values() {
        let mut table = Table::new(vec!["NAME".to_string(), "COUNT".to_string()]);
        table.push_row(vec![Value::text("Acme"), Value::Number(3.0)]);
        table.push_row(vec![Value::Null, Value::Number(1.5)]);

        let bytes = workbook_bytes(&table, "Final").unwrap();
        let read_back = WorkbookReader.read(&bytes).unwrap();

        assert_eq!(read_back.columns(), ["NAME", "COUNT"]);
        assert_eq!(read_back.value(0, "NAME"), &Value::text("Acme"));
        assert_eq!(read_back.value(0, "COUNT"), &Value::Number(3.0));
        assert!(read_back.value(1, "NAME").is_null());
    }
}
