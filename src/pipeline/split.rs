use tracing::debug;

use crate::constants::{BOI_VALIDATED, BRAND1_VALIDATED, BRAND_1, BRAND_VALIDATED, GBE_VALIDATED};
use crate::error::{AlignError, Result};
use crate::table::{Table, Value};

/// Normalize the composite brand field into discrete columns.
///
/// `BRAND_VALIDATED` holds up to three `;`-separated tokens
/// (owner-internal-id, brand-name, group-entity). Fewer tokens pad with
/// `Null`; extra tokens are discarded. When only the fallback `BRAND_1`
/// exists it is copied verbatim into the brand-name column and the other
/// two derived columns are never added.
pub fn split_brand_columns(table: &Table) -> Result<Table> {
    let mut out = table.clone();

    if let Some(composite) = table.column_values(BRAND_VALIDATED) {
        let mut boi = Vec::with_capacity(composite.len());
        let mut brand = Vec::with_capacity(composite.len());
        let mut gbe = Vec::with_capacity(composite.len());
        for value in &composite {
            let [a, b, c] = split_composite(value);
            boi.push(a);
            brand.push(b);
            gbe.push(c);
        }
        out.add_column(BOI_VALIDATED, boi);
        out.add_column(BRAND1_VALIDATED, brand);
        out.add_column(GBE_VALIDATED, gbe);
        debug!(rows = out.row_count(), "Split composite brand column");
    } else if let Some(fallback) = table.column_values(BRAND_1) {
        out.add_column(BRAND1_VALIDATED, fallback);
        debug!(rows = out.row_count(), "Copied fallback brand column");
    } else {
        return Err(AlignError::Schema(format!(
            "Neither '{}' nor '{}' found in table",
            BRAND_VALIDATED, BRAND_1
        )));
    }

    Ok(out)
}

/// Split one composite cell into exactly three parts. Non-text cells yield
/// three `Null`s.
fn split_composite(value: &Value) -> [Value; 3] {
    let Some(text) = value.as_text() else {
        return [Value::Null, Value::Null, Value::Null];
    };
    let mut parts = [Value::Null, Value::Null, Value::Null];
    for (slot, token) in parts.iter_mut().zip(text.split(';')) {
        *slot = Value::text(token);
    }
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn composite_table(values: &[Value]) -> Table {
        let mut t = Table::new(vec![BRAND_VALIDATED.to_string()]);
        for v in values {
            t.push_row(vec![v.clone()]);
        }
        t
    }

    #[test]
    fn three_tokens_fill_three_columns() {
        let table = composite_table(&[Value::text("A;B;C")]);
        let out = split_brand_columns(&table).unwrap();
        assert_eq!(out.value(0, BOI_VALIDATED), &Value::text("A"));
        assert_eq!(out.value(0, BRAND1_VALIDATED), &Value::text("B"));
        assert_eq!(out.value(0, GBE_VALIDATED), &Value::text("C"));
    }

    #[test]
    fn missing_tokens_pad_with_null() {
        let table = composite_table(&[Value::text("A;B")]);
        let out = split_brand_columns(&table).unwrap();
        assert_eq!(out.value(0, BRAND1_VALIDATED), &Value::text("B"));
        assert!(out.value(0, GBE_VALIDATED).is_null());
    }

    #[test]
    fn extra_tokens_are_discarded() {
        let table = composite_table(&[Value::text("A;B;C;D;E")]);
        let out = split_brand_columns(&table).unwrap();
        assert_eq!(out.value(0, GBE_VALIDATED), &Value::text("C"));
        assert!(!out.has_column("3"));
    }

    #[test]
    fn null_composite_yields_three_nulls() {
        let table = composite_table(&[Value::Null]);
        let out = split_brand_columns(&table).unwrap();
        assert!(out.value(0, BOI_VALIDATED).is_null());
        assert!(out.value(0, BRAND1_VALIDATED).is_null());
        assert!(out.value(0, GBE_VALIDATED).is_null());
    }

    #[test]
    fn fallback_column_is_copied_verbatim() {
        let mut table = Table::new(vec![BRAND_1.to_string()]);
        table.push_row(vec![Value::text("X")]);
        let out = split_brand_columns(&table).unwrap();
        assert_eq!(out.value(0, BRAND1_VALIDATED), &Value::text("X"));
        assert!(!out.has_column(BOI_VALIDATED));
        assert!(!out.has_column(GBE_VALIDATED));
    }

    #[test]
    fn missing_both_brand_columns_is_a_schema_error() {
        let table = Table::new(vec!["OTHER".to_string()]);
        let err = split_brand_columns(&table).unwrap_err();
        assert!(matches!(err, AlignError::Schema(_)));
    }
}
