use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::constants::{BRAND1_VALIDATED, BRAND_1_CLEAN, SG_B1, SUPER_GROUP, SUPER_GROUP_DSCR};
use crate::table::{Table, Value};

// Leading run of characters before the first '[' or '('.
static CLEAN_BRAND_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\[(]+").unwrap());

/// The brand name with any bracketed suffix removed and trailing spaces
/// stripped. A name that starts with a bracket, or is empty after
/// stripping, cleans to `None`.
pub fn clean_brand(raw: &str) -> Option<String> {
    let leading = CLEAN_BRAND_RE.find(raw)?.as_str();
    let cleaned = leading.trim_end_matches(' ');
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.to_string())
    }
}

/// Total join-key function: `Some` only when both parts are present.
pub fn join_key(super_group: &Value, brand_clean: &Value) -> Value {
    match (super_group.to_text(), brand_clean.to_text()) {
        (Some(sg), Some(brand)) => Value::text(format!("{} {}", sg, brand)),
        _ => Value::Null,
    }
}

/// Derive `BRAND_1_CLEAN` from the brand-name column, then `SG_B1` from the
/// super-group column (preferring `SUPER_GROUP` over `SUPER_GROUP_DSCR`).
/// A table with no super-group column passes through without a key column;
/// downstream stages tolerate its absence.
pub fn build_join_keys(table: &Table) -> Table {
    let mut out = table.clone();

    let brand_clean: Vec<Value> = match table.column_values(BRAND1_VALIDATED) {
        Some(values) => values
            .iter()
            .map(|v| match v.as_text().and_then(clean_brand) {
                Some(name) => Value::Text(name),
                None => Value::Null,
            })
            .collect(),
        None => vec![Value::Null; table.row_count()],
    };
    out.add_column(BRAND_1_CLEAN, brand_clean);

    let super_group_column = [SUPER_GROUP, SUPER_GROUP_DSCR]
        .into_iter()
        .find(|c| table.has_column(c));
    match super_group_column {
        Some(column) => {
            let keys: Vec<Value> = (0..out.row_count())
                .map(|row| join_key(out.value(row, column), out.value(row, BRAND_1_CLEAN)))
                .collect();
            out.add_column(SG_B1, keys);
        }
        None => {
            debug!("No super-group column; join key not derived");
        }
    }

    out
}
