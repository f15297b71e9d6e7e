use std::collections::HashMap;

use tracing::info;

use crate::constants::{BOI_SUGGEST, MISSING_SUGGESTION, SG_B1};
use crate::table::{Table, Value};

/// Left-join the suggestion table onto the primary table by join key. Every
/// primary row is retained exactly once; the suggestion table carries at
/// most one entry per key by construction. Rows with a null or unmatched
/// key receive the sentinel fill value.
pub fn merge_suggestions(primary: &Table, suggestions: &Table) -> Table {
    let mut lookup: HashMap<&str, &Value> = HashMap::new();
    for row in 0..suggestions.row_count() {
        if let Some(key) = suggestions.value(row, SG_B1).as_text() {
            // Keep the first entry should a duplicate ever slip through.
            lookup.entry(key).or_insert(suggestions.value(row, BOI_SUGGEST));
        }
    }

    let mut matched = 0usize;
    let mut suggested = Vec::with_capacity(primary.row_count());
    for row in 0..primary.row_count() {
        let hit = primary
            .value(row, SG_B1)
            .as_text()
            .and_then(|key| lookup.get(key).copied());
        match hit {
            Some(value) => {
                matched += 1;
                suggested.push(value.clone());
            }
            None => suggested.push(Value::text(MISSING_SUGGESTION)),
        }
    }

    let mut out = primary.clone();
    out.add_column(BOI_SUGGEST, suggested);
    info!(
        rows = out.row_count(),
        matched,
        unmatched = out.row_count() - matched,
        "Merged ownership suggestions"
    );
    out
}
