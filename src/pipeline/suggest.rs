use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::constants::{BOI_SUGGEST, BRAND_OWNER_INTERNATIONAL, SG_B1};
use crate::error::{AlignError, Result};
use crate::table::{Table, Value};

/// Build the suggestion table from the reference dataset: one row per
/// distinct join key, carrying the most frequent owner observed under that
/// key. Ties break to the lexicographically smallest owner so a run is
/// reproducible regardless of input row order.
///
/// A null join key forms its own group; its entry can never match a primary
/// row (the merge treats null keys as unmatched). Rows with a null owner are
/// not counted.
pub fn generate_suggestions(reference: &Table) -> Result<Table> {
    if !reference.has_column(BRAND_OWNER_INTERNATIONAL) {
        return Err(AlignError::Schema(format!(
            "'{}' not found in reference table",
            BRAND_OWNER_INTERNATIONAL
        )));
    }

    let mut out = Table::new(vec![SG_B1.to_string(), BOI_SUGGEST.to_string()]);
    if !reference.has_column(SG_B1) {
        debug!("Reference table has no join key column; suggestion table is empty");
        return Ok(out);
    }

    // BTreeMaps keep both the key groups and the owners within a group in
    // lexicographic order, which drives the deterministic tie-break.
    let mut groups: BTreeMap<Option<String>, BTreeMap<String, usize>> = BTreeMap::new();
    for row in 0..reference.row_count() {
        let key = reference
            .value(row, SG_B1)
            .to_text()
            .map(|k| k.into_owned());
        let Some(owner) = reference.value(row, BRAND_OWNER_INTERNATIONAL).to_text() else {
            continue;
        };
        *groups
            .entry(key)
            .or_default()
            .entry(owner.into_owned())
            .or_insert(0) += 1;
    }

    for (key, owners) in groups {
        let Some(suggested) = majority_owner(&owners) else {
            continue;
        };
        let key_value = match key {
            Some(k) => Value::Text(k),
            None => Value::Null,
        };
        out.push_row(vec![key_value, Value::text(suggested)]);
    }

    info!(entries = out.row_count(), "Generated ownership suggestions");
    Ok(out)
}

/// Highest count wins; among tied counts the first owner in lexicographic
/// order wins (the map iterates in sorted order).
fn majority_owner(owners: &BTreeMap<String, usize>) -> Option<&str> {
    let mut best: Option<(&str, usize)> = None;
    for (owner, count) in owners {
        match best {
            Some((_, best_count)) if *count <= best_count => {}
            _ => best = Some((owner, *count)),
        }
    }
    best.map(|(owner, _)| owner)
}
