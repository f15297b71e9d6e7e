pub mod key;
pub mod merge;
pub mod split;
pub mod suggest;
pub mod validate;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, instrument};

use crate::constants::{BOI_SUGGEST, GBE_CORRECT, GBE_INCORRECT, GBE_STATUS, MISSING_SUGGESTION};
use crate::error::Result;
use crate::table::Table;

/// Summary of one reconciliation run, handed to the caller alongside the
/// final table.
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub eu_rows: usize,
    pub ogrds_rows: usize,
    pub suggestion_entries: usize,
    pub matched_rows: usize,
    pub unmatched_rows: usize,
    pub gbe_correct: usize,
    pub gbe_incorrect: usize,
    pub gbe_missing: usize,
    pub generated_at: DateTime<Utc>,
}

/// Run the fixed five-step reconciliation: split both tables, derive join
/// keys, build ownership suggestions from the reference, merge them into
/// the primary, then validate spacing and GBE consistency. Each stage
/// consumes its input and returns a new table; row order of the primary
/// table is preserved end to end.
#[instrument(skip(eu, ogrds), fields(eu_rows = eu.row_count(), ogrds_rows = ogrds.row_count()))]
pub fn process(eu: Table, ogrds: Table) -> Result<(Table, RunReport)> {
    let eu_rows = eu.row_count();
    let ogrds_rows = ogrds.row_count();

    let eu = split::split_brand_columns(&eu)?;
    let ogrds = split::split_brand_columns(&ogrds)?;

    let eu = key::build_join_keys(&eu);
    let ogrds = key::build_join_keys(&ogrds);

    let suggestions = suggest::generate_suggestions(&ogrds)?;
    let suggestion_entries = suggestions.row_count();

    let eu = merge::merge_suggestions(&eu, &suggestions);

    let eu = validate::apply_spacing_fix(&eu);
    let eu = validate::apply_gbe_validation(&eu);

    let report = summarize(&eu, eu_rows, ogrds_rows, suggestion_entries);
    info!(
        matched = report.matched_rows,
        unmatched = report.unmatched_rows,
        "Pipeline complete"
    );
    Ok((eu, report))
}

fn summarize(
    final_table: &Table,
    eu_rows: usize,
    ogrds_rows: usize,
    suggestion_entries: usize,
) -> RunReport {
    let mut unmatched = 0;
    let mut gbe_correct = 0;
    let mut gbe_incorrect = 0;
    let mut gbe_missing = 0;
    for row in 0..final_table.row_count() {
        if final_table.value(row, BOI_SUGGEST).as_text() == Some(MISSING_SUGGESTION) {
            unmatched += 1;
        }
        match final_table.value(row, GBE_STATUS).as_text() {
            Some(GBE_CORRECT) => gbe_correct += 1,
            Some(GBE_INCORRECT) => gbe_incorrect += 1,
            _ => gbe_missing += 1,
        }
    }
    RunReport {
        eu_rows,
        ogrds_rows,
        suggestion_entries,
        matched_rows: final_table.row_count() - unmatched,
        unmatched_rows: unmatched,
        gbe_correct,
        gbe_incorrect,
        gbe_missing,
        generated_at: Utc::now(),
    }
}
