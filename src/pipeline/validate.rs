use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::constants::{
    BRAND1_VALIDATED, BRAND_VALIDATED, BRAND_VALIDATED_FIXED, GBE_CORRECT, GBE_INCORRECT,
    GBE_MISSING, GBE_STATUS, GBE_VALIDATED,
};
use crate::table::{Table, Value};

// A '(' immediately preceded by a non-whitespace character.
static UNSPACED_PAREN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"([^\s])\(").unwrap());

/// Insert a space before any `(` that is not already preceded by
/// whitespace, token by token within the `;`-separated composite string.
/// Idempotent: a second application finds nothing to change.
pub fn fix_spacing(raw: &str) -> String {
    raw.split(';')
        .map(|token| UNSPACED_PAREN_RE.replace_all(token, "${1} ("))
        .collect::<Vec<_>>()
        .join(";")
}

/// Add `BRAND_VALIDATED_FIXED` holding the re-spaced composite string. Null
/// cells pass through; the original column is never mutated. A table that
/// never had the composite column (BRAND_1-only input) passes through
/// unchanged.
pub fn apply_spacing_fix(table: &Table) -> Table {
    let mut out = table.clone();
    let Some(composite) = table.column_values(BRAND_VALIDATED) else {
        debug!("No composite brand column; spacing fix skipped");
        return out;
    };
    let fixed = composite
        .iter()
        .map(|v| match v.as_text() {
            Some(text) => Value::Text(fix_spacing(text)),
            None => v.clone(),
        })
        .collect();
    out.add_column(BRAND_VALIDATED_FIXED, fixed);
    out
}

/// Per-row consistency label for the group-entity field against the brand
/// name. Independent, side-effect-free classification.
pub fn gbe_status(brand: &Value, gbe: &Value) -> &'static str {
    let (Some(brand), Some(gbe)) = (brand.as_text(), gbe.as_text()) else {
        return GBE_MISSING;
    };
    let brand_clean = brand.split('(').next().unwrap_or_default().trim();
    if gbe.starts_with(brand_clean) {
        GBE_CORRECT
    } else {
        GBE_INCORRECT
    }
}

/// Add `GBE_STATUS` classifying every row.
pub fn apply_gbe_validation(table: &Table) -> Table {
    let mut out = table.clone();
    let statuses: Vec<Value> = (0..table.row_count())
        .map(|row| {
            Value::text(gbe_status(
                table.value(row, BRAND1_VALIDATED),
                table.value(row, GBE_VALIDATED),
            ))
        })
        .collect();
    out.add_column(GBE_STATUS, statuses);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn space_inserted_before_paren() {
        assert_eq!(fix_spacing("Brand(Group)"), "Brand (Group)");
    }

    #[test]
    fn spacing_fix_is_idempotent() {
        let once = fix_spacing("Brand(Group)");
        assert_eq!(fix_spacing(&once), once);
        assert_eq!(fix_spacing("Brand (Group)"), "Brand (Group)");
    }

    #[test]
    fn every_token_is_fixed_independently() {
        assert_eq!(fix_spacing("O1;Acme(EU);GBE(X)"), "O1;Acme (EU);GBE (X)");
    }

    #[test]
    fn null_composite_passes_through() {
        let mut table = Table::new(vec![BRAND_VALIDATED.to_string()]);
        table.push_row(vec![Value::Null]);
        let out = apply_spacing_fix(&table);
        assert!(out.value(0, BRAND_VALIDATED_FIXED).is_null());
    }

    #[test]
    fn missing_composite_column_skips_the_fix() {
        let table = Table::new(vec!["OTHER".to_string()]);
        let out = apply_spacing_fix(&table);
        assert!(!out.has_column(BRAND_VALIDATED_FIXED));
    }

    #[test]
    fn matching_gbe_is_correct() {
        assert_eq!(
            gbe_status(&Value::text("Acme (X)"), &Value::text("Acme Europe")),
            GBE_CORRECT
        );
    }

    #[test]
    fn mismatched_gbe_is_incorrect() {
        assert_eq!(
            gbe_status(&Value::text("Acme (X)"), &Value::text("Other")),
            GBE_INCORRECT
        );
    }

    #[test]
    fn null_fields_classify_as_missing_data() {
        assert_eq!(gbe_status(&Value::Null, &Value::text("Acme")), GBE_MISSING);
        assert_eq!(gbe_status(&Value::text("Acme"), &Value::Null), GBE_MISSING);
    }

    #[test]
    fn status_column_is_added_per_row() {
        let mut table = Table::new(vec![
            BRAND1_VALIDATED.to_string(),
            GBE_VALIDATED.to_string(),
        ]);
        table.push_row(vec![Value::text("Acme (X)"), Value::text("Acme Europe")]);
        table.push_row(vec![Value::Null, Value::text("Acme Europe")]);
        let out = apply_gbe_validation(&table);
        assert_eq!(out.value(0, GBE_STATUS), &Value::text(GBE_CORRECT));
        assert_eq!(out.value(1, GBE_STATUS), &Value::text(GBE_MISSING));
    }
}
