/// Column name constants to ensure consistency across the pipeline stages.
/// These are the fixed contract between the two input schemas and the
/// derived output columns.

// Input columns
pub const BRAND_VALIDATED: &str = "BRAND_VALIDATED";
pub const BRAND_1: &str = "BRAND_1";
pub const SUPER_GROUP: &str = "SUPER_GROUP";
pub const SUPER_GROUP_DSCR: &str = "SUPER_GROUP_DSCR";
pub const BRAND_OWNER_INTERNATIONAL: &str = "BRAND_OWNER_INTERNATIONAL";

// Columns derived from the composite brand field
pub const BOI_VALIDATED: &str = "BOI_VALIDATED";
pub const BRAND1_VALIDATED: &str = "BRAND1_VALIDATED";
pub const GBE_VALIDATED: &str = "GBE_VALIDATED";

// Join key and suggestion columns
pub const BRAND_1_CLEAN: &str = "BRAND_1_CLEAN";
pub const SG_B1: &str = "SG_B1";
pub const BOI_SUGGEST: &str = "BOI_SUGGEST";

// Validation output columns
pub const BRAND_VALIDATED_FIXED: &str = "BRAND_VALIDATED_FIXED";
pub const GBE_STATUS: &str = "GBE_STATUS";

/// Fill value for primary rows whose join key has no match in the reference.
pub const MISSING_SUGGESTION: &str = "SG_B1 not present in OGRDS";

// GBE status labels
pub const GBE_CORRECT: &str = "Correct GBE";
pub const GBE_INCORRECT: &str = "Incorrect GBE";
pub const GBE_MISSING: &str = "Missing Data";

// Case-insensitive filename hints used to identify the two archive entries
pub const EU_NAME_HINT: &str = "eu";
pub const OGRDS_NAME_HINT: &str = "ogrds";

// Output defaults, overridable via config.toml
pub const DEFAULT_OUTPUT_FILE: &str = "Final_Europe_Processed.xlsx";
pub const DEFAULT_SHEET_NAME: &str = "Final";
