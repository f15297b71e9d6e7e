use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

use tracing::{debug, info};
use zip::ZipArchive;

use crate::constants::{EU_NAME_HINT, OGRDS_NAME_HINT};
use crate::error::{AlignError, Result};
use crate::ingest::reader::read_table;
use crate::table::Table;

/// Names of the two archive entries identified as the EU and OGRDS inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct IdentifiedEntries {
    pub eu: String,
    pub ogrds: String,
}

/// Find the EU and OGRDS entries by case-insensitive substring match on the
/// entry names. Identification only looks at names, so it is invariant under
/// reordering of the entries within the archive.
pub fn identify_entries(names: &[String]) -> Result<IdentifiedEntries> {
    let find = |hint: &str| {
        names
            .iter()
            .find(|n| n.to_lowercase().contains(hint))
            .cloned()
    };
    let eu = find(EU_NAME_HINT);
    let ogrds = find(OGRDS_NAME_HINT);
    match (eu, ogrds) {
        (Some(eu), Some(ogrds)) => Ok(IdentifiedEntries { eu, ogrds }),
        (eu, ogrds) => {
            let mut missing = Vec::new();
            if eu.is_none() {
                missing.push("EU");
            }
            if ogrds.is_none() {
                missing.push("OGRDS");
            }
            Err(AlignError::Identification(format!(
                "archive has no entry matching {}",
                missing.join(" or ")
            )))
        }
    }
}

/// List the file entries of a ZIP archive (directories excluded).
pub fn entry_names<R: Read + Seek>(reader: R) -> Result<Vec<String>> {
    let mut archive = ZipArchive::new(reader)?;
    let mut names = Vec::new();
    for i in 0..archive.len() {
        let entry = archive.by_index(i)?;
        if entry.is_file() {
            names.push(entry.name().to_string());
        }
    }
    Ok(names)
}

/// Open the archive, identify the EU and OGRDS entries, and decode both into
/// tables. Fails before any decoding when either entry is missing.
pub fn load_archive<R: Read + Seek>(reader: R) -> Result<(Table, Table)> {
    let mut archive = ZipArchive::new(reader)?;
    let names: Vec<String> = (0..archive.len())
        .filter_map(|i| {
            let entry = archive.by_index(i).ok()?;
            entry.is_file().then(|| entry.name().to_string())
        })
        .collect();
    debug!(entries = names.len(), "Scanning archive entries");

    let identified = identify_entries(&names)?;
    info!(eu = %identified.eu, ogrds = %identified.ogrds, "Identified input files");

    let eu = read_entry(&mut archive, &identified.eu)?;
    let ogrds = read_entry(&mut archive, &identified.ogrds)?;
    Ok((eu, ogrds))
}

pub fn load_archive_file(path: impl AsRef<Path>) -> Result<(Table, Table)> {
    let file = File::open(path.as_ref())?;
    load_archive(file)
}

fn read_entry<R: Read + Seek>(archive: &mut ZipArchive<R>, name: &str) -> Result<Table> {
    let mut entry = archive.by_name(name)?;
    let mut bytes = Vec::with_capacity(entry.size() as usize);
    entry.read_to_end(&mut bytes)?;
    read_table(name, &bytes)
}
