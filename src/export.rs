// CSV export of collected listings
use crate::model::{ExportError, Listing};
use std::fs;
use std::path::Path;

/// Writes the header row and one row per listing, creating the parent
/// directory first when needed. Absent numeric fields become empty cells.
pub fn write_csv(path: &Path, listings: &[Listing]) -> Result<(), ExportError> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)?;
        }
    }

    let mut writer = csv::Writer::from_path(path)?;
    for listing in listings {
        writer.serialize(listing)?;
    }
    writer.flush()?;
    Ok(())
}
