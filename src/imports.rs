use std::io::Read;
use std::path::Path;

use anyhow::Context;

use crate::registry::{HourField, SubjectRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ImportSummary {
    pub added: usize,
    pub skipped: usize,
}

pub fn load_subjects(path: &Path, registry: &mut SubjectRegistry) -> anyhow::Result<ImportSummary> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    read_subjects(file, registry)
}

/// Rows are `name,max_hours,attended_hours`; hour columns may be blank.
/// Duplicate or blank names skip the row rather than failing the file.
pub fn read_subjects(
    reader: impl Read,
    registry: &mut SubjectRegistry,
) -> anyhow::Result<ImportSummary> {
    #[derive(serde::Deserialize)]
    struct CsvRow {
        name: String,
        #[serde(default)]
        max_hours: String,
        #[serde(default)]
        attended_hours: String,
    }

    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut summary = ImportSummary::default();

    for row in csv_reader.deserialize::<CsvRow>() {
        let row: CsvRow = row.context("malformed subject row")?;
        match registry.add_subject(&row.name) {
            Ok(id) => {
                registry.update_field(id, HourField::Max, row.max_hours.trim());
                registry.update_field(id, HourField::Attended, row.attended_hours.trim());
                summary.added += 1;
            }
            Err(_) => summary.skipped += 1,
        }
    }

    Ok(summary)
}
