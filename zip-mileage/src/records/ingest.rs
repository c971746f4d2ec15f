//! Reading the input CSV into records and postal groups.

use std::path::Path;

use encoding_rs::Encoding;
use tracing::{debug, warn};

use super::column::Column;
use super::error::IngestError;
use super::group::PostalGroups;
use super::record::{Record, RecordSet};

/// Everything read from the input: the records and their unresolved groups.
#[derive(Debug, Default)]
pub struct Ingested {
    pub records: RecordSet,
    pub groups: PostalGroups,
}

/// Row counts from one ingest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestStats {
    /// Data rows read, header excluded.
    pub rows_read: usize,
    /// Rows skipped for lacking a postal code.
    pub rows_skipped: usize,
    /// Rows that replaced an earlier row with the same key.
    pub duplicates: usize,
    /// Rows placed in a postal group.
    pub rows_grouped: usize,
}

/// Read `path` into a fresh [`Ingested`].
pub fn ingest(path: impl AsRef<Path>, encoding: &'static Encoding) -> Result<Ingested, IngestError> {
    let mut ingested = Ingested::default();
    ingest_into(path, encoding, &mut ingested)?;
    Ok(ingested)
}

/// Read `path` into `into`, keeping every row read before any failure.
///
/// For each row with a non-blank postal code, the record is stored under
/// its `customer-shipment` key (last write wins). If its mileage is also
/// blank it joins the group for its postal code. Rows without a postal code
/// are dropped.
pub fn ingest_into(
    path: impl AsRef<Path>,
    encoding: &'static Encoding,
    into: &mut Ingested,
) -> Result<IngestStats, IngestError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    // BOM sniffing may override the configured encoding.
    let (text, used, had_errors) = encoding.decode(&bytes);
    if had_errors {
        return Err(IngestError::Decode {
            path: path.to_path_buf(),
            encoding: used.name(),
        });
    }
    if used != encoding {
        debug!(configured = encoding.name(), detected = used.name(), "byte order mark overrides encoding");
    }

    let csv_error = |source: csv::Error| IngestError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let columns: Vec<Option<Column>> = reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .map(Column::from_header)
        .collect();

    for missing in Column::ALL.iter().filter(|c| !columns.contains(&Some(**c))) {
        warn!(column = %missing, path = %path.display(), "input has no such column");
    }

    let mut stats = IngestStats::default();

    for row in reader.records() {
        let row = row.map_err(csv_error)?;
        stats.rows_read += 1;

        let mut record = Record::new();
        for (column, value) in columns.iter().zip(row.iter()) {
            if let Some(column) = column {
                record.set(*column, Some(value.to_string()));
            }
        }

        let Some(postal_code) = record.postal_code().map(str::to_string) else {
            stats.rows_skipped += 1;
            continue;
        };

        let needs_mileage = record.needs_mileage();
        let key = record.key();
        let (id, replaced) = into.records.insert(record);
        if replaced {
            stats.duplicates += 1;
            debug!(key = %key, "duplicate key replaces earlier row");
        }

        if needs_mileage {
            into.groups.add(&postal_code, id);
            stats.rows_grouped += 1;
        }
    }

    debug!(
        path = %path.display(),
        rows = stats.rows_read,
        skipped = stats.rows_skipped,
        grouped = stats.rows_grouped,
        "ingested"
    );

    Ok(stats)
}
