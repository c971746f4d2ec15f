//! Writing records back out as CSV.

use std::path::{Path, PathBuf};

use encoding_rs::Encoding;
use tracing::{debug, warn};

use super::column::Column;
use super::error::ExportError;
use super::record::RecordSet;

/// What an export wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    /// Destination file.
    pub path: PathBuf,
    /// Data rows written, header excluded.
    pub rows_written: usize,
    /// Whether some characters had no representation in the encoding and
    /// were written as numeric character references (`&#NNNN;`).
    pub lossy: bool,
    /// Data rows whose cell text was altered that way.
    pub lossy_rows: usize,
}

/// Render records as CSV text: a header of every [`Column`] in order, then
/// one CRLF-terminated row per record with absent values left empty.
pub fn render(records: &RecordSet) -> Result<String, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(Vec::new());

    writer.write_record(Column::ALL.iter().map(|c| c.header()))?;

    for record in records.iter() {
        writer.write_record(Column::ALL.iter().map(|c| record.get(*c).unwrap_or_default()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Csv(e.into_error().into()))?;

    // Every field came from a &str, so this cannot fail in practice.
    String::from_utf8(bytes).map_err(|e| {
        ExportError::Csv(std::io::Error::new(std::io::ErrorKind::InvalidData, e).into())
    })
}

/// Write records to `path` in `encoding`, replacing any existing file.
///
/// Creates parent directories if they don't exist.
pub fn export(
    path: impl AsRef<Path>,
    records: &RecordSet,
    encoding: &'static Encoding,
) -> Result<ExportSummary, ExportError> {
    let path = path.as_ref();
    let io_error = |source: std::io::Error| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };

    let text = render(records)?;
    let (bytes, used, lossy) = encoding.encode(&text);
    let lossy_rows = if lossy { count_lossy_rows(records, used) } else { 0 };
    if lossy {
        warn!(
            encoding = used.name(),
            path = %path.display(),
            rows = lossy_rows,
            "characters not representable in the output encoding were rewritten as &#NNNN; references"
        );
    }

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent).map_err(io_error)?;
    }

    std::fs::write(path, &bytes).map_err(io_error)?;

    debug!(path = %path.display(), rows = records.len(), bytes = bytes.len(), "exported");

    Ok(ExportSummary {
        path: path.to_path_buf(),
        rows_written: records.len(),
        lossy,
        lossy_rows,
    })
}

/// Rows holding at least one value `encoding` cannot represent.
fn count_lossy_rows(records: &RecordSet, encoding: &'static Encoding) -> usize {
    records
        .iter()
        .filter(|record| {
            Column::ALL
                .iter()
                .filter_map(|c| record.get(*c))
                .any(|value| encoding.encode(value).2)
        })
        .count()
}
