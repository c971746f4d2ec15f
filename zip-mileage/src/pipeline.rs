//! End-to-end run: ingest, resolve, export.
//!
//! The output file is written exactly once per run, whatever happened
//! before it. [`PendingExport`] owns the records for the duration of the
//! run and writes them when finished, or when dropped if the run body
//! never got that far.

use tracing::{error, info};

use crate::config::{ApiConfig, Cli, ConfigError, RunConfig};
use crate::directions::{DirectionsClient, DirectionsError, DirectionsService, MockDirectionsClient};
use crate::records::{ExportError, ExportSummary, IngestError, Ingested, export, ingest_into};
use crate::resolve::{ResolveStats, resolve_all};

/// Failures that prevent a run from starting. No output is written.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("could not create directions client: {0}")]
    Client(#[from] DirectionsError),
}

/// Outcome of one run.
#[derive(Debug)]
pub struct RunReport {
    /// Output rows held when export ran.
    pub rows: usize,
    /// Distinct postal codes that needed resolving.
    pub groups: usize,
    /// Per-group resolution counts.
    pub resolve: ResolveStats,
    /// Set if reading the input failed part-way or entirely.
    pub ingest_error: Option<IngestError>,
    /// Result of writing the output.
    pub export: Result<ExportSummary, ExportError>,
}

impl RunReport {
    /// Input fully read and output written.
    pub fn is_success(&self) -> bool {
        self.ingest_error.is_none() && self.export.is_ok()
    }
}

/// Records awaiting export.
///
/// Call [`PendingExport::finish`] to export and observe the result. If the
/// guard is dropped unfinished the export still happens and any error is
/// logged.
pub struct PendingExport<'a> {
    config: &'a RunConfig,
    ingested: Ingested,
    done: bool,
}

impl<'a> PendingExport<'a> {
    /// Arm an export of an initially empty record set.
    pub fn new(config: &'a RunConfig) -> Self {
        Self {
            config,
            ingested: Ingested::default(),
            done: false,
        }
    }

    /// The records and groups that will be exported.
    pub fn ingested(&self) -> &Ingested {
        &self.ingested
    }

    pub fn ingested_mut(&mut self) -> &mut Ingested {
        &mut self.ingested
    }

    /// Export now.
    pub fn finish(mut self) -> Result<ExportSummary, ExportError> {
        self.export_once()
    }

    fn export_once(&mut self) -> Result<ExportSummary, ExportError> {
        self.done = true;
        export(&self.config.output, &self.ingested.records, self.config.encoding)
    }
}

impl Drop for PendingExport<'_> {
    fn drop(&mut self) {
        if self.done {
            return;
        }
        match self.export_once() {
            Ok(summary) => info!(
                path = %summary.path.display(),
                rows = summary.rows_written,
                "exported after interrupted run"
            ),
            Err(e) => error!(error = %e, "export after interrupted run failed"),
        }
    }
}

/// Run the whole batch.
///
/// Ingest failures are logged and the run carries on with whatever was
/// read. Lookup failures are isolated to their postal code. Export always
/// runs last.
pub async fn run<S: DirectionsService>(
    config: &RunConfig,
    api: &ApiConfig,
    service: &S,
) -> RunReport {
    let mut pending = PendingExport::new(config);

    let ingest_error = match ingest_into(&config.input, config.encoding, pending.ingested_mut()) {
        Ok(stats) => {
            info!(
                path = %config.input.display(),
                rows = stats.rows_read,
                skipped = stats.rows_skipped,
                duplicates = stats.duplicates,
                "read input"
            );
            None
        }
        Err(e) => {
            error!(error = %e, "reading input failed; exporting what was read");
            Some(e)
        }
    };

    let ingested = pending.ingested_mut();
    let groups = ingested.groups.len();
    let resolve = resolve_all(
        service,
        &api.origin_address,
        &ingested.groups,
        &mut ingested.records,
    )
    .await;

    let rows = pending.ingested().records.len();
    let export = pending.finish();

    match &export {
        Ok(summary) => info!(
            path = %summary.path.display(),
            rows = summary.rows_written,
            resolved = resolve.resolved,
            failed = resolve.failed,
            "wrote output"
        ),
        Err(e) => error!(error = %e, "writing output failed"),
    }

    RunReport {
        rows,
        groups,
        resolve,
        ingest_error,
        export,
    }
}

/// Load configuration from the command line and run.
///
/// Credentials are loaded first; if they are missing nothing else happens.
pub async fn start(cli: &Cli) -> Result<RunReport, StartupError> {
    let api = ApiConfig::load(&cli.config)?;
    let config = cli.run_config()?;

    match &cli.mock_data {
        Some(dir) => {
            let service = MockDirectionsClient::new(dir)?;
            info!(
                dir = %dir.display(),
                destinations = service.available_destinations().len(),
                "using mock directions"
            );
            Ok(run(&config, &api, &service).await)
        }
        None => {
            let service = DirectionsClient::new(cli.client_config(&api.api_key)?)?;
            Ok(run(&config, &api, &service).await)
        }
    }
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
