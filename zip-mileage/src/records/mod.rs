//! Shipping records: the column model, CSV ingest, postal grouping and
//! CSV export.
//!
//! [`RecordSet`] exclusively owns every record. [`PostalGroups`] refers to
//! records by [`RecordId`] only, so resolving a group mutates the same
//! records the exporter later writes.

mod column;
mod error;
mod export;
mod group;
mod ingest;
mod record;

pub use column::Column;
pub use error::{ExportError, IngestError};
pub use export::{ExportSummary, export, render};
pub use group::{PostalGroup, PostalGroups};
pub use ingest::{IngestStats, Ingested, ingest, ingest_into};
pub use record::{Record, RecordId, RecordKey, RecordSet};
