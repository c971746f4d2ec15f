//! Resolving postal groups to mileage and destination address.
//!
//! One directions lookup is made per postal code, never per row. The result
//! is fanned out to every record in the group.

use tracing::{info, warn};

use crate::directions::{DirectionsError, DirectionsService, Resolution, resolution_from};
use crate::records::{Column, PostalGroup, PostalGroups, RecordSet};

/// Counts from resolving every group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveStats {
    /// Groups whose lookup produced a distance.
    pub resolved: usize,
    /// Groups whose lookup failed or produced no distance.
    pub failed: usize,
    /// Records updated across all groups.
    pub records_updated: usize,
}

/// Look up one postal code.
///
/// Returns an empty [`Resolution`] when the service answers without a
/// usable route or leg; transport and API failures are returned as errors.
pub async fn resolve<S: DirectionsService>(
    service: &S,
    origin: &str,
    postal_code: &str,
) -> Result<Resolution, DirectionsError> {
    let response = service.directions(origin, postal_code).await?;
    Ok(resolution_from(&response))
}

/// Write a resolution into every member of `group`.
///
/// Mileage is only written when a distance was obtained; the address is
/// always written, clearing it when none was obtained. Returns the number
/// of records touched.
pub fn apply(records: &mut RecordSet, group: &PostalGroup, resolution: &Resolution) -> usize {
    let mileage = resolution.miles.map(|m| m.to_string());
    let mut touched = 0;

    for &id in group.members() {
        let Some(record) = records.get_mut(id) else {
            continue;
        };
        if let Some(mileage) = &mileage {
            record.set(Column::ZipMileage, Some(mileage.clone()));
        }
        record.set(Column::ZipAddress, resolution.address.clone());
        touched += 1;
    }

    touched
}

/// Resolve every group in order, one lookup at a time.
///
/// A failed lookup is logged and treated as an empty resolution; it never
/// stops the loop.
pub async fn resolve_all<S: DirectionsService>(
    service: &S,
    origin: &str,
    groups: &PostalGroups,
    records: &mut RecordSet,
) -> ResolveStats {
    let mut stats = ResolveStats::default();

    for group in groups {
        let postal_code = group.postal_code();
        info!(postal_code, rows = group.members().len(), "resolving");

        let resolution = match resolve(service, origin, postal_code).await {
            Ok(resolution) => {
                if !resolution.has_distance() {
                    warn!(postal_code, "no route found");
                }
                resolution
            }
            Err(e) => {
                warn!(postal_code, error = %e, "directions lookup failed");
                Resolution::default()
            }
        };

        if resolution.has_distance() {
            stats.resolved += 1;
        } else {
            stats.failed += 1;
        }

        stats.records_updated += apply(records, group, &resolution);
    }

    stats
}
