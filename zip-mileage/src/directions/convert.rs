//! Conversion from directions DTOs to a [`Resolution`].
//!
//! Only the first leg of the first route is consulted. Distances arrive in
//! metres and are reported as whole miles, rounded half-up.

use super::types::DirectionsResponse;

/// 1609.34 metres per mile, in centimetres so the division stays integral.
const CENTIMETRES_PER_MILE: u128 = 160_934;

/// Outcome of resolving one postal code.
///
/// A distance may come without an end address, but never the reverse: a leg
/// with no distance resolves to nothing. A failed lookup is
/// `Resolution::default()`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Trip distance in whole miles.
    pub miles: Option<u64>,
    /// Resolved destination address.
    pub address: Option<String>,
}

impl Resolution {
    /// Whether a distance was obtained.
    pub fn has_distance(&self) -> bool {
        self.miles.is_some()
    }
}

/// Convert metres to whole miles, rounding half-up.
///
/// Computes `metres / 1609.34` exactly in integer arithmetic.
///
/// ```
/// use zip_mileage::directions::metres_to_miles;
///
/// assert_eq!(metres_to_miles(1_609_340), 1000);
/// assert_eq!(metres_to_miles(5000), 3);
/// assert_eq!(metres_to_miles(0), 0);
/// ```
pub fn metres_to_miles(metres: u64) -> u64 {
    // round(m * 100 / 160934) == floor((2 * m * 100 + 160934) / (2 * 160934))
    let numerator = u128::from(metres) * 200 + CENTIMETRES_PER_MILE;
    let miles = numerator / (2 * CENTIMETRES_PER_MILE);
    u64::try_from(miles).unwrap_or(u64::MAX)
}

/// Extract a resolution from a directions response.
///
/// Returns an empty resolution when there is no route, no leg, or the first
/// leg has no distance.
pub fn resolution_from(response: &DirectionsResponse) -> Resolution {
    let Some(leg) = response.first_leg() else {
        return Resolution::default();
    };
    let Some(distance) = leg.distance else {
        return Resolution::default();
    };

    Resolution {
        miles: Some(metres_to_miles(distance.value)),
        address: leg.end_address.clone(),
    }
}
