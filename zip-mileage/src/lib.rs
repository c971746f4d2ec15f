//! Shipping-address mileage enricher.
//!
//! Reads a CSV of ship-to addresses, looks up driving directions from a fixed
//! origin once per distinct postal code, and writes the rows back out with
//! `ZIP_MILEAGE` and `ZIP_ADDRESS` filled in.

pub mod config;
pub mod directions;
pub mod pipeline;
pub mod records;
pub mod resolve;

#[cfg(test)]
pub(crate) mod test_support;
