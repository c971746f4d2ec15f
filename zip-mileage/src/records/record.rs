//! Shipping records and the set that owns them.

use std::collections::HashMap;
use std::fmt;

use super::column::Column;

/// A single shipping row, one optional value per [`Column`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    values: [Option<String>; 10],
}

impl Record {
    /// Create a record with every column absent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a column's value.
    pub fn get(&self, column: Column) -> Option<&str> {
        self.values[column.index()].as_deref()
    }

    /// Set a column's value, returning the previous one.
    pub fn set(&mut self, column: Column, value: Option<String>) -> Option<String> {
        std::mem::replace(&mut self.values[column.index()], value)
    }

    /// Builder form of [`Record::set`].
    pub fn with(mut self, column: Column, value: impl Into<String>) -> Self {
        self.set(column, Some(value.into()));
        self
    }

    /// Whether a column is absent or whitespace-only.
    pub fn is_blank(&self, column: Column) -> bool {
        self.get(column).is_none_or(|v| v.trim().is_empty())
    }

    /// The postal code, if present and not blank. Returned untrimmed.
    pub fn postal_code(&self) -> Option<&str> {
        if self.is_blank(Column::PostalCode) {
            None
        } else {
            self.get(Column::PostalCode)
        }
    }

    /// Whether mileage still needs resolving.
    pub fn needs_mileage(&self) -> bool {
        self.is_blank(Column::ZipMileage)
    }

    /// The `customer-shipment` key.
    pub fn key(&self) -> RecordKey {
        RecordKey::new(
            self.get(Column::CustomerNumber).unwrap_or_default(),
            self.get(Column::ShipmentNumber).unwrap_or_default(),
        )
    }
}

/// `customerNumber-shipmentNumber`, identifying an output row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordKey(String);

impl RecordKey {
    /// Build a key from its two halves.
    pub fn new(customer: &str, shipment: &str) -> Self {
        Self(format!("{customer}-{shipment}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Handle to a record inside a [`RecordSet`].
///
/// Only meaningful for the set that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(usize);

/// Owner of every record read in a run.
///
/// Records live in an arena addressed by [`RecordId`]. A separate
/// insertion-ordered key index decides which records are output: inserting
/// under an existing key replaces the output row in place, and the displaced
/// record stays in the arena so outstanding ids remain valid.
#[derive(Debug, Default)]
pub struct RecordSet {
    arena: Vec<Record>,
    /// Output rows, in first-seen key order; each slot points into `arena`.
    rows: Vec<RecordId>,
    /// Key -> position in `rows`.
    positions: HashMap<RecordKey, usize>,
}

impl RecordSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record under its key.
    ///
    /// Last write wins: a duplicate key takes over the earlier row's output
    /// position. Returns the new record's id and whether it displaced one.
    pub fn insert(&mut self, record: Record) -> (RecordId, bool) {
        let key = record.key();
        let id = RecordId(self.arena.len());
        self.arena.push(record);

        match self.positions.get(&key) {
            Some(&pos) => {
                self.rows[pos] = id;
                (id, true)
            }
            None => {
                self.positions.insert(key, self.rows.len());
                self.rows.push(id);
                (id, false)
            }
        }
    }

    /// Borrow a record by id.
    pub fn get(&self, id: RecordId) -> Option<&Record> {
        self.arena.get(id.0)
    }

    /// Mutably borrow a record by id.
    pub fn get_mut(&mut self, id: RecordId) -> Option<&mut Record> {
        self.arena.get_mut(id.0)
    }

    /// Look up the current record for a key.
    pub fn by_key(&self, key: &RecordKey) -> Option<&Record> {
        let pos = *self.positions.get(key)?;
        self.get(self.rows[pos])
    }

    /// Output rows, in order.
    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.rows.iter().map(|id| &self.arena[id.0])
    }

    /// Number of output rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of records ever inserted, displaced ones included.
    pub fn total_inserted(&self) -> usize {
        self.arena.len()
    }
}
