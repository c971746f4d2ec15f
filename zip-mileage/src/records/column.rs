//! The fixed column set.

use std::fmt;

/// One of the ten columns a shipping record carries.
///
/// Declaration order is output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Column {
    CustomerNumber,
    ShipmentNumber,
    CustomerName,
    Address1,
    Address2,
    Address,
    CityState,
    PostalCode,
    ZipAddress,
    ZipMileage,
}

impl Column {
    /// Every column, in output order.
    pub const ALL: [Column; 10] = [
        Column::CustomerNumber,
        Column::ShipmentNumber,
        Column::CustomerName,
        Column::Address1,
        Column::Address2,
        Column::Address,
        Column::CityState,
        Column::PostalCode,
        Column::ZipAddress,
        Column::ZipMileage,
    ];

    /// Header name as it appears in the CSV.
    pub const fn header(self) -> &'static str {
        match self {
            Column::CustomerNumber => "CUS_NO",
            Column::ShipmentNumber => "SHP_NO",
            Column::CustomerName => "CUS_NM",
            Column::Address1 => "ADDR1",
            Column::Address2 => "ADDR2",
            Column::Address => "ADDR",
            Column::CityState => "CITY_STATE",
            Column::PostalCode => "POSTAL_CODE",
            Column::ZipAddress => "ZIP_ADDRESS",
            Column::ZipMileage => "ZIP_MILEAGE",
        }
    }

    /// Look up a column by exact header name.
    pub fn from_header(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.header() == name)
    }

    /// Position in [`Column::ALL`].
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}
