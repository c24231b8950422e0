use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use ulid::Ulid;

/// Unix seconds. The only time type.
pub type Secs = i64;

/// Amount charged on exit, in whole currency units.
pub type Fee = u64;

/// Hourly rate for a category, in whole currency units.
pub type HourlyRate = u32;

pub const SECS_PER_HOUR: Secs = 3_600;

/// Vehicle class. Each category has its own lot pool and hourly rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Car,
    Motorcycle,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Car, Category::Motorcycle];

    /// Human-readable label, also the prefix of lot labels.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Car => "Car",
            Category::Motorcycle => "Motorcycle",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown vehicle category: {}", self.0)
    }
}

impl std::error::Error for UnknownCategory {}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// Vehicle identifier (licence plate). Unique among active records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct VehicleId(String);

impl VehicleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VehicleId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl Borrow<str> for VehicleId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// One lot: `(category, seq)` with `seq` starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LotId {
    pub category: Category,
    pub seq: u32,
}

impl LotId {
    pub fn new(category: Category, seq: u32) -> Self {
        debug_assert!(seq >= 1, "lot sequence numbers start at 1");
        Self { category, seq }
    }

    /// e.g. `CarLot2`.
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for LotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}Lot{}", self.category.label(), self.seq)
    }
}

impl Serialize for LotId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// An active binding of a vehicle to a lot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OccupancyRecord {
    pub id: Ulid,
    pub vehicle_id: VehicleId,
    pub category: Category,
    pub lot_seq: u32,
    pub entry: Secs,
}

impl OccupancyRecord {
    pub fn lot(&self) -> LotId {
        LotId::new(self.category, self.lot_seq)
    }
}

/// A released occupancy record, kept as history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletedRecord {
    pub record: OccupancyRecord,
    pub exit: Secs,
    pub fee: Fee,
}

/// Result of an entry attempt. A full pool is a normal outcome, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Accepted(LotId),
    Rejected,
}

impl Admission {
    pub fn lot(&self) -> Option<LotId> {
        match self {
            Admission::Accepted(lot) => Some(*lot),
            Admission::Rejected => None,
        }
    }
}

/// Result of a successful exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Departure {
    pub record_id: Ulid,
    pub lot: LotId,
    pub hours: u64,
    pub fee: Fee,
}

/// Ledger events, published to subscribers after each successful mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Event {
    VehicleParked {
        record_id: Ulid,
        vehicle_id: VehicleId,
        lot: LotId,
        entry: Secs,
    },
    VehicleReleased {
        record_id: Ulid,
        vehicle_id: VehicleId,
        lot: LotId,
        exit: Secs,
        fee: Fee,
    },
}

impl Event {
    pub fn lot(&self) -> LotId {
        match self {
            Event::VehicleParked { lot, .. } | Event::VehicleReleased { lot, .. } => *lot,
        }
    }
}
