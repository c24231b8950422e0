use crate::model::Secs;

pub const MAX_VEHICLE_ID_LEN: usize = 32;

/// Earliest accepted timestamp (Unix epoch).
pub const MIN_VALID_TIMESTAMP: Secs = 0;

/// Latest accepted timestamp: 9999-12-31T23:59:59Z.
pub const MAX_VALID_TIMESTAMP: Secs = 253_402_300_799;

pub const MAX_LOTS_PER_CATEGORY: u32 = 100_000;

/// Longest instruction line the runner will buffer.
pub const MAX_LINE_LEN: usize = 1024;
