use std::collections::HashSet;
use std::ops::RangeInclusive;

use crate::limits::*;
use crate::model::*;

use super::EngineError;

pub(crate) fn validate_vehicle_id(vehicle_id: &str) -> Result<(), EngineError> {
    if vehicle_id.trim().is_empty() {
        return Err(EngineError::InvalidArgument("vehicle id is required"));
    }
    if vehicle_id.len() > MAX_VEHICLE_ID_LEN {
        return Err(EngineError::InvalidArgument("vehicle id too long"));
    }
    Ok(())
}

/// Unix seconds in `MIN_VALID_TIMESTAMP..=MAX_VALID_TIMESTAMP`; negatives are rejected.
pub(crate) fn validate_timestamp(t: Secs) -> Result<(), EngineError> {
    if !(MIN_VALID_TIMESTAMP..=MAX_VALID_TIMESTAMP).contains(&t) {
        return Err(EngineError::InvalidArgument("timestamp out of range"));
    }
    Ok(())
}

/// Lowest lot sequence in `lots` not referenced by any active record.
pub fn first_free_lot(lots: RangeInclusive<u32>, active: &[OccupancyRecord]) -> Option<u32> {
    let occupied: HashSet<u32> = active.iter().map(|r| r.lot_seq).collect();
    lots.into_iter().find(|seq| !occupied.contains(seq))
}
