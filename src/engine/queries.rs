use crate::model::*;

use super::{Engine, EngineError, Ledger};

impl<L: Ledger> Engine<L> {
    pub fn capacity(&self, category: Category) -> Result<u32, EngineError> {
        self.pool.capacity_of(category)
    }

    /// Occupied lots of `category`, ascending.
    pub fn occupied_lots(&self, category: Category) -> Result<Vec<LotId>, EngineError> {
        self.pool.lots_for(category)?;
        Ok(self
            .ledger
            .active_by_category(category)
            .iter()
            .map(OccupancyRecord::lot)
            .collect())
    }

    pub fn free_lot_count(&self, category: Category) -> Result<u32, EngineError> {
        let capacity = self.pool.capacity_of(category)?;
        let occupied = self.ledger.active_by_category(category).len() as u32;
        Ok(capacity.saturating_sub(occupied))
    }

    pub fn is_occupied(&self, lot: LotId) -> bool {
        self.ledger.is_lot_occupied(lot)
    }

    pub fn find_parked(&self, vehicle_id: &str) -> Option<OccupancyRecord> {
        self.ledger.find_active_by_vehicle(vehicle_id)
    }

    /// Completed stays, oldest release first.
    pub fn history(&self) -> Vec<CompletedRecord> {
        self.ledger.completed()
    }
}
