use std::collections::{BTreeMap, HashMap};

use crate::model::*;

use super::LedgerError;

/// Occupancy ledger: active records keyed by vehicle, plus released history.
///
/// Records go in and come out by value; implementations never hand out
/// references into their own state.
pub trait Ledger {
    /// Active records for `category`, ascending by lot sequence.
    fn active_by_category(&self, category: Category) -> Vec<OccupancyRecord>;

    fn find_active_by_vehicle(&self, vehicle_id: &str) -> Option<OccupancyRecord>;

    fn is_lot_occupied(&self, lot: LotId) -> bool;

    fn insert(&mut self, record: OccupancyRecord) -> Result<(), LedgerError>;

    /// Move the vehicle's active record into history.
    fn release(
        &mut self,
        vehicle_id: &str,
        exit: Secs,
        fee: Fee,
    ) -> Result<CompletedRecord, LedgerError>;

    /// Released records, oldest release first.
    fn completed(&self) -> Vec<CompletedRecord>;
}

#[derive(Debug, Default)]
pub struct InMemoryLedger {
    active: HashMap<VehicleId, OccupancyRecord>,
    /// category → lot seq → vehicle, kept sorted for first-fit scans.
    occupied: HashMap<Category, BTreeMap<u32, VehicleId>>,
    history: Vec<CompletedRecord>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }
}

impl Ledger for InMemoryLedger {
    // ── Queries ──────────────────────────────────────────────

    fn active_by_category(&self, category: Category) -> Vec<OccupancyRecord> {
        let Some(lots) = self.occupied.get(&category) else {
            return Vec::new();
        };
        lots.values()
            .filter_map(|vehicle_id| self.active.get(vehicle_id).cloned())
            .collect()
    }

    fn find_active_by_vehicle(&self, vehicle_id: &str) -> Option<OccupancyRecord> {
        self.active.get(vehicle_id).cloned()
    }

    fn is_lot_occupied(&self, lot: LotId) -> bool {
        self.occupied
            .get(&lot.category)
            .is_some_and(|lots| lots.contains_key(&lot.seq))
    }

    fn completed(&self) -> Vec<CompletedRecord> {
        self.history.clone()
    }

    // ── Mutations ────────────────────────────────────────────

    fn insert(&mut self, record: OccupancyRecord) -> Result<(), LedgerError> {
        if let Some(existing) = self.active.get(&record.vehicle_id) {
            return Err(LedgerError::DuplicateVehicle {
                category: existing.category,
                vehicle_id: record.vehicle_id.clone(),
            });
        }
        let lot = record.lot();
        if self.is_lot_occupied(lot) {
            return Err(LedgerError::LotOccupied(lot));
        }
        self.occupied
            .entry(record.category)
            .or_default()
            .insert(record.lot_seq, record.vehicle_id.clone());
        self.active.insert(record.vehicle_id.clone(), record);
        Ok(())
    }

    fn release(
        &mut self,
        vehicle_id: &str,
        exit: Secs,
        fee: Fee,
    ) -> Result<CompletedRecord, LedgerError> {
        let record = self
            .active
            .remove(vehicle_id)
            .ok_or_else(|| LedgerError::NotFound(VehicleId::from(vehicle_id)))?;
        if let Some(lots) = self.occupied.get_mut(&record.category) {
            lots.remove(&record.lot_seq);
        }
        let completed = CompletedRecord { record, exit, fee };
        self.history.push(completed.clone());
        Ok(completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ulid::Ulid;

    fn record(vehicle: &str, category: Category, lot_seq: u32, entry: Secs) -> OccupancyRecord {
        OccupancyRecord {
            id: Ulid::new(),
            vehicle_id: vehicle.into(),
            category,
            lot_seq,
            entry,
        }
    }

    #[test]
    fn insert_and_find() {
        let mut ledger = InMemoryLedger::new();
        let rec = record("SGX1234A", Category::Motorcycle, 1, 100);
        ledger.insert(rec.clone()).unwrap();
        assert_eq!(ledger.find_active_by_vehicle("SGX1234A"), Some(rec));
        assert!(ledger.is_lot_occupied(LotId::new(Category::Motorcycle, 1)));
        assert!(!ledger.is_lot_occupied(LotId::new(Category::Car, 1)));
    }

    #[test]
    fn active_by_category_is_ascending_by_lot() {
        let mut ledger = InMemoryLedger::new();
        ledger.insert(record("C", Category::Car, 3, 0)).unwrap();
        ledger.insert(record("A", Category::Car, 1, 0)).unwrap();
        ledger.insert(record("M", Category::Motorcycle, 2, 0)).unwrap();
        ledger.insert(record("B", Category::Car, 2, 0)).unwrap();

        let seqs: Vec<u32> = ledger
            .active_by_category(Category::Car)
            .iter()
            .map(|r| r.lot_seq)
            .collect();
        assert_eq!(seqs, vec![1, 2, 3]);
        assert_eq!(ledger.active_by_category(Category::Motorcycle).len(), 1);
    }

    #[test]
    fn duplicate_vehicle_rejected_across_categories() {
        let mut ledger = InMemoryLedger::new();
        ledger.insert(record("X", Category::Car, 1, 0)).unwrap();
        let err = ledger
            .insert(record("X", Category::Motorcycle, 1, 0))
            .unwrap_err();
        assert_eq!(
            err,
            LedgerError::DuplicateVehicle {
                category: Category::Car,
                vehicle_id: "X".into()
            }
        );
        assert_eq!(ledger.active_count(), 1);
    }

    #[test]
    fn occupied_lot_rejected() {
        let mut ledger = InMemoryLedger::new();
        ledger.insert(record("X", Category::Car, 1, 0)).unwrap();
        let err = ledger.insert(record("Y", Category::Car, 1, 0)).unwrap_err();
        assert_eq!(err, LedgerError::LotOccupied(LotId::new(Category::Car, 1)));
        assert!(ledger.find_active_by_vehicle("Y").is_none());
    }

    #[test]
    fn release_moves_to_history_and_frees_lot() {
        let mut ledger = InMemoryLedger::new();
        let rec = record("X", Category::Car, 2, 100);
        ledger.insert(rec.clone()).unwrap();

        let done = ledger.release("X", 3700, 4).unwrap();
        assert_eq!(done.record, rec);
        assert_eq!(done.exit, 3700);
        assert_eq!(done.fee, 4);

        assert!(ledger.find_active_by_vehicle("X").is_none());
        assert!(!ledger.is_lot_occupied(LotId::new(Category::Car, 2)));
        assert_eq!(ledger.completed(), vec![done]);
    }

    #[test]
    fn release_unknown_vehicle_fails() {
        let mut ledger = InMemoryLedger::new();
        assert_eq!(
            ledger.release("NOPE", 0, 0),
            Err(LedgerError::NotFound("NOPE".into()))
        );
        assert!(ledger.completed().is_empty());
    }

    #[test]
    fn released_vehicle_can_be_inserted_again() {
        let mut ledger = InMemoryLedger::new();
        ledger.insert(record("X", Category::Car, 1, 0)).unwrap();
        ledger.release("X", 10, 2).unwrap();
        ledger.insert(record("X", Category::Car, 1, 20)).unwrap();
        assert_eq!(ledger.active_count(), 1);
        assert_eq!(ledger.completed().len(), 1);
    }
}
