use tracing::debug;
use ulid::Ulid;

use crate::model::*;

use super::allocation::{first_free_lot, validate_timestamp, validate_vehicle_id};
use super::fees::billable_hours;
use super::{Engine, EngineError, Ledger};

impl<L: Ledger> Engine<L> {
    /// Park `vehicle_id` in the lowest free lot of `category`.
    ///
    /// A duplicate vehicle fails even when the pool is full. A full pool
    /// yields `Admission::Rejected` and leaves the ledger untouched.
    pub fn enter(
        &mut self,
        category: Category,
        vehicle_id: &str,
        entry: Secs,
    ) -> Result<Admission, EngineError> {
        validate_vehicle_id(vehicle_id)?;
        validate_timestamp(entry)?;

        if let Some(existing) = self.ledger.find_active_by_vehicle(vehicle_id) {
            return Err(EngineError::VehicleAlreadyParked {
                category: existing.category,
                vehicle_id: existing.vehicle_id,
            });
        }

        let lots = self.pool.lots_for(category)?;
        let active = self.ledger.active_by_category(category);
        let Some(seq) = first_free_lot(lots, &active) else {
            debug!("{category} {vehicle_id} rejected: no free lot");
            metrics::counter!(
                crate::observability::ENTRIES_TOTAL,
                "category" => category.label(),
                "outcome" => "rejected"
            )
            .increment(1);
            return Ok(Admission::Rejected);
        };

        let record = OccupancyRecord {
            id: Ulid::new(),
            vehicle_id: VehicleId::from(vehicle_id),
            category,
            lot_seq: seq,
            entry,
        };
        let lot = record.lot();
        let event = Event::VehicleParked {
            record_id: record.id,
            vehicle_id: record.vehicle_id.clone(),
            lot,
            entry,
        };
        self.ledger.insert(record)?;
        self.publish(&event);

        debug!("{category} {vehicle_id} accepted at {lot}");
        metrics::counter!(
            crate::observability::ENTRIES_TOTAL,
            "category" => category.label(),
            "outcome" => "accepted"
        )
        .increment(1);
        Ok(Admission::Accepted(lot))
    }

    /// Release `vehicle_id`, bill the stay, and free its lot.
    ///
    /// Every check runs before the ledger is touched, so a failed exit leaves
    /// the vehicle parked.
    pub fn exit(&mut self, vehicle_id: &str, exit: Secs) -> Result<Departure, EngineError> {
        validate_vehicle_id(vehicle_id)?;
        validate_timestamp(exit)?;

        let record = self
            .ledger
            .find_active_by_vehicle(vehicle_id)
            .ok_or_else(|| EngineError::VehicleNotParked(VehicleId::from(vehicle_id)))?;
        let hours = billable_hours(record.entry, exit)?;
        let rate = self.fees.rate_for(record.category)?;
        let fee = hours * Fee::from(rate);

        let done = self.ledger.release(vehicle_id, exit, fee)?;
        let lot = done.record.lot();
        self.publish(&Event::VehicleReleased {
            record_id: done.record.id,
            vehicle_id: done.record.vehicle_id.clone(),
            lot,
            exit,
            fee,
        });

        debug!("{vehicle_id} left {lot} after {hours}h, fee {fee}");
        let category = lot.category.label();
        metrics::counter!(crate::observability::EXITS_TOTAL, "category" => category).increment(1);
        metrics::counter!(crate::observability::FEES_COLLECTED_TOTAL, "category" => category)
            .increment(fee);
        metrics::histogram!(crate::observability::BILLED_HOURS, "category" => category)
            .record(hours as f64);

        Ok(Departure {
            record_id: done.record.id,
            lot,
            hours,
            fee,
        })
    }
}
