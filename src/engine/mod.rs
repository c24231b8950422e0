mod allocation;
mod error;
pub mod fees;
mod mutations;
pub mod pool;
mod queries;
pub mod store;

pub use allocation::first_free_lot;
pub use error::{EngineError, LedgerError};
pub use fees::{FeeTable, billable_hours, compute_fee};
pub use pool::LotPool;
pub use store::{InMemoryLedger, Ledger};

use std::sync::Arc;

use crate::config::GarageConfig;
use crate::model::*;
use crate::notify::NotifyHub;

/// Allocation and billing over one garage.
///
/// Mutating calls take `&mut self`: each enter/exit runs to completion with
/// exclusive access to the ledger. Share it behind a single lock if needed.
pub struct Engine<L: Ledger = InMemoryLedger> {
    pool: LotPool,
    fees: FeeTable,
    ledger: L,
    notify: Arc<NotifyHub>,
}

impl Engine {
    pub fn new(config: &GarageConfig, notify: Arc<NotifyHub>) -> Self {
        Self::with_ledger(config, InMemoryLedger::new(), notify)
    }
}

impl<L: Ledger> Engine<L> {
    pub fn with_ledger(config: &GarageConfig, ledger: L, notify: Arc<NotifyHub>) -> Self {
        Self {
            pool: LotPool::new(&config.lots),
            fees: FeeTable::new(&config.rates),
            ledger,
            notify,
        }
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Publish + refresh the occupancy gauge. Call only after the ledger changed.
    fn publish(&self, event: &Event) {
        let category = event.lot().category;
        let occupied = self.ledger.active_by_category(category).len();
        metrics::gauge!(crate::observability::LOTS_OCCUPIED, "category" => category.label())
            .set(occupied as f64);
        self.notify.send(category, event);
    }
}
