use std::collections::HashMap;

use crate::model::{Category, Fee, HourlyRate, SECS_PER_HOUR, Secs};

use super::EngineError;

/// Hourly rate per category, fixed at startup.
#[derive(Debug, Clone, Default)]
pub struct FeeTable {
    rates: HashMap<Category, HourlyRate>,
}

impl FeeTable {
    pub fn new(rates: &HashMap<Category, HourlyRate>) -> Self {
        Self {
            rates: rates.clone(),
        }
    }

    pub fn rate_for(&self, category: Category) -> Result<HourlyRate, EngineError> {
        self.rates
            .get(&category)
            .copied()
            .ok_or(EngineError::FeeNotConfigured(category))
    }
}

/// Whole hours billed for a stay: any partial hour counts as a full one.
/// A zero-length stay bills zero hours.
pub fn billable_hours(entry: Secs, exit: Secs) -> Result<u64, EngineError> {
    if exit < entry {
        return Err(EngineError::TimeOutBeforeTimeIn { entry, exit });
    }
    let elapsed = exit.abs_diff(entry);
    Ok(elapsed.div_ceil(SECS_PER_HOUR.unsigned_abs()))
}

/// Saturates at `Fee::MAX`; timestamps accepted by the engine never get there.
pub fn compute_fee(entry: Secs, exit: Secs, rate: HourlyRate) -> Result<Fee, EngineError> {
    Ok(billable_hours(entry, exit)?.saturating_mul(Fee::from(rate)))
}
