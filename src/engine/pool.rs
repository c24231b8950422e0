use std::collections::HashMap;
use std::ops::RangeInclusive;

use crate::limits::MAX_LOTS_PER_CATEGORY;
use crate::model::Category;

use super::EngineError;

/// Per-category lot sequences, fixed at startup.
///
/// A category configured with capacity 0 is valid: it owns no lots and every
/// entry for it is rejected. A category absent from the configuration is a
/// configuration error when queried.
#[derive(Debug, Clone, Default)]
pub struct LotPool {
    capacity: HashMap<Category, u32>,
}

impl LotPool {
    pub fn new(capacity: &HashMap<Category, u32>) -> Self {
        let capacity = capacity
            .iter()
            .map(|(&category, &cap)| {
                if cap > MAX_LOTS_PER_CATEGORY {
                    tracing::warn!(
                        "{category}: capacity {cap} clamped to {MAX_LOTS_PER_CATEGORY}"
                    );
                }
                (category, cap.min(MAX_LOTS_PER_CATEGORY))
            })
            .collect();
        Self { capacity }
    }

    /// Lot sequence numbers for `category`, ascending.
    pub fn lots_for(&self, category: Category) -> Result<RangeInclusive<u32>, EngineError> {
        self.capacity_of(category).map(|cap| 1..=cap)
    }

    pub fn capacity_of(&self, category: Category) -> Result<u32, EngineError> {
        self.capacity
            .get(&category)
            .copied()
            .ok_or(EngineError::Configuration(category))
    }
}
