use std::collections::HashMap;

use crate::model::{Category, HourlyRate};

pub const DEFAULT_CAR_RATE: HourlyRate = 2;
pub const DEFAULT_MOTORCYCLE_RATE: HourlyRate = 1;

/// Startup configuration: lot capacity and hourly rate per category.
///
/// Either map may leave a category out. The engine reports the gap when the
/// category is actually used, not at construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GarageConfig {
    pub lots: HashMap<Category, u32>,
    pub rates: HashMap<Category, HourlyRate>,
}

impl GarageConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(self, category: Category, capacity: u32, rate: HourlyRate) -> Self {
        self.with_lots(category, capacity).with_rate(category, rate)
    }

    pub fn with_lots(mut self, category: Category, capacity: u32) -> Self {
        self.lots.insert(category, capacity);
        self
    }

    pub fn with_rate(mut self, category: Category, rate: HourlyRate) -> Self {
        self.rates.insert(category, rate);
        self
    }

    /// Build from the instruction file header plus the configured rates.
    pub fn from_header(car_lots: u32, motorcycle_lots: u32, rates: &RateConfig) -> Self {
        Self::new()
            .with_category(Category::Car, car_lots, rates.car)
            .with_category(Category::Motorcycle, motorcycle_lots, rates.motorcycle)
    }
}

/// Hourly rates, read from the environment by the binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateConfig {
    pub car: HourlyRate,
    pub motorcycle: HourlyRate,
}

impl Default for RateConfig {
    fn default() -> Self {
        Self {
            car: DEFAULT_CAR_RATE,
            motorcycle: DEFAULT_MOTORCYCLE_RATE,
        }
    }
}

impl RateConfig {
    /// `VALET_CAR_RATE` / `VALET_MOTORCYCLE_RATE`; unset or unparsable values
    /// fall back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            car: env_rate("VALET_CAR_RATE").unwrap_or(defaults.car),
            motorcycle: env_rate("VALET_MOTORCYCLE_RATE").unwrap_or(defaults.motorcycle),
        }
    }
}

fn env_rate(key: &str) -> Option<HourlyRate> {
    std::env::var(key).ok().and_then(|s| s.trim().parse().ok())
}
