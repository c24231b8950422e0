use crate::model::{Category, LotId, Secs, VehicleId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    DuplicateVehicle {
        category: Category,
        vehicle_id: VehicleId,
    },
    LotOccupied(LotId),
    NotFound(VehicleId),
}

impl std::fmt::Display for LedgerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LedgerError::DuplicateVehicle {
                category,
                vehicle_id,
            } => write!(f, "ledger already holds an active {category} record for {vehicle_id}"),
            LedgerError::LotOccupied(lot) => write!(f, "lot {lot} is already occupied"),
            LedgerError::NotFound(vehicle_id) => {
                write!(f, "no active record for {vehicle_id}")
            }
        }
    }
}

impl std::error::Error for LedgerError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    InvalidArgument(&'static str),
    VehicleAlreadyParked {
        category: Category,
        vehicle_id: VehicleId,
    },
    VehicleNotParked(VehicleId),
    TimeOutBeforeTimeIn {
        entry: Secs,
        exit: Secs,
    },
    FeeNotConfigured(Category),
    Configuration(Category),
    Ledger(LedgerError),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            EngineError::VehicleAlreadyParked {
                category,
                vehicle_id,
            } => write!(f, "{category} {vehicle_id} is already parked"),
            EngineError::VehicleNotParked(vehicle_id) => {
                write!(f, "{vehicle_id} is not found in parking")
            }
            EngineError::TimeOutBeforeTimeIn { entry, exit } => {
                write!(f, "time out {exit} is before time in {entry}")
            }
            EngineError::FeeNotConfigured(category) => {
                write!(f, "parking fee for {category} is not configured")
            }
            EngineError::Configuration(category) => {
                write!(f, "no lots configured for {category}")
            }
            EngineError::Ledger(e) => write!(f, "ledger error: {e}"),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::Ledger(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LedgerError> for EngineError {
    fn from(e: LedgerError) -> Self {
        EngineError::Ledger(e)
    }
}
