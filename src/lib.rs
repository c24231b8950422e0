pub mod config;
pub mod engine;
pub mod instructions;
pub mod limits;
pub mod model;
pub mod notify;
pub mod observability;
pub mod report;
pub mod runner;
