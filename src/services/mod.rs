// Service exports
pub mod engine;
pub mod postgres;

pub use engine::{EngineError, MatchingEngine};
pub use postgres::{PostgresStore, StoreError};
