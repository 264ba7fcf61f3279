//! Storage seams and the in-memory store behind them

pub mod memory;
pub mod repository;

pub use memory::MemoryStore;
pub use repository::{DelegationRepository, UserRepository};
