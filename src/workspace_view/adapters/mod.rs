//! Adapter implementations for workspace view ports.
//!
//! - [`memory`]: thread-safe in-memory adapters
//! - [`postgres`]: Diesel adapters over `PostgreSQL`

pub mod memory;
pub mod postgres;
