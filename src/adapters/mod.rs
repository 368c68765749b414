//! Adapters - concrete implementations of the port boundaries.

pub mod export;
pub mod memory;
pub mod postgres;
