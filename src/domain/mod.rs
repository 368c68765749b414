//! Domain layer - pure model and derivation logic, no I/O.

pub mod analytics;
pub mod foundation;
pub mod participation;
pub mod response;
pub mod survey;
