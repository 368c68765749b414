//! Command and query handlers composing the port boundaries.

pub mod analytics;
pub mod participation;
pub mod response;
