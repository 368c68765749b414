//! Pulse Surveys - Survey Response Validation and Participation Analytics
//!
//! This crate validates survey submissions against typed question
//! definitions, aggregates per-user and per-survey participation, and
//! projects organization-wide dashboard metrics and participation trends.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
