//! Ports - boundary contracts the engine composes.
//!
//! Implementations live in `adapters`; tests substitute in-memory fakes.

mod response_repository;
mod survey_store;

pub use response_repository::{PagedRecords, ResponseRepository};
pub use survey_store::SurveyDefinitionStore;
