//! PostgreSQL adapters for the port boundaries.

mod response_repository;
mod survey_store;

pub use response_repository::PostgresResponseRepository;
pub use survey_store::PostgresSurveyStore;
