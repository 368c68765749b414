//! Export adapters (formatting collaborators).

mod csv;

pub use csv::{write_responses_csv, ExportUser, ResponseExportRow};
