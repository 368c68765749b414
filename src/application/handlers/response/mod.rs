//! Response command/query handlers.

mod list_responses;
mod submit_response;

pub use list_responses::{ListResponsesHandler, ListResponsesQuery, ResponseListing};
pub use submit_response::{SubmitError, SubmitResponseCommand, SubmitResponseHandler};
