//! Participation status query handlers.

mod available_surveys;
mod survey_status;
mod user_status;

pub use available_surveys::AvailableSurveysHandler;
pub use survey_status::SurveyStatusHandler;
pub use user_status::UserStatusHandler;
