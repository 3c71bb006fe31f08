//! Application services.
//!
//! Services validate input, apply lifecycle rules and talk to repositories.
//! They return domain values; projection to the wire format happens in the
//! API layer.

pub mod error;
pub mod survey;
pub mod user;
pub mod validation;

pub use error::ServiceError;
pub use survey::{DEFAULT_CREATED_BY, SurveyService};
pub use user::UserService;
pub use validation::{
    AnswerSubmission, OptionDraft, QuestionDraft, SurveyContent, SurveyDraft, build_answers,
    build_content, validate_draft,
};
