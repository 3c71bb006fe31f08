//! Domain module for survey management.
//!
//! This module contains the survey aggregate, its lifecycle rules, the
//! analytics aggregator and the independent user record.

pub mod analytics;
pub mod identifier;
pub mod survey;
pub mod user;

pub use analytics::{OptionAnalytics, QuestionAnalytics, SurveyAnalytics};
pub use identifier::{
    OptionId, QuestionId, ResponseId, ResponseItemId, SurveyId, Timestamp, UserId,
};
pub use survey::{
    Answer, LifecycleError, OptionChoice, Question, QuestionType, ResponseItem, Survey,
    SurveyResponse, SurveyStatus,
};
pub use user::{UserRecord, newest_first};
