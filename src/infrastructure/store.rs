//! The authoritative in-memory survey store.
//!
//! A single `tokio::sync::Mutex` guards the whole list. Access goes through
//! [`SurveyStore::read`] and [`SurveyStore::write`], which hold the lock
//! for the full duration of the supplied closure, so every store operation
//! is serialised and all-or-nothing.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::{
    OptionChoice, OptionId, Question, QuestionId, QuestionType, Survey, SurveyId, SurveyStatus,
    Timestamp,
};

/// Shared handle to the survey list.
///
/// Cloning the handle shares the same underlying data.
#[derive(Debug, Clone, Default)]
pub struct SurveyStore {
    surveys: Arc<Mutex<Vec<Survey>>>,
}

impl SurveyStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding [`example_survey`].
    #[must_use]
    pub fn seeded() -> Self {
        Self::with_surveys(vec![example_survey(Timestamp::now())])
    }

    /// Creates a store holding the given surveys.
    #[must_use]
    pub fn with_surveys(surveys: Vec<Survey>) -> Self {
        Self {
            surveys: Arc::new(Mutex::new(surveys)),
        }
    }

    /// Runs `operation` with shared access to the surveys.
    pub async fn read<R>(&self, operation: impl FnOnce(&[Survey]) -> R) -> R {
        let guard = self.surveys.lock().await;
        operation(guard.as_slice())
    }

    /// Runs `operation` with exclusive access to the surveys.
    pub async fn write<R>(&self, operation: impl FnOnce(&mut Vec<Survey>) -> R) -> R {
        let mut guard = self.surveys.lock().await;
        operation(&mut *guard)
    }
}

/// The "Campus Facilities Feedback" survey used to seed a fresh store.
///
/// It is already published so that it can take responses straight away.
#[must_use]
pub fn example_survey(created_at: Timestamp) -> Survey {
    let survey_id = SurveyId::generate_v7();
    let rating_id = QuestionId::generate_v7();

    let rating = Question::new(
        rating_id,
        survey_id,
        "How would you rate the library facilities?",
        QuestionType::SingleChoice,
    )
    .with_options(
        ["Excellent", "Good", "Average", "Poor"]
            .into_iter()
            .map(|text| OptionChoice::new(OptionId::generate_v7(), rating_id, text))
            .collect(),
    );

    let suggestions = Question::new(
        QuestionId::generate_v7(),
        survey_id,
        "Any suggestions to improve facilities?",
        QuestionType::Text,
    );

    let survey = Survey::new(
        survey_id,
        "Campus Facilities Feedback",
        "Collects anonymous feedback about campus facilities",
        "admin",
        created_at,
    )
    .with_questions(vec![rating, suggestions]);

    Survey {
        status: SurveyStatus::Published,
        ..survey
    }
}
