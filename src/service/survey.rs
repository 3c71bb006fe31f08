//! Survey lifecycle service.
//!
//! Orchestrates validation, lifecycle transitions and persistence. Every
//! mutating operation is a read-modify-write against the repository, so
//! mutations are serialised through a write gate: a response can never be
//! appended to a survey that is concurrently being closed, and a close can
//! never write back a stale response list.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::{ResponseId, Survey, SurveyAnalytics, SurveyId, SurveyResponse, Timestamp};
use crate::infrastructure::SurveyRepository;
use crate::service::ServiceError;
use crate::service::validation::{AnswerSubmission, SurveyDraft, build_answers, build_content};

/// Author recorded when a create request does not name one.
pub const DEFAULT_CREATED_BY: &str = "admin";

/// Application service for surveys.
#[derive(Clone)]
pub struct SurveyService {
    repository: Arc<dyn SurveyRepository>,
    write_gate: Arc<Mutex<()>>,
}

impl std::fmt::Debug for SurveyService {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("SurveyService")
            .field("repository", &"Arc<dyn SurveyRepository>")
            .finish_non_exhaustive()
    }
}

impl SurveyService {
    #[must_use]
    pub fn new(repository: Arc<dyn SurveyRepository>) -> Self {
        Self {
            repository,
            write_gate: Arc::new(Mutex::new(())),
        }
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    /// Lists every survey in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Unexpected` if the store fails.
    pub async fn list(&self) -> Result<Vec<Survey>, ServiceError> {
        Ok(self.repository.list().await?)
    }

    /// Fetches one survey.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::NotFound` if the survey does not exist.
    pub async fn get(&self, id: SurveyId) -> Result<Survey, ServiceError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(ServiceError::survey_not_found)
    }

    /// Computes analytics for one survey.
    ///
    /// Returns `Ok(None)` if the survey does not exist.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Unexpected` if the store fails.
    pub async fn analytics(&self, id: SurveyId) -> Result<Option<SurveyAnalytics>, ServiceError> {
        let survey = self.repository.find_by_id(id).await?;
        Ok(survey.as_ref().map(SurveyAnalytics::compute))
    }

    // -------------------------------------------------------------------------
    // Writes
    // -------------------------------------------------------------------------

    /// Validates `draft` and stores it as a new draft survey.
    ///
    /// A missing or blank `created_by` is recorded as
    /// [`DEFAULT_CREATED_BY`].
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::BadInput` if the draft fails validation.
    pub async fn create(
        &self,
        draft: SurveyDraft,
        created_by: Option<String>,
    ) -> Result<Survey, ServiceError> {
        let survey_id = SurveyId::generate_v7();
        let content = build_content(survey_id, draft).inspect_err(|error| {
            tracing::debug!(%error, "Survey create rejected");
        })?;
        let created_by = created_by
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_CREATED_BY);

        let survey = Survey::new(
            survey_id,
            content.title,
            content.description,
            created_by,
            Timestamp::now(),
        )
        .with_questions(content.questions);

        let _gate = self.write_gate.lock().await;
        self.repository.add(&survey).await?;
        tracing::info!(survey_id = %survey.survey_id, "Survey created");
        Ok(survey)
    }

    /// Replaces the content of a draft survey.
    ///
    /// Checks run in order: existence, draft status, then content.
    ///
    /// # Errors
    ///
    /// - `ServiceError::NotFound` if the survey does not exist
    /// - `ServiceError::InvalidTransition` if it is not a draft
    /// - `ServiceError::BadInput` if the draft fails validation
    pub async fn update(&self, id: SurveyId, draft: SurveyDraft) -> Result<Survey, ServiceError> {
        let _gate = self.write_gate.lock().await;
        let existing = self.get(id).await?;
        existing.ensure_editable()?;

        let content = build_content(id, draft).inspect_err(|error| {
            tracing::debug!(survey_id = %id, %error, "Survey update rejected");
        })?;
        let survey = existing.revise(content.title, content.description, content.questions)?;

        self.repository.update(&survey).await?;
        tracing::info!(survey_id = %id, "Survey updated");
        Ok(survey)
    }

    /// Moves a survey from `Draft` to `Published`.
    ///
    /// # Errors
    ///
    /// - `ServiceError::NotFound` if the survey does not exist
    /// - `ServiceError::InvalidTransition` if it is not a draft
    pub async fn publish(&self, id: SurveyId) -> Result<(), ServiceError> {
        let _gate = self.write_gate.lock().await;
        let survey = self.get(id).await?.publish()?;
        self.repository.update(&survey).await?;
        tracing::info!(survey_id = %id, "Survey published");
        Ok(())
    }

    /// Moves a survey from `Published` to `Closed`.
    ///
    /// # Errors
    ///
    /// - `ServiceError::NotFound` if the survey does not exist
    /// - `ServiceError::InvalidTransition` if it is not published
    pub async fn close(&self, id: SurveyId) -> Result<(), ServiceError> {
        let _gate = self.write_gate.lock().await;
        let survey = self.get(id).await?.close()?;
        self.repository.update(&survey).await?;
        tracing::info!(survey_id = %id, "Survey closed");
        Ok(())
    }

    /// Deletes a survey with its questions and responses, in any status.
    ///
    /// Returns whether anything was removed.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Unexpected` if the store fails.
    pub async fn delete(&self, id: SurveyId) -> Result<bool, ServiceError> {
        let _gate = self.write_gate.lock().await;
        let removed = self.repository.delete(id).await?;
        tracing::info!(survey_id = %id, removed, "Survey deleted");
        Ok(removed)
    }

    /// Validates and records an anonymous response.
    ///
    /// # Errors
    ///
    /// - `ServiceError::NotFound` if the survey does not exist
    /// - `ServiceError::InvalidTransition` if it is not published
    /// - `ServiceError::BadInput` if an answer fails validation
    pub async fn submit_response(
        &self,
        id: SurveyId,
        answers: Vec<AnswerSubmission>,
    ) -> Result<SurveyResponse, ServiceError> {
        let _gate = self.write_gate.lock().await;
        let survey = self.get(id).await?;
        survey.ensure_accepting_responses()?;

        let items = build_answers(&survey, answers).inspect_err(|error| {
            tracing::debug!(survey_id = %id, %error, "Response rejected");
        })?;
        let response = SurveyResponse::new(ResponseId::generate_v7(), id, Timestamp::now(), items);

        self.repository.add_response(id, &response).await?;
        tracing::info!(
            survey_id = %id,
            response_id = %response.response_id,
            answers = response.answers.len(),
            "Response added to survey"
        );
        Ok(response)
    }
}
