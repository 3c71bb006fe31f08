//! In-memory survey repository.
//!
//! Backed by a [`SurveyStore`]. Surveys are cloned on the way in and on the
//! way out, so nothing a caller holds aliases stored state.

use futures::FutureExt;
use futures::future::BoxFuture;

use crate::domain::{Survey, SurveyId, SurveyResponse};
use crate::infrastructure::{RepositoryError, RepositoryResult, SurveyRepository, SurveyStore};

// =============================================================================
// In-Memory Survey Repository
// =============================================================================

/// In-memory implementation of `SurveyRepository`.
///
/// # Example
///
/// ```ignore
/// let repository = InMemorySurveyRepository::new(SurveyStore::new());
/// repository.add(&survey).await?;
/// let found = repository.find_by_id(survey.survey_id).await?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemorySurveyRepository {
    store: SurveyStore,
}

impl InMemorySurveyRepository {
    #[must_use]
    pub const fn new(store: SurveyStore) -> Self {
        Self { store }
    }
}

fn survey_not_found(id: SurveyId) -> RepositoryError {
    RepositoryError::NotFound(format!("Survey {id}"))
}

impl SurveyRepository for InMemorySurveyRepository {
    fn list(&self) -> BoxFuture<'static, RepositoryResult<Vec<Survey>>> {
        let store = self.store.clone();
        async move { Ok(store.read(<[Survey]>::to_vec).await) }.boxed()
    }

    fn find_by_id(&self, id: SurveyId) -> BoxFuture<'static, RepositoryResult<Option<Survey>>> {
        let store = self.store.clone();
        async move {
            Ok(store
                .read(|surveys| {
                    surveys
                        .iter()
                        .find(|survey| survey.survey_id == id)
                        .cloned()
                })
                .await)
        }
        .boxed()
    }

    fn add(&self, survey: &Survey) -> BoxFuture<'static, RepositoryResult<()>> {
        let store = self.store.clone();
        let survey = survey.clone();
        async move {
            store
                .write(|surveys| {
                    if surveys
                        .iter()
                        .any(|existing| existing.survey_id == survey.survey_id)
                    {
                        return Err(RepositoryError::Conflict(format!(
                            "Survey {}",
                            survey.survey_id
                        )));
                    }
                    surveys.push(survey);
                    Ok(())
                })
                .await
        }
        .boxed()
    }

    fn update(&self, survey: &Survey) -> BoxFuture<'static, RepositoryResult<()>> {
        let store = self.store.clone();
        let survey = survey.clone();
        async move {
            store
                .write(|surveys| {
                    let stored = surveys
                        .iter_mut()
                        .find(|existing| existing.survey_id == survey.survey_id)
                        .ok_or_else(|| survey_not_found(survey.survey_id))?;
                    *stored = survey;
                    Ok(())
                })
                .await
        }
        .boxed()
    }

    fn delete(&self, id: SurveyId) -> BoxFuture<'static, RepositoryResult<bool>> {
        let store = self.store.clone();
        async move {
            Ok(store
                .write(|surveys| {
                    let before = surveys.len();
                    surveys.retain(|survey| survey.survey_id != id);
                    surveys.len() != before
                })
                .await)
        }
        .boxed()
    }

    fn add_response(
        &self,
        survey_id: SurveyId,
        response: &SurveyResponse,
    ) -> BoxFuture<'static, RepositoryResult<()>> {
        let store = self.store.clone();
        let response = response.clone();
        async move {
            store
                .write(|surveys| {
                    let stored = surveys
                        .iter_mut()
                        .find(|survey| survey.survey_id == survey_id)
                        .ok_or_else(|| survey_not_found(survey_id))?;
                    stored.responses.push(SurveyResponse {
                        survey_id,
                        ..response
                    });
                    Ok(())
                })
                .await
        }
        .boxed()
    }
}
