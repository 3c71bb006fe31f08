//! Data Transfer Objects for API requests and responses.
//!
//! Field names are camelCase on the wire. Request string fields default to
//! empty when absent so that the service reports a validation message
//! instead of a deserialisation error.

use serde::{Deserialize, Serialize};

use crate::domain::{
    OptionAnalytics, OptionChoice, OptionId, Question, QuestionAnalytics, QuestionId,
    QuestionType, Survey, SurveyAnalytics, SurveyId, SurveyStatus, Timestamp, UserId, UserRecord,
};
use crate::service::{AnswerSubmission, OptionDraft, QuestionDraft, SurveyDraft};

// =============================================================================
// Survey Requests
// =============================================================================

/// Request DTO for creating a survey.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateSurveyRequest {
    pub title: String,
    pub description: String,
    /// Author name; `"admin"` when absent.
    pub created_by: Option<String>,
    pub questions: Vec<QuestionRequest>,
}

impl CreateSurveyRequest {
    /// Splits the request into editable content and the author.
    #[must_use]
    pub fn into_parts(self) -> (SurveyDraft, Option<String>) {
        let draft = SurveyDraft {
            title: self.title,
            description: self.description,
            questions: self.questions.into_iter().map(QuestionDraft::from).collect(),
        };
        (draft, self.created_by)
    }
}

/// Request DTO for replacing a draft survey's content.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateSurveyRequest {
    pub title: String,
    pub description: String,
    pub questions: Vec<QuestionRequest>,
}

impl From<UpdateSurveyRequest> for SurveyDraft {
    fn from(request: UpdateSurveyRequest) -> Self {
        Self {
            title: request.title,
            description: request.description,
            questions: request
                .questions
                .into_iter()
                .map(QuestionDraft::from)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuestionRequest {
    pub text: String,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    pub options: Vec<OptionRequest>,
}

impl From<QuestionRequest> for QuestionDraft {
    fn from(request: QuestionRequest) -> Self {
        Self {
            text: request.text,
            kind: request.kind,
            options: request
                .options
                .into_iter()
                .map(|option| OptionDraft {
                    id: option.id,
                    text: option.text,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OptionRequest {
    /// Keeps an existing option id across edits.
    pub id: Option<OptionId>,
    pub text: String,
}

// =============================================================================
// Response Submission
// =============================================================================

/// Request DTO for submitting an anonymous response.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubmitResponseRequest {
    pub answers: Vec<AnswerRequest>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRequest {
    pub question_id: QuestionId,
    #[serde(default)]
    pub text_answer: Option<String>,
    #[serde(default)]
    pub selected_option_id: Option<OptionId>,
}

impl From<AnswerRequest> for AnswerSubmission {
    fn from(request: AnswerRequest) -> Self {
        Self {
            question_id: request.question_id,
            text_answer: request.text_answer,
            selected_option_id: request.selected_option_id,
        }
    }
}

// =============================================================================
// Survey Responses
// =============================================================================

/// Response DTO for survey listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveySummaryResponse {
    pub id: SurveyId,
    pub title: String,
    pub description: String,
    pub status: SurveyStatus,
    pub created_at_utc: Timestamp,
}

impl From<&Survey> for SurveySummaryResponse {
    fn from(survey: &Survey) -> Self {
        Self {
            id: survey.survey_id,
            title: survey.title.clone(),
            description: survey.description.clone(),
            status: survey.status,
            created_at_utc: survey.created_at,
        }
    }
}

/// Response DTO for a full survey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyDetailResponse {
    pub id: SurveyId,
    pub title: String,
    pub description: String,
    pub status: SurveyStatus,
    pub created_at_utc: Timestamp,
    pub created_by: String,
    pub questions: Vec<QuestionResponse>,
    pub response_count: usize,
}

impl From<&Survey> for SurveyDetailResponse {
    fn from(survey: &Survey) -> Self {
        Self {
            id: survey.survey_id,
            title: survey.title.clone(),
            description: survey.description.clone(),
            status: survey.status,
            created_at_utc: survey.created_at,
            created_by: survey.created_by.clone(),
            questions: survey.questions.iter().map(QuestionResponse::from).collect(),
            response_count: survey.response_count(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResponse {
    pub id: QuestionId,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    pub options: Vec<OptionResponse>,
}

impl From<&Question> for QuestionResponse {
    fn from(question: &Question) -> Self {
        Self {
            id: question.question_id,
            text: question.text.clone(),
            kind: question.kind,
            options: question.options.iter().map(OptionResponse::from).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionResponse {
    pub id: OptionId,
    pub text: String,
}

impl From<&OptionChoice> for OptionResponse {
    fn from(option: &OptionChoice) -> Self {
        Self {
            id: option.option_id,
            text: option.text.clone(),
        }
    }
}

// =============================================================================
// Analytics Responses
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyAnalyticsResponse {
    pub survey_id: SurveyId,
    pub title: String,
    pub total_responses: usize,
    pub questions: Vec<QuestionAnalyticsResponse>,
}

impl From<SurveyAnalytics> for SurveyAnalyticsResponse {
    fn from(analytics: SurveyAnalytics) -> Self {
        Self {
            survey_id: analytics.survey_id,
            title: analytics.title,
            total_responses: analytics.total_responses,
            questions: analytics
                .questions
                .into_iter()
                .map(QuestionAnalyticsResponse::from)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionAnalyticsResponse {
    pub question_id: QuestionId,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    pub response_count: usize,
    pub options: Vec<OptionAnalyticsResponse>,
}

impl From<QuestionAnalytics> for QuestionAnalyticsResponse {
    fn from(question: QuestionAnalytics) -> Self {
        Self {
            question_id: question.question_id,
            text: question.text,
            kind: question.kind,
            response_count: question.response_count,
            options: question
                .options
                .into_iter()
                .map(OptionAnalyticsResponse::from)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionAnalyticsResponse {
    pub option_id: OptionId,
    pub text: String,
    pub count: usize,
}

impl From<OptionAnalytics> for OptionAnalyticsResponse {
    fn from(option: OptionAnalytics) -> Self {
        Self {
            option_id: option.option_id,
            text: option.text,
            count: option.count,
        }
    }
}

// =============================================================================
// User DTOs
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub created_at_utc: Timestamp,
}

impl From<UserRecord> for UserResponse {
    fn from(user: UserRecord) -> Self {
        Self {
            id: user.user_id,
            name: user.name,
            email: user.email,
            created_at_utc: user.created_at,
        }
    }
}
