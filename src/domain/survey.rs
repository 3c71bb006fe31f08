//! Survey aggregate.
//!
//! A [`Survey`] exclusively owns its questions, their options and every
//! response submitted to it. All types are plain owned values: cloning a
//! survey yields a fully independent deep copy, which is what the
//! repository relies on to keep stored state unaliased.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::identifier::{OptionId, QuestionId, ResponseId, ResponseItemId, SurveyId, Timestamp};

// =============================================================================
// Lifecycle
// =============================================================================

/// Lifecycle status of a survey.
///
/// The only legal edges are `Draft -> Published` and `Published -> Closed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SurveyStatus {
    /// Editable, not yet collecting responses.
    #[default]
    Draft,
    /// Frozen and collecting responses.
    Published,
    /// Frozen, no longer collecting responses.
    Closed,
}

impl SurveyStatus {
    /// Transition for the publish action.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::PublishRequiresDraft`] unless the status is `Draft`.
    pub const fn publish(self) -> Result<Self, LifecycleError> {
        match self {
            Self::Draft => Ok(Self::Published),
            current => Err(LifecycleError::PublishRequiresDraft { current }),
        }
    }

    /// Transition for the close action.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::CloseRequiresPublished`] unless the status is `Published`.
    pub const fn close(self) -> Result<Self, LifecycleError> {
        match self {
            Self::Published => Ok(Self::Closed),
            current => Err(LifecycleError::CloseRequiresPublished { current }),
        }
    }

    /// Returns `true` while questions may still be edited.
    #[must_use]
    pub const fn is_editable(self) -> bool {
        matches!(self, Self::Draft)
    }

    /// Returns `true` while responses are accepted.
    #[must_use]
    pub const fn accepts_responses(self) -> bool {
        matches!(self, Self::Published)
    }
}

impl std::fmt::Display for SurveyStatus {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Draft => write!(formatter, "Draft"),
            Self::Published => write!(formatter, "Published"),
            Self::Closed => write!(formatter, "Closed"),
        }
    }
}

/// A lifecycle precondition that did not hold.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleError {
    #[error("Only draft surveys can be published")]
    PublishRequiresDraft { current: SurveyStatus },

    #[error("Only published surveys can be closed")]
    CloseRequiresPublished { current: SurveyStatus },

    #[error("Only draft surveys can be updated")]
    UpdateRequiresDraft { current: SurveyStatus },

    #[error("Responses are only accepted for published surveys")]
    ResponsesRequirePublished { current: SurveyStatus },
}

impl LifecycleError {
    /// The status the survey was in when the action was attempted.
    #[must_use]
    pub const fn current(&self) -> SurveyStatus {
        match self {
            Self::PublishRequiresDraft { current }
            | Self::CloseRequiresPublished { current }
            | Self::UpdateRequiresDraft { current }
            | Self::ResponsesRequirePublished { current } => *current,
        }
    }
}

// =============================================================================
// Questions
// =============================================================================

/// The two supported question kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum QuestionType {
    /// Pick exactly one of the question's options.
    #[default]
    SingleChoice,
    /// Free-text answer.
    Text,
}

impl std::fmt::Display for QuestionType {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SingleChoice => write!(formatter, "SingleChoice"),
            Self::Text => write!(formatter, "Text"),
        }
    }
}

/// One selectable option of a single-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionChoice {
    pub option_id: OptionId,
    pub question_id: QuestionId,
    pub text: String,
}

impl OptionChoice {
    #[must_use]
    pub fn new(option_id: OptionId, question_id: QuestionId, text: impl Into<String>) -> Self {
        Self {
            option_id,
            question_id,
            text: text.into(),
        }
    }
}

/// A question owned by a survey.
///
/// Options are only ever kept for [`QuestionType::SingleChoice`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub question_id: QuestionId,
    pub survey_id: SurveyId,
    pub text: String,
    pub kind: QuestionType,
    pub options: Vec<OptionChoice>,
}

impl Question {
    /// Creates a question with no options.
    #[must_use]
    pub fn new(
        question_id: QuestionId,
        survey_id: SurveyId,
        text: impl Into<String>,
        kind: QuestionType,
    ) -> Self {
        Self {
            question_id,
            survey_id,
            text: text.into(),
            kind,
            options: Vec::new(),
        }
    }

    /// Returns the question with the given options attached, in order.
    ///
    /// Each option is re-parented onto this question. Text questions drop
    /// the options entirely.
    #[must_use]
    pub fn with_options(self, options: Vec<OptionChoice>) -> Self {
        let options = match self.kind {
            QuestionType::SingleChoice => options
                .into_iter()
                .map(|option| OptionChoice {
                    question_id: self.question_id,
                    ..option
                })
                .collect(),
            QuestionType::Text => Vec::new(),
        };

        Self { options, ..self }
    }

    /// Looks up one of this question's options.
    #[must_use]
    pub fn option(&self, option_id: OptionId) -> Option<&OptionChoice> {
        self.options
            .iter()
            .find(|option| option.option_id == option_id)
    }
}

// =============================================================================
// Responses
// =============================================================================

/// The value of a single answer. Exactly one form is present per item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Answer {
    /// The selected option of a single-choice question.
    Choice(OptionId),
    /// A non-blank free-text answer.
    Text(String),
}

/// One answered question within a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseItem {
    pub response_item_id: ResponseItemId,
    pub question_id: QuestionId,
    pub answer: Answer,
}

impl ResponseItem {
    #[must_use]
    pub const fn new(
        response_item_id: ResponseItemId,
        question_id: QuestionId,
        answer: Answer,
    ) -> Self {
        Self {
            response_item_id,
            question_id,
            answer,
        }
    }

    #[must_use]
    pub const fn selected_option_id(&self) -> Option<OptionId> {
        match &self.answer {
            Answer::Choice(option_id) => Some(*option_id),
            Answer::Text(_) => None,
        }
    }

    #[must_use]
    pub fn text_answer(&self) -> Option<&str> {
        match &self.answer {
            Answer::Text(text) => Some(text),
            Answer::Choice(_) => None,
        }
    }
}

/// One respondent's submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyResponse {
    pub response_id: ResponseId,
    pub survey_id: SurveyId,
    pub submitted_at: Timestamp,
    pub answers: Vec<ResponseItem>,
}

impl SurveyResponse {
    #[must_use]
    pub const fn new(
        response_id: ResponseId,
        survey_id: SurveyId,
        submitted_at: Timestamp,
        answers: Vec<ResponseItem>,
    ) -> Self {
        Self {
            response_id,
            survey_id,
            submitted_at,
            answers,
        }
    }

    /// Returns `true` if this response contains an answer to `question_id`.
    #[must_use]
    pub fn answers_question(&self, question_id: QuestionId) -> bool {
        self.answers
            .iter()
            .any(|item| item.question_id == question_id)
    }
}

// =============================================================================
// Survey
// =============================================================================

/// The survey aggregate root.
///
/// Builder-style methods consume `self` and return the updated survey;
/// lifecycle methods additionally check the transition precondition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Survey {
    pub survey_id: SurveyId,
    pub title: String,
    pub description: String,
    pub created_by: String,
    pub status: SurveyStatus,
    pub created_at: Timestamp,
    pub questions: Vec<Question>,
    pub responses: Vec<SurveyResponse>,
}

impl Survey {
    /// Creates an empty survey in [`SurveyStatus::Draft`].
    #[must_use]
    pub fn new(
        survey_id: SurveyId,
        title: impl Into<String>,
        description: impl Into<String>,
        created_by: impl Into<String>,
        created_at: Timestamp,
    ) -> Self {
        Self {
            survey_id,
            title: title.into(),
            description: description.into(),
            created_by: created_by.into(),
            status: SurveyStatus::Draft,
            created_at,
            questions: Vec::new(),
            responses: Vec::new(),
        }
    }

    /// Returns the survey with its questions replaced, in order.
    #[must_use]
    pub fn with_questions(self, questions: Vec<Question>) -> Self {
        let questions = questions
            .into_iter()
            .map(|question| Question {
                survey_id: self.survey_id,
                ..question
            })
            .collect();

        Self { questions, ..self }
    }

    /// Replaces the editable content of a draft survey.
    ///
    /// Title, description and the full question list are swapped out;
    /// identity, author, status, creation time and responses are kept.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::UpdateRequiresDraft`] if the survey is not a draft.
    pub fn revise(
        self,
        title: impl Into<String>,
        description: impl Into<String>,
        questions: Vec<Question>,
    ) -> Result<Self, LifecycleError> {
        self.ensure_editable()?;

        Ok(Self {
            title: title.into(),
            description: description.into(),
            ..self
        }
        .with_questions(questions))
    }

    /// Moves the survey from `Draft` to `Published`.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::PublishRequiresDraft`] from any other status.
    pub fn publish(self) -> Result<Self, LifecycleError> {
        let status = self.status.publish()?;
        Ok(Self { status, ..self })
    }

    /// Moves the survey from `Published` to `Closed`.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::CloseRequiresPublished`] from any other status.
    pub fn close(self) -> Result<Self, LifecycleError> {
        let status = self.status.close()?;
        Ok(Self { status, ..self })
    }

    /// # Errors
    ///
    /// Returns [`LifecycleError::UpdateRequiresDraft`] if the survey is not a draft.
    pub const fn ensure_editable(&self) -> Result<(), LifecycleError> {
        if self.status.is_editable() {
            Ok(())
        } else {
            Err(LifecycleError::UpdateRequiresDraft {
                current: self.status,
            })
        }
    }

    /// # Errors
    ///
    /// Returns [`LifecycleError::ResponsesRequirePublished`] unless the survey is published.
    pub const fn ensure_accepting_responses(&self) -> Result<(), LifecycleError> {
        if self.status.accepts_responses() {
            Ok(())
        } else {
            Err(LifecycleError::ResponsesRequirePublished {
                current: self.status,
            })
        }
    }

    /// Looks up one of this survey's questions.
    #[must_use]
    pub fn question(&self, question_id: QuestionId) -> Option<&Question> {
        self.questions
            .iter()
            .find(|question| question.question_id == question_id)
    }

    #[must_use]
    pub const fn response_count(&self) -> usize {
        self.responses.len()
    }
}

// =============================================================================
// Tests
// =============================================================================
