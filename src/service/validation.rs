//! Input drafts and the pure validation rules applied to them.
//!
//! Drafts are the transport-neutral shape of caller input. Validation runs
//! the checks in a fixed order and stops at the first failure, so callers
//! always see the same message for the same input.

use std::collections::HashSet;

use crate::domain::{
    Answer, OptionChoice, OptionId, Question, QuestionId, QuestionType, ResponseItem,
    ResponseItemId, Survey, SurveyId,
};
use crate::service::ServiceError;

// =============================================================================
// Drafts
// =============================================================================

/// A caller-supplied option. The id is kept when present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionDraft {
    pub id: Option<OptionId>,
    pub text: String,
}

impl OptionDraft {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: None,
            text: text.into(),
        }
    }

    #[must_use]
    pub const fn with_id(mut self, id: OptionId) -> Self {
        self.id = Some(id);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionDraft {
    pub text: String,
    pub kind: QuestionType,
    pub options: Vec<OptionDraft>,
}

impl QuestionDraft {
    #[must_use]
    pub fn new(text: impl Into<String>, kind: QuestionType) -> Self {
        Self {
            text: text.into(),
            kind,
            options: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: Vec<OptionDraft>) -> Self {
        self.options = options;
        self
    }
}

/// Editable survey content, as used by both create and update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SurveyDraft {
    pub title: String,
    pub description: String,
    pub questions: Vec<QuestionDraft>,
}

impl SurveyDraft {
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            questions: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_questions(mut self, questions: Vec<QuestionDraft>) -> Self {
        self.questions = questions;
        self
    }
}

/// One submitted answer before it is checked against the survey.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerSubmission {
    pub question_id: QuestionId,
    pub text_answer: Option<String>,
    pub selected_option_id: Option<OptionId>,
}

impl AnswerSubmission {
    #[must_use]
    pub const fn choice(question_id: QuestionId, option_id: OptionId) -> Self {
        Self {
            question_id,
            text_answer: None,
            selected_option_id: Some(option_id),
        }
    }

    #[must_use]
    pub fn text(question_id: QuestionId, text: impl Into<String>) -> Self {
        Self {
            question_id,
            text_answer: Some(text.into()),
            selected_option_id: None,
        }
    }
}

// =============================================================================
// Survey Content
// =============================================================================

/// Validated, trimmed survey content ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurveyContent {
    pub title: String,
    pub description: String,
    pub questions: Vec<Question>,
}

/// Checks editable survey content.
///
/// # Errors
///
/// Returns `ServiceError::BadInput` naming the first rule that failed.
pub fn validate_draft(draft: &SurveyDraft) -> Result<(), ServiceError> {
    if draft.title.trim().is_empty() {
        return Err(ServiceError::bad_input("Title is required"));
    }

    if draft.questions.is_empty() {
        return Err(ServiceError::bad_input("At least one question is required"));
    }

    draft.questions.iter().try_for_each(validate_question)
}

fn validate_question(question: &QuestionDraft) -> Result<(), ServiceError> {
    if question.text.trim().is_empty() {
        return Err(ServiceError::bad_input("Question text is required"));
    }

    if question.kind == QuestionType::Text {
        return Ok(());
    }

    if question.options.is_empty() {
        return Err(ServiceError::bad_input(
            "Single choice questions require options",
        ));
    }

    if question
        .options
        .iter()
        .any(|option| option.text.trim().is_empty())
    {
        return Err(ServiceError::bad_input("Option text cannot be empty"));
    }

    let mut seen = HashSet::with_capacity(question.options.len());
    if question
        .options
        .iter()
        .filter_map(|option| option.id)
        .any(|id| !seen.insert(id))
    {
        return Err(ServiceError::bad_input("Duplicate option id in question"));
    }

    Ok(())
}

/// Validates `draft` and turns it into stored content for `survey_id`.
///
/// Question ids are always fresh; option ids are kept when supplied.
///
/// # Errors
///
/// Returns `ServiceError::BadInput` if the draft fails validation.
pub fn build_content(
    survey_id: SurveyId,
    draft: SurveyDraft,
) -> Result<SurveyContent, ServiceError> {
    validate_draft(&draft)?;

    let questions = draft
        .questions
        .into_iter()
        .map(|question| build_question(survey_id, question))
        .collect();

    Ok(SurveyContent {
        title: draft.title.trim().to_string(),
        description: draft.description.trim().to_string(),
        questions,
    })
}

fn build_question(survey_id: SurveyId, draft: QuestionDraft) -> Question {
    let question_id = QuestionId::generate_v7();
    let options = draft
        .options
        .into_iter()
        .map(|option| {
            OptionChoice::new(
                option.id.unwrap_or_else(OptionId::generate_v7),
                question_id,
                option.text.trim(),
            )
        })
        .collect();

    Question::new(question_id, survey_id, draft.text.trim(), draft.kind).with_options(options)
}

// =============================================================================
// Answers
// =============================================================================

/// Checks submitted answers against `survey` and builds the stored items.
///
/// Each item keeps only the field matching its question's kind. Questions
/// left unanswered are fine; answering one twice is not.
///
/// # Errors
///
/// Returns `ServiceError::BadInput` naming the first answer rule that failed.
pub fn build_answers(
    survey: &Survey,
    answers: Vec<AnswerSubmission>,
) -> Result<Vec<ResponseItem>, ServiceError> {
    let mut answered = HashSet::with_capacity(answers.len());

    answers
        .into_iter()
        .map(|submission| {
            let question = survey
                .question(submission.question_id)
                .ok_or_else(|| ServiceError::bad_input("Question not found in survey"))?;

            if !answered.insert(question.question_id) {
                return Err(ServiceError::bad_input("Duplicate answer for question"));
            }

            let answer = answer_for(question, submission)?;
            Ok(ResponseItem::new(
                ResponseItemId::generate_v7(),
                question.question_id,
                answer,
            ))
        })
        .collect()
}

fn answer_for(question: &Question, submission: AnswerSubmission) -> Result<Answer, ServiceError> {
    match question.kind {
        QuestionType::SingleChoice => {
            let option_id = submission.selected_option_id.ok_or_else(|| {
                ServiceError::bad_input("SelectedOptionId is required for single choice questions")
            })?;
            if question.option(option_id).is_none() {
                return Err(ServiceError::bad_input(
                    "Selected option is invalid for the question",
                ));
            }
            Ok(Answer::Choice(option_id))
        }
        QuestionType::Text => submission
            .text_answer
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(|text| Answer::Text(text.to_string()))
            .ok_or_else(|| ServiceError::bad_input("TextAnswer is required for text questions")),
    }
}
