//! Response analytics.
//!
//! Analytics are a pure function of a survey and its stored responses and
//! are recomputed from scratch on every call; nothing is cached.

use serde::Serialize;

use super::identifier::{OptionId, QuestionId, SurveyId};
use super::survey::{Question, QuestionType, Survey, SurveyResponse};

/// Selection count for one option of a single-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionAnalytics {
    pub option_id: OptionId,
    pub text: String,
    pub count: usize,
}

/// Aggregated counts for one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionAnalytics {
    pub question_id: QuestionId,
    pub text: String,
    pub kind: QuestionType,
    /// Number of responses that answered this question at least once.
    pub response_count: usize,
    /// Per-option counts; always empty for text questions.
    pub options: Vec<OptionAnalytics>,
}

/// Aggregated counts for a whole survey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SurveyAnalytics {
    pub survey_id: SurveyId,
    pub title: String,
    pub total_responses: usize,
    pub questions: Vec<QuestionAnalytics>,
}

impl SurveyAnalytics {
    /// Computes analytics for `survey`, preserving question and option order.
    #[must_use]
    pub fn compute(survey: &Survey) -> Self {
        Self {
            survey_id: survey.survey_id,
            title: survey.title.clone(),
            total_responses: survey.responses.len(),
            questions: survey
                .questions
                .iter()
                .map(|question| QuestionAnalytics::compute(question, &survey.responses))
                .collect(),
        }
    }

    /// Looks up the analytics of one question.
    #[must_use]
    pub fn question(&self, question_id: QuestionId) -> Option<&QuestionAnalytics> {
        self.questions
            .iter()
            .find(|question| question.question_id == question_id)
    }
}

impl QuestionAnalytics {
    fn compute(question: &Question, responses: &[SurveyResponse]) -> Self {
        let response_count = responses
            .iter()
            .filter(|response| response.answers_question(question.question_id))
            .count();

        let options = match question.kind {
            QuestionType::SingleChoice => question
                .options
                .iter()
                .map(|option| OptionAnalytics {
                    option_id: option.option_id,
                    text: option.text.clone(),
                    count: count_selections(question.question_id, option.option_id, responses),
                })
                .collect(),
            QuestionType::Text => Vec::new(),
        };

        Self {
            question_id: question.question_id,
            text: question.text.clone(),
            kind: question.kind,
            response_count,
            options,
        }
    }

    /// Sum of all option counts.
    #[must_use]
    pub fn total_selections(&self) -> usize {
        self.options.iter().map(|option| option.count).sum()
    }

    #[must_use]
    pub fn option(&self, option_id: OptionId) -> Option<&OptionAnalytics> {
        self.options
            .iter()
            .find(|option| option.option_id == option_id)
    }
}

fn count_selections(
    question_id: QuestionId,
    option_id: OptionId,
    responses: &[SurveyResponse],
) -> usize {
    responses
        .iter()
        .flat_map(|response| response.answers.iter())
        .filter(|item| {
            item.question_id == question_id && item.selected_option_id() == Some(option_id)
        })
        .count()
}
