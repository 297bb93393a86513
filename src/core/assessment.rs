//! Career assessment questionnaire and the prompts built from its answers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

const FOLLOW_UP_PREAMBLE: &str =
    "Ask the user a follow-up question based on their response to the previous question:";
const CAREER_PREAMBLE: &str =
    "Based on the user's responses to the following questions, suggest some suitable careers:";

pub const SCALE_MIN: u8 = 1;
pub const SCALE_MAX: u8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    /// Free text answer.
    Open,
    /// A point on a 1-5 spectrum, optionally explained.
    Scale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    pub text: &'static str,
    pub kind: QuestionKind,
}

pub const QUESTIONS: &[Question] = &[
    Question {
        text: "What are your top 5 strengths, whether academic or interpersonal? Describe why those are your strengths.",
        kind: QuestionKind::Open,
    },
    Question {
        text: "What activities and pursuits genuinely excite and motivate you? Why?",
        kind: QuestionKind::Open,
    },
    Question {
        text: "Where do you lie on the following spectrum: Money = 1 , Work/Life Balance = 5. Why?",
        kind: QuestionKind::Scale,
    },
    Question {
        text: "Where do you lie on the following spectrum: Structure = 1 , Autonomy = 5. Why?",
        kind: QuestionKind::Scale,
    },
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssessmentError {
    #[error("question {0} does not exist")]
    UnknownQuestion(usize),

    #[error("question {0} has an empty response")]
    EmptyResponse(usize),

    #[error("question {0} expects a value between 1 and 5, got `{1}`")]
    ScaleOutOfRange(usize, String),

    #[error("no answers were given")]
    NoAnswers,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Answer {
    pub question: usize,
    pub response: String,
    #[serde(default)]
    pub explanation: Option<String>,
}

impl Answer {
    /// Looks up the question this answer belongs to and checks the response fits its kind.
    pub fn validate(&self) -> Result<&'static Question, AssessmentError> {
        let question = QUESTIONS
            .get(self.question)
            .ok_or(AssessmentError::UnknownQuestion(self.question))?;

        let response = self.response.trim();
        if response.is_empty() {
            return Err(AssessmentError::EmptyResponse(self.question));
        }

        if question.kind == QuestionKind::Scale {
            match response.parse::<u8>() {
                Ok(value) if (SCALE_MIN..=SCALE_MAX).contains(&value) => {}
                _ => {
                    return Err(AssessmentError::ScaleOutOfRange(
                        self.question,
                        response.to_owned(),
                    ));
                }
            }
        }

        Ok(question)
    }

    fn explanation(&self) -> Option<&str> {
        self.explanation
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
    }

    fn render(&self, question: &Question) -> String {
        let mut block = format!("Question: {}\nResponse: {}", question.text, self.response.trim());
        if let Some(explanation) = self.explanation() {
            block.push_str("\nExplanation: ");
            block.push_str(explanation);
        }
        block
    }
}

/// Prompt asking the model for a follow-up to a single answer.
pub fn follow_up_prompt(answer: &Answer) -> Result<String, AssessmentError> {
    let question = answer.validate()?;
    Ok(format!("{FOLLOW_UP_PREAMBLE}\n{}", answer.render(question)))
}

/// Prompt asking the model for careers that fit every answer.
///
/// Answers are ordered by question; when a question is answered twice the later answer wins.
pub fn career_prompt(answers: &[Answer]) -> Result<String, AssessmentError> {
    let mut by_question = BTreeMap::new();
    for answer in answers {
        let question = answer.validate()?;
        by_question.insert(answer.question, (question, answer));
    }

    if by_question.is_empty() {
        return Err(AssessmentError::NoAnswers);
    }

    let blocks: Vec<String> = by_question
        .values()
        .map(|(question, answer)| answer.render(question))
        .collect();

    Ok(format!("{CAREER_PREAMBLE}\n{}", blocks.join("\n")))
}
