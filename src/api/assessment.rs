//! Assessment endpoints

use crate::api::model::PROMPT_FAILED;
use crate::api::{ApiError, MessageBody, method_not_allowed};
use crate::core::assessment::{self, AssessmentError, QUESTIONS};
use crate::core::traits::{ModelError, ModelLifecycle};
use axum::extract::rejection::JsonRejection;
use axum::routing::{get, post};
use axum::{Json, Router};
use di::Ref;
use di_axum::Inject;
use log::{error, warn};

pub const INVALID_RESPONSE: &str = "Invalid assessment response";

pub fn router() -> Router {
    Router::new()
        .route("/questions", get(list_questions))
        .route("/followUp", post(follow_up).fallback(method_not_allowed))
        .route("/suggestCareers", post(suggest_careers).fallback(method_not_allowed))
}

async fn list_questions() -> Json<schemas::QuestionList> {
    Json(schemas::QuestionList {
        questions: QUESTIONS
            .iter()
            .enumerate()
            .map(|(index, question)| schemas::Question {
                index,
                text: question.text,
                kind: question.kind,
            })
            .collect(),
    })
}

async fn follow_up(
    Inject(lifecycle): Inject<dyn ModelLifecycle>,
    payload: Result<Json<assessment::Answer>, JsonRejection>,
) -> Result<Json<MessageBody>, ApiError> {
    let Json(answer) = payload.map_err(invalid)?;
    let prompt = assessment::follow_up_prompt(&answer).map_err(invalid)?;

    ask(lifecycle, &prompt).await
}

async fn suggest_careers(
    Inject(lifecycle): Inject<dyn ModelLifecycle>,
    payload: Result<Json<schemas::Answers>, JsonRejection>,
) -> Result<Json<MessageBody>, ApiError> {
    let Json(schemas::Answers { answers }) = payload.map_err(invalid)?;
    let prompt = assessment::career_prompt(&answers).map_err(invalid)?;

    ask(lifecycle, &prompt).await
}

async fn ask(
    lifecycle: Ref<dyn ModelLifecycle>,
    prompt: &str,
) -> Result<Json<MessageBody>, ApiError> {
    lifecycle
        .ask(prompt)
        .await
        .map(MessageBody::new)
        .map_err(|e: ModelError| {
            error!("Error prompting the model: {e}");
            ApiError::Internal(PROMPT_FAILED)
        })
}

fn invalid<E: Into<InvalidInput>>(e: E) -> ApiError {
    let e: InvalidInput = e.into();
    warn!("Rejected assessment input: {e}");
    ApiError::BadRequest(INVALID_RESPONSE)
}

#[derive(Debug, thiserror::Error)]
enum InvalidInput {
    #[error(transparent)]
    Body(#[from] JsonRejection),

    #[error(transparent)]
    Answer(#[from] AssessmentError),
}

pub mod schemas {
    use crate::core::assessment::{Answer, QuestionKind};
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Debug)]
    pub struct Question {
        pub index: usize,
        pub text: &'static str,
        pub kind: QuestionKind,
    }

    #[derive(Serialize, Debug)]
    pub struct QuestionList {
        pub questions: Vec<Question>,
    }

    #[derive(Deserialize, Debug)]
    pub struct Answers {
        pub answers: Vec<Answer>,
    }
}
