use axum::{extract::State, Json};
use models::AssistMode;
use serde::{Deserialize, Serialize};

use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AssistInput {
    pub text: String,
    pub mode: AssistMode,
}

#[derive(Debug, Serialize)]
pub struct AssistOutput {
    pub text: String,
}

/// Proofread or expand a draft. Falls back to the submitted text on any failure.
pub async fn revise(State(state): State<AppState>, Json(input): Json<AssistInput>) -> Json<AssistOutput> {
    let text = state.assist.revise(&input.text, input.mode).await;
    Json(AssistOutput { text })
}
