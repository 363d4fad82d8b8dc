//! Axum route handlers for the mock interview drill.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::interview::models::Category;
use crate::interview::session::SessionView;
use crate::interview::timer::start_timed_question;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CategoryRequest {
    pub category: Category,
}

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub answer: String,
}

#[derive(Debug, Serialize)]
pub struct CategorySummary {
    pub id: Category,
    pub name: &'static str,
    pub question_count: usize,
}

/// GET /api/v1/interview
pub async fn handle_get_session(State(state): State<AppState>) -> Json<SessionView> {
    Json(state.interview.lock().await.view())
}

/// GET /api/v1/interview/categories
pub async fn handle_list_categories(State(state): State<AppState>) -> Json<Vec<CategorySummary>> {
    let summaries = Category::ALL
        .into_iter()
        .map(|category| CategorySummary {
            id: category,
            name: category.display_name(),
            question_count: state.catalog.interview.count_in(category),
        })
        .collect();
    Json(summaries)
}

/// PUT /api/v1/interview/category
pub async fn handle_select_category(
    State(state): State<AppState>,
    Json(req): Json<CategoryRequest>,
) -> Json<SessionView> {
    let mut session = state.interview.lock().await;
    session.select_category(req.category);
    Json(session.view())
}

/// POST /api/v1/interview/start
///
/// Draws a question from the selected category and starts the timer.
/// Rejected with 409 while the previous question is still being timed.
pub async fn handle_start_question(
    State(state): State<AppState>,
) -> Result<Json<SessionView>, AppError> {
    let view = start_timed_question(&state.interview, &state.rng).await?;
    Ok(Json(view))
}

/// POST /api/v1/interview/complete
pub async fn handle_complete_question(
    State(state): State<AppState>,
) -> Result<Json<SessionView>, AppError> {
    let mut session = state.interview.lock().await;
    session.complete_question()?;
    Ok(Json(session.view()))
}

/// PUT /api/v1/interview/answer
pub async fn handle_record_answer(
    State(state): State<AppState>,
    Json(req): Json<AnswerRequest>,
) -> Result<Json<SessionView>, AppError> {
    let mut session = state.interview.lock().await;
    session.record_answer(req.answer)?;
    Ok(Json(session.view()))
}

/// POST /api/v1/interview/recording
pub async fn handle_toggle_recording(State(state): State<AppState>) -> Json<SessionView> {
    let mut session = state.interview.lock().await;
    session.toggle_recording();
    Json(session.view())
}

/// POST /api/v1/interview/reset
pub async fn handle_reset_session(State(state): State<AppState>) -> Json<SessionView> {
    let mut session = state.interview.lock().await;
    session.reset();
    Json(session.view())
}
