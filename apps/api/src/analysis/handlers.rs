//! Axum route handlers for the standalone scoring preview.

use axum::{extract::State, Json};

use crate::analysis::engine::{AnalysisResult, JobTarget, ResumeScoringEngine};
use crate::state::AppState;

/// POST /api/v1/analyzer/score
///
/// Runs the scoring engine immediately on `(description, company, role)`
/// without touching the wizard. Empty descriptions are valid input.
pub async fn handle_score(
    State(state): State<AppState>,
    Json(target): Json<JobTarget>,
) -> Json<AnalysisResult> {
    let mut rng = state.rng.lock().await;
    let result = ResumeScoringEngine::new(&state.catalog.scoring).analyze(&target, &mut *rng);
    Json(result)
}
