//! Axum route handlers for the dashboard shell and the analyzer wizard.

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::warn;

use crate::dashboard::controller::{spawn_analysis, DashboardView, Section};
use crate::dashboard::job_input::JobTargetRequest;
use crate::dashboard::upload::{check_upload, UploadError};
use crate::errors::AppError;
use crate::state::AppState;

/// Multipart field carrying the resume.
pub const RESUME_FIELD: &str = "resume";

#[derive(Debug, Deserialize)]
pub struct SectionRequest {
    pub section: Section,
}

/// GET /api/v1/dashboard
pub async fn handle_get_dashboard(State(state): State<AppState>) -> Json<DashboardView> {
    Json(state.dashboard.lock().await.view())
}

/// PUT /api/v1/dashboard/section
pub async fn handle_set_section(
    State(state): State<AppState>,
    Json(req): Json<SectionRequest>,
) -> Json<DashboardView> {
    let mut dashboard = state.dashboard.lock().await;
    dashboard.navigate(req.section);
    Json(dashboard.view())
}

/// POST /api/v1/analyzer/upload
///
/// Multipart with a `resume` file field. Only the declared MIME type and the
/// byte count are checked.
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<DashboardView>, AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(RESUME_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or("resume").to_string();
        let content_type = field.content_type().map(str::to_string);
        let size = field.bytes().await?.len();

        let resume = check_upload(
            &file_name,
            content_type.as_deref(),
            size,
            state.config.max_upload_bytes,
        )
        .inspect_err(|e| warn!(file = %file_name, "Resume upload rejected: {e}"))?;

        let mut dashboard = state.dashboard.lock().await;
        dashboard.accept_resume(resume)?;
        return Ok(Json(dashboard.view()));
    }
    Err(UploadError::MissingFile.into())
}

/// POST /api/v1/analyzer/job
///
/// Moves the wizard to step 3 and schedules the analysis; poll
/// `GET /api/v1/dashboard` for the result.
pub async fn handle_submit_job(
    State(state): State<AppState>,
    Json(req): Json<JobTargetRequest>,
) -> Result<(StatusCode, Json<DashboardView>), AppError> {
    let target = req.into_target()?;

    let mut dashboard = state.dashboard.lock().await;
    let generation = dashboard.begin_analysis(target.clone())?;
    spawn_analysis(
        state.dashboard.clone(),
        state.catalog.clone(),
        state.rng.clone(),
        generation,
        target,
        state.config.analysis_delay,
    );

    Ok((StatusCode::ACCEPTED, Json(dashboard.view())))
}

/// POST /api/v1/analyzer/reset
pub async fn handle_reset(State(state): State<AppState>) -> Json<DashboardView> {
    let mut dashboard = state.dashboard.lock().await;
    dashboard.reset();
    Json(dashboard.view())
}
