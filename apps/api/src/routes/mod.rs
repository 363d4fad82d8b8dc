pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    http::Uri,
    routing::{get, post, put},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::chat::handlers as chat;
use crate::dashboard::handlers as dashboard;
use crate::errors::AppError;
use crate::interview::handlers as interview;
use crate::state::AppState;

/// Headroom for multipart boundaries and headers on top of the file itself.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes + MULTIPART_OVERHEAD_BYTES;

    Router::new()
        .route("/health", get(health::health_handler))
        // Dashboard shell
        .route("/api/v1/dashboard", get(dashboard::handle_get_dashboard))
        .route("/api/v1/dashboard/section", put(dashboard::handle_set_section))
        // Resume analyzer wizard
        .route(
            "/api/v1/analyzer/upload",
            post(dashboard::handle_upload).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/api/v1/analyzer/job", post(dashboard::handle_submit_job))
        .route("/api/v1/analyzer/score", post(analysis::handle_score))
        .route("/api/v1/analyzer/reset", post(dashboard::handle_reset))
        // Mock interview
        .route("/api/v1/interview", get(interview::handle_get_session))
        .route(
            "/api/v1/interview/categories",
            get(interview::handle_list_categories),
        )
        .route(
            "/api/v1/interview/category",
            put(interview::handle_select_category),
        )
        .route(
            "/api/v1/interview/start",
            post(interview::handle_start_question),
        )
        .route(
            "/api/v1/interview/complete",
            post(interview::handle_complete_question),
        )
        .route("/api/v1/interview/answer", put(interview::handle_record_answer))
        .route(
            "/api/v1/interview/recording",
            post(interview::handle_toggle_recording),
        )
        .route("/api/v1/interview/reset", post(interview::handle_reset_session))
        // Career assistant chat
        .route("/api/v1/chat", get(chat::handle_get_chat))
        .route("/api/v1/chat/messages", post(chat::handle_send_message))
        .route("/api/v1/chat/reset", post(chat::handle_reset_chat))
        .fallback(not_found)
        .with_state(state)
}

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}
