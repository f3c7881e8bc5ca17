//! HTTP request handlers.

use super::views::{DashboardPage, ModerationPage};
use super::AppState;
use crate::model::{
    ConsoleError, ContentCategory, FilterConfig, LatencyRange, RiskConfigDraft, Severity,
    SortOption, TimeRange,
};
use crate::moderation::{spawn_processing, FileRef, Handle, LatencyChannel, TrackRect};

use askama::Template;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Redirect, Response},
};
use serde::Deserialize;
use serde_json::json;

// ============================================================================
// Errors
// ============================================================================

impl IntoResponse for ConsoleError {
    fn into_response(self) -> Response {
        let status = match &self {
            ConsoleError::UnsupportedFileType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ConsoleError::ValidationFailed { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ConsoleError::NotFound(_) | ConsoleError::UnknownChannel(_) => StatusCode::NOT_FOUND,
            ConsoleError::UploadProcessingFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::debug!("Request rejected: {}", self);
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

fn render<T: Template>(template: &T) -> Response {
    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("Template rendering failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Template error").into_response()
        }
    }
}

// ============================================================================
// Pages
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    /// `new` to add a configuration, or the id of one to edit.
    #[serde(default)]
    pub editor: Option<String>,
}

/// An editor link for a record that no longer exists (or is auto-extracted)
/// falls back to the plain page.
pub async fn handle_moderation_page(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Response {
    let moderation = state.moderation.read().await;
    let target = match query.editor.as_deref() {
        None => return render(&ModerationPage::new(&moderation, None)),
        Some("new") => None,
        Some(id) => Some(id),
    };

    match moderation.editor(target) {
        Ok(editor) => render(&ModerationPage::new(&moderation, Some(&editor))),
        Err(e) => {
            tracing::debug!("Editor unavailable: {}", e);
            Redirect::to("/").into_response()
        }
    }
}

pub async fn handle_dashboard_page(State(state): State<AppState>) -> Response {
    let dashboard = state.dashboard.read().await;
    render(&DashboardPage::new(&dashboard))
}

// ============================================================================
// API: Configurator
// ============================================================================

pub async fn handle_get_moderation(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.moderation.read().await.snapshot())
}

pub async fn handle_upload(
    State(state): State<AppState>,
    Json(file): Json<FileRef>,
) -> Result<impl IntoResponse, ConsoleError> {
    let (generation, details) = state
        .moderation
        .write()
        .await
        .begin_upload(&file, state.config.max_upload_bytes)?;

    spawn_processing(
        state.moderation.clone(),
        state.processor.clone(),
        generation,
        file,
    );

    Ok((StatusCode::ACCEPTED, Json(details)))
}

pub async fn handle_create_config(
    State(state): State<AppState>,
    Json(draft): Json<RiskConfigDraft>,
) -> Result<impl IntoResponse, ConsoleError> {
    let config = state.moderation.write().await.submit(None, draft)?;
    Ok((StatusCode::CREATED, Json(config)))
}

pub async fn handle_update_config(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(draft): Json<RiskConfigDraft>,
) -> Result<impl IntoResponse, ConsoleError> {
    let config = state.moderation.write().await.submit(Some(&id), draft)?;
    Ok(Json(config))
}

pub async fn handle_delete_config(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    state.moderation.write().await.delete_config(&id);
    StatusCode::NO_CONTENT
}

pub async fn handle_set_latency(
    State(state): State<AppState>,
    Path(channel): Path<String>,
    Json(range): Json<LatencyRange>,
) -> Result<impl IntoResponse, ConsoleError> {
    let channel: LatencyChannel = channel.parse()?;
    let mut moderation = state.moderation.write().await;
    let range = moderation
        .slider_mut(channel)
        .set_range(range.min, range.max)?;
    Ok(Json(range))
}

#[derive(Debug, Deserialize)]
pub struct PressRequest {
    pub handle: Handle,
    pub track: TrackRect,
}

pub async fn handle_slider_press(
    State(state): State<AppState>,
    Path(channel): Path<String>,
    Json(req): Json<PressRequest>,
) -> Result<impl IntoResponse, ConsoleError> {
    let channel: LatencyChannel = channel.parse()?;
    state
        .moderation
        .write()
        .await
        .slider_mut(channel)
        .press(req.handle, req.track);
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct MoveRequest {
    pub client_x: f64,
}

pub async fn handle_slider_move(
    State(state): State<AppState>,
    Path(channel): Path<String>,
    Json(req): Json<MoveRequest>,
) -> Result<Response, ConsoleError> {
    let channel: LatencyChannel = channel.parse()?;
    let moved = state
        .moderation
        .write()
        .await
        .slider_mut(channel)
        .move_to(req.client_x);

    Ok(match moved {
        Some(range) => Json(range).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    })
}

pub async fn handle_slider_release(
    State(state): State<AppState>,
    Path(channel): Path<String>,
) -> Result<impl IntoResponse, ConsoleError> {
    let channel: LatencyChannel = channel.parse()?;
    state.moderation.write().await.slider_mut(channel).release();
    Ok(StatusCode::NO_CONTENT)
}

pub async fn handle_reset_moderation(State(state): State<AppState>) -> impl IntoResponse {
    let mut moderation = state.moderation.write().await;
    moderation.reset();
    Json(moderation.snapshot())
}

pub async fn handle_apply_moderation(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.moderation.read().await.apply())
}

// ============================================================================
// API: Dashboard
// ============================================================================

pub async fn handle_get_queries(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.dashboard.read().await.view())
}

pub async fn handle_get_filters(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.dashboard.read().await.filters().clone())
}

pub async fn handle_set_filters(
    State(state): State<AppState>,
    Json(filters): Json<FilterConfig>,
) -> impl IntoResponse {
    let mut dashboard = state.dashboard.write().await;
    dashboard.set_filters(filters);
    Json(dashboard.filters().clone())
}

#[derive(Debug, Deserialize)]
pub struct TimeRangeRequest {
    pub time_range: TimeRange,
}

pub async fn handle_set_time_range(
    State(state): State<AppState>,
    Json(req): Json<TimeRangeRequest>,
) -> impl IntoResponse {
    let mut dashboard = state.dashboard.write().await;
    dashboard.set_time_range(req.time_range);
    Json(dashboard.filters().clone())
}

#[derive(Debug, Deserialize)]
pub struct SortRequest {
    pub sort_by: SortOption,
}

pub async fn handle_set_sort(
    State(state): State<AppState>,
    Json(req): Json<SortRequest>,
) -> impl IntoResponse {
    let mut dashboard = state.dashboard.write().await;
    dashboard.set_sort(req.sort_by);
    Json(dashboard.filters().clone())
}

#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    #[serde(default)]
    pub severity: Option<Severity>,
    #[serde(default)]
    pub category: Option<ContentCategory>,
}

pub async fn handle_toggle_filter(
    State(state): State<AppState>,
    Json(req): Json<ToggleRequest>,
) -> Result<impl IntoResponse, ConsoleError> {
    if req.severity.is_none() && req.category.is_none() {
        return Err(ConsoleError::invalid("toggle"));
    }

    let mut dashboard = state.dashboard.write().await;
    if let Some(severity) = req.severity {
        dashboard.toggle_severity(severity);
    }
    if let Some(category) = req.category {
        dashboard.toggle_category(category);
    }
    Ok(Json(dashboard.filters().clone()))
}

pub async fn handle_reset_filters(State(state): State<AppState>) -> impl IntoResponse {
    let mut dashboard = state.dashboard.write().await;
    dashboard.reset_filters();
    Json(dashboard.filters().clone())
}

pub async fn handle_get_saved(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.dashboard.read().await.saved_filters())
}

#[derive(Debug, Deserialize)]
pub struct SaveFilterRequest {
    pub name: String,
}

pub async fn handle_save_filter(
    State(state): State<AppState>,
    Json(req): Json<SaveFilterRequest>,
) -> Result<impl IntoResponse, ConsoleError> {
    let saved = state.dashboard.write().await.save_filter(&req.name)?;
    Ok((StatusCode::CREATED, Json(saved)))
}

pub async fn handle_load_filter(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ConsoleError> {
    let mut dashboard = state.dashboard.write().await;
    let filters = dashboard.load_filter(&id)?.clone();
    Ok(Json(filters))
}
