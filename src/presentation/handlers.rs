// HTTP request handlers
use crate::application::dataset_repository::DataStatus;
use crate::application::sections::Section;
use crate::domain::dataset::Dataset;
use crate::domain::error::DashboardError;
use crate::domain::page::Page;
use crate::presentation::app_state::AppState;
use crate::presentation::html::{render_error_page, render_page};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("unknown section '{0}'")]
    UnknownSection(String),
    #[error(transparent)]
    Dashboard(#[from] DashboardError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::UnknownSection(_) => StatusCode::NOT_FOUND,
            ApiError::Dashboard(e) if e.is_missing_data() => StatusCode::NOT_FOUND,
            ApiError::Dashboard(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

fn find_section(slug: &str) -> Result<Section, ApiError> {
    Section::from_slug(slug).ok_or_else(|| ApiError::UnknownSection(slug.to_string()))
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Landing page (Overview section)
pub async fn index(State(state): State<Arc<AppState>>) -> Response {
    section_html(&state, Section::Overview).await
}

/// Section page as HTML
pub async fn section_page(
    Path(slug): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Response {
    match find_section(&slug) {
        Ok(section) => section_html(&state, section).await,
        Err(e) => (
            StatusCode::NOT_FOUND,
            Html(render_error_page("Section not found", &e.to_string())),
        )
            .into_response(),
    }
}

async fn section_html(state: &AppState, section: Section) -> Response {
    match state.dashboard_service.render_section(section).await {
        Ok(page) => {
            if page.error_count() > 0 {
                tracing::warn!(
                    "Section {} rendered with {} broken block(s)",
                    section.slug(),
                    page.error_count()
                );
            }
            Html(render_page(&page, section)).into_response()
        }
        Err(e) => {
            tracing::error!("Error rendering section {}: {}", section.slug(), e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(render_error_page(section.heading(), &e.to_string())),
            )
                .into_response()
        }
    }
}

/// Rendered section as JSON
pub async fn section_json(
    Path(slug): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Page>, ApiError> {
    let section = find_section(&slug)?;
    Ok(Json(state.dashboard_service.render_section(section).await?))
}

/// Raw dataset for one topic
pub async fn dataset_json(
    Path(topic): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Dataset>, ApiError> {
    Ok(Json(state.dashboard_service.dataset(&topic).await?))
}

/// Source and freshness of every topic table
pub async fn data_status(State(state): State<Arc<AppState>>) -> Json<Vec<DataStatus>> {
    Json(state.dashboard_service.data_status().await)
}
