use axum::{extract::rejection::JsonRejection, extract::State, Json};
use validator::Validate;

use crate::{
    config::AppState,
    handlers::citations::ensure_content_size,
    middleware::error_handling::Result,
    models::{PresenceCheck, PresenceCheckRequest, SafetyPanelReport, SafetyPanelRequest},
    repositories::SafetyStatementStore,
    services::{check_presence, SafetyPanelService},
};

/// POST /api/safety/presence
pub async fn check_statement_presence<S>(
    State(state): State<AppState<S>>,
    payload: std::result::Result<Json<PresenceCheckRequest>, JsonRejection>,
) -> Result<Json<PresenceCheck>>
where
    S: Send + Sync + 'static,
{
    let Json(request) = payload?;
    request.validate()?;
    ensure_content_size(&request.content, state.max_content_length)?;

    Ok(Json(check_presence(&request.statement_text, &request.content)))
}

/// POST /api/safety/panel
pub async fn safety_panel<S>(
    State(state): State<AppState<S>>,
    payload: std::result::Result<Json<SafetyPanelRequest>, JsonRejection>,
) -> Result<Json<SafetyPanelReport>>
where
    S: SafetyStatementStore + 'static,
{
    let Json(request) = payload?;
    ensure_content_size(&request.content, state.max_content_length)?;

    let report = SafetyPanelService::new(state.store.as_ref())
        .build_panel(
            request.brand_id,
            &request.content,
            request.statement_types.as_deref(),
            request.filter,
        )
        .await?;

    Ok(Json(report))
}
