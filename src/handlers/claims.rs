use axum::{extract::rejection::JsonRejection, extract::State, Json};

use crate::{
    config::AppState,
    handlers::citations::ensure_content_size,
    middleware::error_handling::Result,
    models::{AnalyzeContentRequest, AnalyzeContentResponse},
    services::{analyze_content, required_safety_types_for_claims},
};

/// POST /api/claims/analyze
pub async fn analyze_claims<S>(
    State(state): State<AppState<S>>,
    payload: std::result::Result<Json<AnalyzeContentRequest>, JsonRejection>,
) -> Result<Json<AnalyzeContentResponse>>
where
    S: Send + Sync + 'static,
{
    let Json(request) = payload?;
    ensure_content_size(&request.content, state.max_content_length)?;

    let analysis = analyze_content(&request.content);
    let required_safety_types = required_safety_types_for_claims(&analysis.detected_types)
        .into_iter()
        .collect();

    Ok(Json(AnalyzeContentResponse {
        analysis,
        required_safety_types,
    }))
}
