use axum::{extract::rejection::JsonRejection, extract::State, Json};
use validator::Validate;

use crate::{
    config::AppState,
    middleware::error_handling::{AppError, Result},
    models::{
        CitationValidation, ProcessContentRequest, ProcessContentResponse,
        ValidateCitationsRequest,
    },
    repositories::ClaimStore,
    services::{format_reference_list, CitationProcessor, CitationValidator},
};

pub(crate) fn ensure_content_size(content: &str, max_content_length: usize) -> Result<()> {
    if content.len() > max_content_length {
        return Err(AppError::PayloadTooLarge(format!(
            "Content exceeds {} bytes",
            max_content_length
        )));
    }
    Ok(())
}

/// POST /api/citations/process
pub async fn process_citations<S>(
    State(state): State<AppState<S>>,
    payload: std::result::Result<Json<ProcessContentRequest>, JsonRejection>,
) -> Result<Json<ProcessContentResponse>>
where
    S: ClaimStore + 'static,
{
    let Json(request) = payload?;
    request.validate()?;
    ensure_content_size(&request.content, state.max_content_length)?;

    let processed = CitationProcessor::new(state.store.as_ref())
        .with_annotation_style(state.annotation_style)
        .process_content(request.brand_id, &request.content)
        .await;

    let reference_list = format_reference_list(&processed.references_used);

    Ok(Json(ProcessContentResponse {
        processed,
        reference_list,
    }))
}

/// POST /api/citations/validate
pub async fn validate_citations<S>(
    State(state): State<AppState<S>>,
    payload: std::result::Result<Json<ValidateCitationsRequest>, JsonRejection>,
) -> Result<Json<CitationValidation>>
where
    S: ClaimStore + 'static,
{
    let Json(request) = payload?;
    request.validate()?;

    let report = CitationValidator::new(state.store.as_ref())
        .validate_citations(&request.claims_used, &request.asset_type, &request.audience)
        .await?;

    Ok(Json(report))
}
