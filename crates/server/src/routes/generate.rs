//! Cover generation endpoint

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use filler::FillRequest;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// Relative download link, `/api/files/<name>.pdf`
    pub url: String,
}

/// POST /api/gen
///
/// Fills the template with `meta` and `data`, stores the PDF and returns
/// where to fetch it. JSON rejections are reported as 400 with the usual
/// error body.
pub async fn handle_generate(
    State(state): State<AppState>,
    payload: Result<Json<FillRequest>, JsonRejection>,
) -> Result<Json<GenerateResponse>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::InvalidRequest(e.body_text()))?;
    let (meta, fields) = request.into_parts()?;

    // Template parsing and font loading are blocking work
    let filler = state.filler.clone();
    let bytes = tokio::task::spawn_blocking(move || filler.fill(&meta, &fields))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("fill task failed: {e}")))??;

    let name = state.store.store(bytes).await?;
    info!(file = %name, "generated cover");

    Ok(Json(GenerateResponse {
        url: format!("/api/files/{name}"),
    }))
}
