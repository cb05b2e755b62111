use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};

use crate::errors::AppError;
use crate::state::AppState;

/// GET /api/files/:filename
///
/// Serves a generated PDF. The CORS headers are set explicitly so the link
/// also works when the file is opened outside the API's CORS layer.
pub async fn handle_get_file(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response, AppError> {
    let bytes = state.store.retrieve(&filename).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf"),
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
            (
                header::ACCESS_CONTROL_ALLOW_METHODS,
                "GET, POST, PUT, DELETE, OPTIONS",
            ),
            (
                header::ACCESS_CONTROL_ALLOW_HEADERS,
                "Content-Type, Authorization",
            ),
        ],
        bytes,
    )
        .into_response())
}
