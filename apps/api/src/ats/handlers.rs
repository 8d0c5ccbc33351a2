use axum::Json;
use serde::Deserialize;

use crate::ats::{run_ats_checks, AtsReport};
use crate::errors::AppError;

#[derive(Debug, Deserialize)]
pub struct AtsCheckRequest {
    #[serde(default)]
    pub resume_text: String,
}

/// POST /api/v1/ats/checks
pub async fn handle_ats_checks(
    Json(request): Json<AtsCheckRequest>,
) -> Result<Json<AtsReport>, AppError> {
    if request.resume_text.trim().is_empty() {
        return Err(AppError::Validation(
            "resume_text must not be empty".to_string(),
        ));
    }
    Ok(Json(run_ats_checks(&request.resume_text)))
}
