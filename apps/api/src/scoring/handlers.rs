//! Axum route handlers for the Match API.

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::scoring::models::MatchScore;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MatchScoreRequest {
    #[serde(default)]
    pub job_description: String,
    #[serde(default)]
    pub resume_text: String,
    /// Overrides the configured keyword weight for this request.
    pub alpha: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct MatchScoreResponse {
    pub score: MatchScore,
    pub overall_match: u32,
    pub summary: String,
    pub scored_at: DateTime<Utc>,
}

/// POST /api/v1/match/score
///
/// Scores a résumé against a job description. Empty texts are valid input and
/// produce documented zero scores rather than an error.
pub async fn handle_match_score(
    State(state): State<AppState>,
    Json(request): Json<MatchScoreRequest>,
) -> Result<Json<MatchScoreResponse>, AppError> {
    let alpha = request.alpha.unwrap_or(state.config.match_alpha);

    let score = state
        .scorer
        .score(&request.job_description, &request.resume_text, alpha)
        .await?;

    Ok(Json(MatchScoreResponse {
        overall_match: score.overall_match(),
        summary: score.to_string(),
        score,
        scored_at: Utc::now(),
    }))
}
