use axum::Json;
use axum::extract::State;

use crate::error::AppError;
use crate::models::job::Job;
use crate::routes::AppState;

/// GET /jobs
///
/// Scrape every configured site for the default query term and return the
/// aggregated postings. Sites that fail are left out of the list; only a
/// failure of the aggregation itself produces an error response.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Job>>, AppError> {
    let jobs = state.source.collect_jobs(&state.query).await?;
    Ok(Json(jobs))
}
