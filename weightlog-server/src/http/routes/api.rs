//! JSON record listing for the chart and scripts

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::db::RecordRepo;
use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::models::{ChartSeries, DailyRecord};

/// Records response
#[derive(Serialize)]
pub struct RecordsResponse {
    pub records: Vec<DailyRecord>,
    pub chart: ChartSeries,
}

/// GET /api/records - all records, ascending by date
async fn list_records(State(state): State<Arc<AppState>>) -> Result<Json<RecordsResponse>, ApiError> {
    let mut conn = state.db.acquire().await?;
    let records = RecordRepo::new(&mut conn).list_all().await?;
    let chart = ChartSeries::from_records(&records);

    Ok(Json(RecordsResponse { records, chart }))
}

/// API routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/records", get(list_records))
}
