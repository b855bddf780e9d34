//! Record pages: list, create form, edit form
//!
//! Each handler checks out one connection and drops it before responding.
//! Successful writes redirect to the list (303) so a reload can't resubmit.

use std::sync::Arc;

use axum::{
    extract::{rejection::FormRejection, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Form, Router,
};
use chrono::Local;
use serde::Deserialize;

use crate::db::{DbError, RecordRepo};
use crate::http::error::ApiError;
use crate::http::extractors::RecordId;
use crate::http::server::AppState;
use crate::http::views::{self, FormPage, FormValues};
use crate::models::{ChartSeries, NewRecord, DATE_FORMAT};

/// Shown when a new entry reuses a registered date
pub const DUPLICATE_ON_CREATE: &str =
    "That date is already registered. Use the edit screen to change it.";

/// Shown when an edit moves an entry onto another entry's date
pub const DUPLICATE_ON_EDIT: &str = "That date is already registered.";

/// Submitted create/edit form. Every field is optional here so that a
/// missing field becomes a validation message instead of a rejection.
#[derive(Debug, Default, Deserialize)]
pub struct RecordForm {
    pub date: Option<String>,
    pub weight: Option<String>,
    pub memo: Option<String>,
}

impl RecordForm {
    fn parse(&self) -> Result<NewRecord, crate::models::ValidationError> {
        NewRecord::parse(
            self.date.as_deref(),
            self.weight.as_deref(),
            self.memo.as_deref(),
        )
    }

    /// Echo the submitted values back into the form.
    fn values(&self) -> FormValues {
        FormValues {
            date: self.date.clone().unwrap_or_default(),
            weight: self.weight.clone().unwrap_or_default(),
            memo: self.memo.clone().unwrap_or_default(),
        }
    }
}

/// GET / - chart and table of all records
async fn list_records(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let mut conn = state.db.acquire().await?;
    let records = RecordRepo::new(&mut conn).list_all().await?;
    drop(conn);

    let series = ChartSeries::from_records(&records);
    Ok(views::list_page(&records, &series)?.into_response())
}

/// GET /input - empty form, date defaults to today
async fn input_form() -> Response {
    let values = FormValues {
        date: Local::now().date_naive().format(DATE_FORMAT).to_string(),
        ..FormValues::default()
    };
    views::record_form(&FormPage::create(values)).into_response()
}

/// POST /input - create a record
async fn create_record(
    State(state): State<Arc<AppState>>,
    Form(form): Form<RecordForm>,
) -> Result<Response, ApiError> {
    let record = match form.parse() {
        Ok(record) => record,
        Err(e) => {
            tracing::debug!("rejected create form: {}", e);
            let page = FormPage::create(form.values()).with_error(e.to_string());
            return Ok((StatusCode::BAD_REQUEST, views::record_form(&page)).into_response());
        }
    };

    let mut conn = state.db.acquire().await?;
    match RecordRepo::new(&mut conn).insert(&record).await {
        Ok(created) => {
            tracing::info!(id = created.id, date = %created.date, "record created");
            Ok(Redirect::to("/").into_response())
        }
        Err(DbError::DuplicateDate { date }) => {
            tracing::warn!(%date, "create rejected: date already registered");
            let page = FormPage::create(form.values()).with_error(DUPLICATE_ON_CREATE);
            Ok(views::record_form(&page).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// GET /edit/{id} - form pre-filled from the stored record
async fn edit_form(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
) -> Result<Response, ApiError> {
    let mut conn = state.db.acquire().await?;
    let original = RecordRepo::new(&mut conn).get_by_id(id).await?;

    let page = FormPage::edit(&original, FormValues::from(&original));
    Ok(views::record_form(&page).into_response())
}

/// POST /edit/{id} - update a record
///
/// The body rejection is held until the record is loaded, so an unknown id
/// is a 404 whatever was submitted.
async fn update_record(
    State(state): State<Arc<AppState>>,
    RecordId(id): RecordId,
    form: Result<Form<RecordForm>, FormRejection>,
) -> Result<Response, ApiError> {
    let mut conn = state.db.acquire().await?;
    let mut repo = RecordRepo::new(&mut conn);

    // Unknown ids end here with 404, before any write.
    let original = repo.get_by_id(id).await?;

    let Form(form) = match form {
        Ok(form) => form,
        Err(rejection) => return Ok(rejection.into_response()),
    };

    let record = match form.parse() {
        Ok(record) => record,
        Err(e) => {
            tracing::debug!(id, "rejected edit form: {}", e);
            let page = FormPage::edit(&original, form.values()).with_error(e.to_string());
            return Ok((StatusCode::BAD_REQUEST, views::record_form(&page)).into_response());
        }
    };

    match repo.update(id, &record).await {
        Ok(updated) => {
            tracing::info!(id, date = %updated.date, "record updated");
            Ok(Redirect::to("/").into_response())
        }
        Err(DbError::DuplicateDate { date }) => {
            tracing::warn!(id, %date, "edit rejected: date already registered");
            let page = FormPage::edit(&original, form.values()).with_error(DUPLICATE_ON_EDIT);
            Ok(views::record_form(&page).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// Record page routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_records))
        .route("/input", get(input_form).post(create_record))
        .route("/edit/{id}", get(edit_form).post(update_record))
}
