//! Handlers for the `/reports` resource: week read, full-replace save,
//! saved-week status and document export.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use weekly_core::carry_over::{resolve_week, ResolvedWeek};
use weekly_core::document::{export_file_name, render_weekly_report, DOCX_CONTENT_TYPE};
use weekly_core::report::{ReportItem, ReportItemInput};
use weekly_core::save::{save_week, SaveOutcome};
use weekly_core::week::{is_week_start, monday_of, parse_week_start, WEEK_START_FORMAT};
use weekly_db::repositories::ReportRepo;

use crate::error::{AppError, AppResult};
use crate::query::WeekQuery;
use crate::state::AppState;

/// Body of `POST /reports`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveReportRequest {
    pub week_start: Option<String>,
    pub items: Option<Vec<ReportItemInput>>,
}

#[derive(Debug, Serialize)]
pub struct SaveReportResponse {
    pub success: bool,
    pub count: u64,
}

/// Body of `POST /reports/export`.
#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    pub date: Option<String>,
    #[serde(default)]
    pub items: Vec<ReportItemInput>,
}

fn requested_week(raw: Option<&str>) -> AppResult<NaiveDate> {
    let week_start = parse_week_start(raw.unwrap_or_default())?;
    if !is_week_start(week_start) {
        tracing::warn!(%week_start, "weekStart is not a Monday; carry-over uses it as given");
    }
    Ok(week_start)
}

/// GET /api/v1/reports?weekStart=YYYY-MM-DD
///
/// Saved rows for the week, or last week's rows carried over as a draft.
pub async fn get_week(
    State(state): State<AppState>,
    Query(params): Query<WeekQuery>,
) -> AppResult<Json<ResolvedWeek>> {
    let week_start = requested_week(params.week_start.as_deref())?;
    let resolved = resolve_week(&state.reports, week_start).await?;
    Ok(Json(resolved))
}

/// POST /api/v1/reports
///
/// Replace everything stored for `weekStart` with `items`.
pub async fn save(
    State(state): State<AppState>,
    payload: Result<Json<SaveReportRequest>, JsonRejection>,
) -> AppResult<Json<SaveReportResponse>> {
    let Json(body) = payload?;
    let week_start = parse_week_start(body.week_start.as_deref().unwrap_or_default())?;
    let items = body
        .items
        .ok_or_else(|| AppError::BadRequest("items must be an array".to_string()))?;

    match save_week(&state.reports, week_start, items).await {
        SaveOutcome::Applied { written, .. } => Ok(Json(SaveReportResponse {
            success: true,
            count: written,
        })),
        SaveOutcome::NotApplied { error, .. } => Err(AppError::Database(error)),
        SaveOutcome::PartiallyApplied {
            deleted,
            written,
            attempted,
            error,
        } => Err(AppError::PartialWrite(format!(
            "Week {week_start} was cleared ({deleted} rows removed) but only \
             {written} of {attempted} items were saved: {error}"
        ))),
    }
}

/// GET /api/v1/reports/status
///
/// Weeks that have saved rows, oldest first.
pub async fn status(State(state): State<AppState>) -> AppResult<Json<Vec<NaiveDate>>> {
    let weeks = ReportRepo::list_weeks(&state.pool).await?;
    Ok(Json(weeks))
}

/// GET /api/v1/reports/export?weekStart=YYYY-MM-DD
///
/// Render the resolved week (saved rows or carried-over draft).
pub async fn export_week(
    State(state): State<AppState>,
    Query(params): Query<WeekQuery>,
) -> AppResult<impl IntoResponse> {
    let week_start = requested_week(params.week_start.as_deref())?;
    let resolved = resolve_week(&state.reports, week_start).await?;
    docx_response(week_start, &resolved.items)
}

/// POST /api/v1/reports/export
///
/// Render items supplied by the editor, saved or not.
pub async fn export_items(
    payload: Result<Json<ExportRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(body) = payload?;
    let reference = match body.date.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => parse_reference_date(raw)?,
        _ => Utc::now().date_naive(),
    };

    let week_start = monday_of(reference);
    let now = Utc::now();
    let items: Vec<ReportItem> = body
        .items
        .into_iter()
        .map(|input| input.into_item(week_start, now))
        .collect();
    docx_response(reference, &items)
}

/// Accepts `YYYY-MM-DD` or a full ISO timestamp starting with one.
fn parse_reference_date(raw: &str) -> AppResult<NaiveDate> {
    let date_part = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(date_part, WEEK_START_FORMAT)
        .map_err(|_| AppError::BadRequest(format!("Invalid date '{raw}': expected YYYY-MM-DD")))
}

fn docx_response(reference: NaiveDate, items: &[ReportItem]) -> AppResult<impl IntoResponse> {
    let bytes = render_weekly_report(reference, items)?;
    tracing::debug!(%reference, items = items.len(), bytes = bytes.len(), "Rendered report");
    Ok((
        StatusCode::OK,
        [
            (CONTENT_TYPE, DOCX_CONTENT_TYPE.to_string()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", export_file_name(reference)),
            ),
        ],
        bytes,
    ))
}
