use axum::{
    debug_handler,
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::{json, Value};

use crate::{
    filter::{FilterParams, Selection},
    session::BoardSession,
    AppResult, AppState, SharedJobs,
};

use super::{Job, JobFields, EXPORT_FILE_NAME};

#[debug_handler(state = AppState)]
pub(crate) async fn list(
    State(jobs): State<SharedJobs>,
    session: BoardSession,
    Query(params): Query<FilterParams>,
) -> AppResult<Json<Vec<Job>>> {
    session.require_admin("managing jobs").await?;

    let selection = Selection::from(params);
    Ok(Json(selection.apply(jobs.lock().await.list())))
}

#[debug_handler(state = AppState)]
pub(crate) async fn create(
    State(jobs): State<SharedJobs>,
    session: BoardSession,
    Json(fields): Json<JobFields>,
) -> AppResult<(StatusCode, Json<Job>)> {
    session.require_admin("managing jobs").await?;

    let job = jobs.lock().await.create(fields).await;
    Ok((StatusCode::CREATED, Json(job)))
}

/// Responds `null` when the id is unknown; nothing is changed in that case.
#[debug_handler(state = AppState)]
pub(crate) async fn update(
    State(jobs): State<SharedJobs>,
    session: BoardSession,
    Path(id): Path<String>,
    Json(fields): Json<JobFields>,
) -> AppResult<Json<Option<Job>>> {
    session.require_admin("managing jobs").await?;

    Ok(Json(jobs.lock().await.update(&id, fields).await))
}

#[debug_handler(state = AppState)]
pub(crate) async fn delete(
    State(jobs): State<SharedJobs>,
    session: BoardSession,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    session.require_admin("managing jobs").await?;

    jobs.lock().await.delete(&id).await;
    Ok(StatusCode::NO_CONTENT)
}

#[debug_handler(state = AppState)]
pub(crate) async fn clear(
    State(jobs): State<SharedJobs>,
    session: BoardSession,
) -> AppResult<StatusCode> {
    session.require_admin("managing jobs").await?;

    jobs.lock().await.clear().await;
    tracing::info!("all jobs cleared");
    Ok(StatusCode::NO_CONTENT)
}

#[debug_handler(state = AppState)]
pub(crate) async fn export(
    State(jobs): State<SharedJobs>,
    session: BoardSession,
) -> AppResult<impl IntoResponse> {
    session.require_admin("exporting jobs").await?;

    let snapshot = jobs.lock().await.export_snapshot()?;
    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_owned()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILE_NAME}\""),
            ),
        ],
        snapshot,
    ))
}

/// Takes the raw file contents as the request body.
#[debug_handler(state = AppState)]
pub(crate) async fn import(
    State(jobs): State<SharedJobs>,
    session: BoardSession,
    body: String,
) -> AppResult<Json<Value>> {
    session.require_admin("importing jobs").await?;

    let imported = jobs.lock().await.import(&body).await?;
    Ok(Json(json!({ "imported": imported })))
}
