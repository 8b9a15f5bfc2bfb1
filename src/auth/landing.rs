use axum::{debug_handler, Json};

use crate::{
    flow::{Event, Stage},
    session::BoardSession,
    AppResult,
};

#[debug_handler]
pub(crate) async fn current(session: BoardSession) -> AppResult<Json<Stage>> {
    Ok(Json(session.stage().await?))
}

#[debug_handler]
pub(crate) async fn continue_to_login(session: BoardSession) -> AppResult<Json<Stage>> {
    Ok(Json(session.advance(Event::Continue).await?))
}

#[debug_handler]
pub(crate) async fn continue_to_register(session: BoardSession) -> AppResult<Json<Stage>> {
    Ok(Json(session.advance(Event::Register).await?))
}

/// Recruiter preview of the listing, no account needed.
#[debug_handler]
pub(crate) async fn hire(session: BoardSession) -> AppResult<Json<Stage>> {
    Ok(Json(session.advance(Event::Hire).await?))
}
