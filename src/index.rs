use axum::{debug_handler, extract::State, response::{IntoResponse, Redirect, Response}};

use crate::{flow::Stage, include_res, session::BoardSession, store::Store, AppResult, AppState, Markdown};

/// Landing page for new visitors; everyone else goes to their stage's view.
#[debug_handler]
pub async fn index(session: BoardSession) -> AppResult<Response> {
    match session.stage().await? {
        Stage::Landing => Ok(Markdown(include_res!(str, "/pages/landing.md")).into_response()),
        stage => Ok(Redirect::to(stage.path()).into_response()),
    }
}

#[debug_handler(state = AppState)]
pub async fn healthz(State(store): State<Store>) -> AppResult<&'static str> {
    store.ping().await?;
    tracing::debug!("service is healthy");
    Ok("ok")
}
