use axum::{debug_handler, extract::State, Json};
use serde::Deserialize;

use crate::{
    flow::{AuthMode, Stage},
    session::BoardSession,
    AppResult, AppState,
};

use super::{Accounts, RegisterInput};

#[derive(Deserialize)]
pub(crate) struct LoginInput {
    email: String,
}

#[debug_handler(state = AppState)]
pub(crate) async fn login(
    State(accounts): State<Accounts>,
    session: BoardSession,
    Json(LoginInput { email }): Json<LoginInput>,
) -> AppResult<Json<Stage>> {
    session.require_stage("login", Stage::Auth(AuthMode::Login)).await?;

    let user = accounts.login(&email).await?;
    Ok(Json(session.sign_in(&user).await?))
}

#[debug_handler(state = AppState)]
pub(crate) async fn register(
    State(accounts): State<Accounts>,
    session: BoardSession,
    Json(input): Json<RegisterInput>,
) -> AppResult<Json<Stage>> {
    session.require_stage("registration", Stage::Auth(AuthMode::Register)).await?;

    let user = accounts.register(input).await?;
    Ok(Json(session.sign_in(&user).await?))
}
