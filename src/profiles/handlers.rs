use axum::{debug_handler, extract::{Query, State}, http::StatusCode, Json};

use crate::{
    auth::Accounts,
    filter::{facet_options, Facets, FilterParams, Selection},
    flow::{Event, Stage, StoredUser},
    session::BoardSession,
    AppResult, AppState, SharedProfiles,
};

use super::{Profile, ProfileForm};

#[debug_handler(state = AppState)]
pub(crate) async fn list(
    State(profiles): State<SharedProfiles>,
    session: BoardSession,
    Query(params): Query<FilterParams>,
) -> AppResult<Json<Vec<Profile>>> {
    session.require_stage("browsing profiles", Stage::Main).await?;

    let selection = Selection::from(params);
    let profiles = profiles.lock().await;
    Ok(Json(selection.apply(&profiles.list())))
}

#[debug_handler(state = AppState)]
pub(crate) async fn facets(
    State(profiles): State<SharedProfiles>,
    session: BoardSession,
) -> AppResult<Json<Facets>> {
    session.require_stage("browsing profiles", Stage::Main).await?;

    let profiles = profiles.lock().await;
    Ok(Json(facet_options(&profiles.list())))
}

/// Final confirmation of the profile wizard.
#[debug_handler(state = AppState)]
pub(crate) async fn create(
    State(profiles): State<SharedProfiles>,
    State(accounts): State<Accounts>,
    session: BoardSession,
    Json(form): Json<ProfileForm>,
) -> AppResult<(StatusCode, Json<Profile>)> {
    session.require_stage("profile submission", Stage::ProfileCapture).await?;

    let profile = profiles.lock().await.create(&form).await?;

    if let Some(user) = session.user().await? {
        let marked = accounts.mark_profile_completed(&user.email).await;
        let user = StoredUser { profile_completed: true, ..marked.unwrap_or(user) };
        session.set_user(&user).await?;
    }
    session.advance(Event::ProfileSubmitted).await?;

    Ok((StatusCode::CREATED, Json(profile)))
}

#[debug_handler(state = AppState)]
pub(crate) async fn clear(
    State(profiles): State<SharedProfiles>,
    session: BoardSession,
) -> AppResult<StatusCode> {
    session.require_admin("clearing profiles").await?;

    profiles.lock().await.clear().await;
    tracing::info!("locally created profiles cleared");
    Ok(StatusCode::NO_CONTENT)
}
