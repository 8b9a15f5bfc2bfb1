use axum::{debug_handler, extract::Query, response::Redirect};
use serde::Deserialize;

use crate::{session::BoardSession, AppResult};

#[derive(Deserialize)]
pub(crate) struct LogoutQuery {
    pub(crate) return_url: Option<String>,
}

/// Only same-site paths are followed; anything else lands on `/`.
fn local_path(return_url: Option<&str>) -> &str {
    return_url
        .filter(|url| url.starts_with('/') && !url.starts_with("//") && !url.starts_with("/\\"))
        .unwrap_or("/")
}

/// Sign out from any stage. Only session flags go; profiles and jobs stay.
#[debug_handler]
pub(crate) async fn logout(
    Query(LogoutQuery { return_url }): Query<LogoutQuery>,
    session: BoardSession,
) -> AppResult<Redirect> {
    if let Some(user) = session.user().await? {
        tracing::info!(email = %user.email, "signed out");
    }
    session.sign_out().await;
    Ok(Redirect::to(local_path(return_url.as_deref())))
}
