//! Simulated sign-in: no passwords, just an email registry kept in the store.

mod accounts;
mod landing;
mod login;
mod logout;

use axum::{routing::{get, post}, Router};

use crate::AppState;

pub use accounts::{Accounts, RegisterInput};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/flow", get(landing::current))
        .route("/flow/continue", post(landing::continue_to_login))
        .route("/flow/register", post(landing::continue_to_register))
        .route("/flow/hire", post(landing::hire))
        .route("/register", post(login::register))
        .route("/login", post(login::login))
        .route("/logout", get(logout::logout))
}
