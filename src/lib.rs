pub mod appresult;
pub mod auth;
pub mod config;
pub mod error;
pub mod filter;
pub mod flow;
pub mod index;
pub mod jobs;
pub mod profiles;
pub mod res;
pub mod session;
pub mod store;

use std::{ops::Deref, sync::Arc};

use axum::{extract::FromRef, response::{Html, IntoResponse}, routing::get, Router};
use sqlx::SqlitePool;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tower_sessions::{cookie::SameSite, Expiry, MemoryStore, SessionManagerLayer};

pub use appresult::{AppError, AppResult};
pub use config::Settings;
pub use error::BoardError;

use auth::Accounts;
use jobs::repo::JobRepo;
use profiles::repo::ProfileRepo;
use store::Store;

pub type SharedProfiles = Arc<Mutex<ProfileRepo>>;
pub type SharedJobs = Arc<Mutex<JobRepo>>;

#[derive(Clone, FromRef)]
pub struct AppState {
    pub store: Store,
    pub accounts: Accounts,
    pub profiles: SharedProfiles,
    pub jobs: SharedJobs,
    pub settings: Arc<Settings>,
}

impl AppState {
    /// Opens the key/value store on `db_pool` and loads both collections,
    /// seeding the job list when nothing is stored yet.
    pub async fn new(db_pool: SqlitePool, settings: Settings) -> anyhow::Result<AppState> {
        let store = Store::open(db_pool).await?;
        let accounts = Accounts::new(store.clone(), &settings.admin_emails);
        let profiles = ProfileRepo::load(store.clone(), profiles::seed_profiles()).await;
        let jobs = JobRepo::load(store.clone()).await;

        Ok(AppState {
            store,
            accounts,
            profiles: Arc::new(Mutex::new(profiles)),
            jobs: Arc::new(Mutex::new(jobs)),
            settings: Arc::new(settings),
        })
    }
}

pub fn app(app_state: AppState) -> Router {
    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(false)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::minutes(
            app_state.settings.session_idle_minutes,
        )));

    Router::new()
        .route("/", get(index::index))
        .route("/healthz", get(index::healthz))

        .merge(auth::router())
        .nest("/profiles", profiles::router())
        .nest("/admin/jobs", jobs::router())

        .with_state(app_state)
        .layer(session_layer)
        .layer(CorsLayer::permissive())
}

pub struct Markdown<T>(pub T);

impl<T> IntoResponse for Markdown<T>
where
    T: Deref<Target = str>
{
    fn into_response(self) -> axum::response::Response {
        use pulldown_cmark::{Options, Parser};

        let parser = Parser::new_ext(&*self.0, Options::ENABLE_TABLES);

        let mut html_output = String::new();
        pulldown_cmark::html::push_html(&mut html_output, parser);
        Html(html_output).into_response()
    }
}
