use axum::{extract::FromRequestParts, http::request::Parts};
use tower_sessions::Session;
use uuid::Uuid;

use crate::{
    flow::{Event, Role, Stage, StoredUser},
    AppResult, BoardError,
};

pub const USER: &str = "user";
pub const IS_ADMIN: &str = "isAdmin";
pub const ADMIN_TOKEN: &str = "admin_token";
pub const TOKEN: &str = "token";
pub const STAGE: &str = "stage";

/// A visitor's session: who is signed in and where they are in the flow.
#[derive(Clone, Debug)]
pub struct BoardSession(pub Session);

impl<S> FromRequestParts<S> for BoardSession
where
    S: Send + Sync,
{
    type Rejection = <Session as FromRequestParts<S>>::Rejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Session::from_request_parts(parts, state).await.map(BoardSession)
    }
}

impl BoardSession {
    pub async fn user(&self) -> AppResult<Option<StoredUser>> {
        Ok(self.0.get::<StoredUser>(USER).await?)
    }

    pub async fn set_user(&self, user: &StoredUser) -> AppResult<()> {
        self.0.insert(USER, user).await?;
        Ok(())
    }

    /// Current stage. A session carrying a user but no stage resumes where
    /// that user belongs.
    pub async fn stage(&self) -> AppResult<Stage> {
        if let Some(stage) = self.0.get::<Stage>(STAGE).await? {
            return Ok(stage);
        }

        Ok(match self.user().await? {
            Some(user) => Stage::for_user(&user),
            None => Stage::Landing,
        })
    }

    pub async fn advance(&self, event: Event<'_>) -> AppResult<Stage> {
        let next = self.stage().await?.next(event)?;
        self.0.insert(STAGE, next).await?;
        Ok(next)
    }

    pub async fn sign_in(&self, user: &StoredUser) -> AppResult<Stage> {
        let stage = self.advance(Event::Authenticated(user)).await?;

        self.set_user(user).await?;
        self.0.insert(TOKEN, Uuid::now_v7().to_string()).await?;
        match user.role {
            Role::Admin => {
                self.0.insert(IS_ADMIN, "true").await?;
                self.0.insert(ADMIN_TOKEN, Uuid::now_v7().to_string()).await?;
            }
            Role::Student | Role::Recruiter => {}
        }

        tracing::info!(email = %user.email, %stage, "signed in");
        Ok(stage)
    }

    /// Drops every session flag. Stored profiles and jobs are untouched.
    pub async fn sign_out(&self) {
        self.0.clear().await;
    }

    pub async fn is_admin(&self) -> AppResult<bool> {
        Ok(self.0.get::<String>(IS_ADMIN).await?.as_deref() == Some("true"))
    }

    pub async fn require_stage(&self, action: &'static str, wanted: Stage) -> AppResult<()> {
        let stage = self.stage().await?;
        if stage != wanted {
            return Err(BoardError::WrongStage { action, stage }.into());
        }
        Ok(())
    }

    pub async fn require_admin(&self, action: &'static str) -> AppResult<()> {
        if !self.is_admin().await? {
            let stage = self.stage().await?;
            return Err(BoardError::WrongStage { action, stage }.into());
        }
        Ok(())
    }
}
