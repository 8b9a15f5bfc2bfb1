use std::fmt;

use serde::{Deserialize, Serialize};

use crate::BoardError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Recruiter,
    Admin,
}

/// The account record kept under the `user` session key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredUser {
    #[serde(rename = "_id")]
    pub id: String,
    pub email: String,
    #[serde(rename = "fullName", default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    pub role: Role,
    #[serde(rename = "profileCompleted", default)]
    pub profile_completed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthMode {
    Login,
    Register,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "stage", content = "mode", rename_all = "snake_case")]
pub enum Stage {
    #[default]
    Landing,
    Auth(AuthMode),
    ProfileCapture,
    Main,
    Admin,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use Stage::*;
        match self {
            Landing => write!(f, "landing"),
            Auth(AuthMode::Login) => write!(f, "login"),
            Auth(AuthMode::Register) => write!(f, "register"),
            ProfileCapture => write!(f, "profile capture"),
            Main => write!(f, "main"),
            Admin => write!(f, "admin"),
        }
    }
}

pub enum Event<'a> {
    /// "Continue" or "Log in" on the landing page, or switching the auth
    /// form back to login.
    Continue,
    Register,
    /// Recruiter preview: straight to the listing without an account.
    Hire,
    Authenticated(&'a StoredUser),
    ProfileSubmitted,
    SignOut,
}

impl Event<'_> {
    fn name(&self) -> &'static str {
        use Event::*;
        match self {
            Continue => "continue",
            Register => "register",
            Hire => "hire",
            Authenticated(_) => "login",
            ProfileSubmitted => "profile submission",
            SignOut => "sign out",
        }
    }
}

impl Stage {
    /// Where a freshly authenticated (or resumed) user lands.
    pub fn for_user(user: &StoredUser) -> Stage {
        match user.role {
            Role::Admin => Stage::Admin,
            Role::Student if !user.profile_completed => Stage::ProfileCapture,
            Role::Student | Role::Recruiter => Stage::Main,
        }
    }

    pub fn next(self, event: Event<'_>) -> Result<Stage, BoardError> {
        use Stage::*;
        let next = match (self, &event) {
            (_, Event::SignOut) => Landing,

            (Landing | Auth(_), Event::Continue) => Auth(AuthMode::Login),
            (Landing | Auth(_), Event::Register) => Auth(AuthMode::Register),
            (Landing, Event::Hire) => Main,

            (Auth(_), Event::Authenticated(user)) => Stage::for_user(user),

            (ProfileCapture, Event::ProfileSubmitted) => Main,

            (stage, event) => {
                return Err(BoardError::WrongStage {
                    action: event.name(),
                    stage,
                });
            }
        };

        Ok(next)
    }

    /// Route serving this stage's view.
    pub fn path(&self) -> &'static str {
        use Stage::*;
        match self {
            Landing => "/",
            Auth(_) | ProfileCapture => "/flow",
            Main => "/profiles",
            Admin => "/admin/jobs",
        }
    }
}
