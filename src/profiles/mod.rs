mod handlers;
pub mod repo;
pub mod validate;

use std::str::FromStr;

use axum::{routing::{get, post}, Router};
use serde::{Deserialize, Serialize};

use crate::{include_res, AppState};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list).post(handlers::create))
        .route("/facets", get(handlers::facets))
        .route("/clear", post(handlers::clear))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Approved,
    Pending,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub country: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Links {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
}

/// A job seeker. Seed entries are sparse, so everything past `id` and `name`
/// falls back to a default when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub img: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, alias = "jobtitle")]
    pub job_title: String,
    #[serde(default)]
    pub location: Location,
    #[serde(default)]
    pub links: Links,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skills: Vec<String>,
    #[serde(default)]
    pub status: Status,
}

/// Raw profile wizard input, every field as typed.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileForm {
    pub name: String,
    pub img: String,
    pub email: String,
    pub website: String,
    pub linkedin: String,
    pub github: String,
    pub job_title: String,
    pub city: String,
    pub state: String,
    pub country: String,
    /// Free text, one skill per comma or line.
    pub skills: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Country {
    Nigeria,
    India,
    Australia,
    Canada,
    Usa,
    Uk,
    SriLanka,
}

impl Country {
    pub const ALL: [Country; 7] = [
        Country::Nigeria,
        Country::India,
        Country::Australia,
        Country::Canada,
        Country::Usa,
        Country::Uk,
        Country::SriLanka,
    ];

    pub fn name(&self) -> &'static str {
        use Country::*;
        match self {
            Nigeria => "Nigeria",
            India => "India",
            Australia => "Australia",
            Canada => "Canada",
            Usa => "USA",
            Uk => "UK",
            SriLanka => "Sri Lanka",
        }
    }

    pub fn states(&self) -> &'static [&'static str] {
        use Country::*;
        match self {
            Nigeria => &["Fct", "Lagos", "Kano"],
            India => &["Maharashtra", "Telangana", "Karnataka"],
            Australia => &["NSW", "VIC", "QLD"],
            Canada => &["Ontario", "Quebec"],
            Usa => &["California", "New York"],
            Uk => &["England", "Scotland"],
            SriLanka => &["Western", "Central"],
        }
    }
}

impl FromStr for Country {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Country::ALL
            .into_iter()
            .find(|country| country.name() == s)
            .ok_or(())
    }
}

/// Demo profiles shipped with the binary, listed after locally created ones.
pub fn seed_profiles() -> Vec<Profile> {
    match serde_json::from_str(include_res!(str, "/persons.json")) {
        Ok(persons) => persons,
        Err(err) => {
            tracing::warn!(%err, "bundled seed profiles are unreadable");
            Vec::new()
        }
    }
}
