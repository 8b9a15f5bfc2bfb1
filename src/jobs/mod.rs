mod handlers;
pub mod import;
pub mod repo;

use axum::{routing::{get, post, put}, Router};
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use crate::AppState;

pub const UNTITLED: &str = "Untitled";
pub const EXPORT_FILE_NAME: &str = "jobs-export.json";

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_LEN: usize = 7;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list).post(handlers::create))
        .route("/{id}", put(handlers::update).delete(handlers::delete))
        .route("/clear", post(handlers::clear))
        .route("/export", get(handlers::export))
        .route("/import", post(handlers::import))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: String,
    pub job_title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Admin form input. Absent fields are left alone on update.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobFields {
    pub job_title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

fn title_or_untitled(title: Option<String>) -> String {
    non_blank(title).unwrap_or_else(|| UNTITLED.to_owned())
}

impl Job {
    pub fn new(fields: JobFields) -> Job {
        Job {
            id: new_job_id(),
            job_title: title_or_untitled(fields.job_title),
            company: non_blank(fields.company),
            location: non_blank(fields.location),
            description: non_blank(fields.description),
        }
    }

    /// Overwrites every supplied field; a blank value clears an optional one.
    pub fn merge(&mut self, fields: JobFields) {
        if let Some(title) = fields.job_title {
            self.job_title = title_or_untitled(Some(title));
        }
        if let Some(company) = fields.company {
            self.company = non_blank(Some(company));
        }
        if let Some(location) = fields.location {
            self.location = non_blank(Some(location));
        }
        if let Some(description) = fields.description {
            self.description = non_blank(Some(description));
        }
    }
}

pub fn new_job_id() -> String {
    let mut rng = rand::rng();
    (0..ID_LEN)
        .filter_map(|_| ID_ALPHABET.choose(&mut rng))
        .map(|&b| b as char)
        .collect()
}

/// Demo listings stored on first start.
pub fn demo_jobs() -> Vec<Job> {
    let demo = |id: &str, title: &str, company: &str, location: &str, description: &str| Job {
        id: id.to_owned(),
        job_title: title.to_owned(),
        company: Some(company.to_owned()),
        location: Some(location.to_owned()),
        description: Some(description.to_owned()),
    };

    vec![
        demo("1", "Frontend Engineer", "Acme", "Bengaluru, India", "React + TypeScript"),
        demo("2", "Backend Engineer", "Globex", "Pune, India", "Node.js / Express"),
    ]
}
