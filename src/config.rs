use anyhow::Context;

const DEFAULT_DATABASE_URL: &str = "sqlite://jobboard.db?mode=rwc";
const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_ADMIN_EMAIL: &str = "admin@jobboard.local";

/// Runtime settings, read from the environment (and `.env` when present).
#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub listen_addr: String,
    pub session_idle_minutes: i64,
    /// Logging in with one of these addresses opens the admin view.
    pub admin_emails: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            database_url: DEFAULT_DATABASE_URL.to_owned(),
            listen_addr: DEFAULT_LISTEN_ADDR.to_owned(),
            session_idle_minutes: 5,
            admin_emails: vec![DEFAULT_ADMIN_EMAIL.to_owned()],
        }
    }
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Settings> {
        let defaults = Settings::default();

        let session_idle_minutes = match dotenv::var("SESSION_IDLE_MINUTES") {
            Ok(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("SESSION_IDLE_MINUTES is not a number: {raw}"))?,
            Err(_) => defaults.session_idle_minutes,
        };

        let admin_emails = match dotenv::var("ADMIN_EMAILS") {
            Ok(raw) => parse_email_list(&raw),
            Err(_) => defaults.admin_emails,
        };

        Ok(Settings {
            database_url: dotenv::var("DATABASE_URL").unwrap_or(defaults.database_url),
            listen_addr: dotenv::var("LISTEN_ADDR").unwrap_or(defaults.listen_addr),
            session_idle_minutes,
            admin_emails,
        })
    }
}

fn parse_email_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|email| email.trim().to_lowercase())
        .filter(|email| !email.is_empty())
        .collect()
}
