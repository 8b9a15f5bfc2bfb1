use std::{collections::BTreeMap, sync::Arc};

use serde::Deserialize;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{
    flow::{Role, StoredUser},
    store::{keys, Store},
    BoardError,
};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterInput {
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
    pub role: Role,
}

/// Registered accounts keyed by lowercased email. Admin addresses come from
/// configuration and never need registering.
/// Registry read-modify-writes hold `writes`.
#[derive(Clone, Debug)]
pub struct Accounts {
    store: Store,
    admin_emails: Arc<[String]>,
    writes: Arc<Mutex<()>>,
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl Accounts {
    pub fn new(store: Store, admin_emails: &[String]) -> Accounts {
        let admin_emails = admin_emails.iter().map(|email| normalize_email(email)).collect();
        Accounts {
            store,
            admin_emails,
            writes: Arc::new(Mutex::new(())),
        }
    }

    fn is_admin_email(&self, email: &str) -> bool {
        self.admin_emails.iter().any(|admin| admin == email)
    }

    async fn registry(&self) -> BTreeMap<String, StoredUser> {
        self.store.read_json(keys::USERS).await.unwrap_or_default()
    }

    pub async fn find(&self, email: &str) -> Option<StoredUser> {
        self.registry().await.remove(&normalize_email(email))
    }

    /// Registers (or re-registers) an account. Re-registering keeps the
    /// existing id and profile flag.
    pub async fn register(&self, input: RegisterInput) -> Result<StoredUser, BoardError> {
        let email = normalize_email(&input.email);
        if email.is_empty() {
            return Err(BoardError::invalid("email", "is required"));
        }
        if !email.contains('@') {
            return Err(BoardError::invalid("email", "must contain @"));
        }

        let role = match (input.role, self.is_admin_email(&email)) {
            (_, true) => Role::Admin,
            (Role::Admin, false) => {
                return Err(BoardError::invalid("role", "admin accounts are configured, not registered"));
            }
            (role @ (Role::Student | Role::Recruiter), false) => role,
        };

        let _guard = self.writes.lock().await;
        let mut registry = self.registry().await;
        let previous = registry.get(&email);
        let user = StoredUser {
            id: previous
                .map(|user| user.id.clone())
                .unwrap_or_else(|| Uuid::now_v7().to_string()),
            email: email.clone(),
            full_name: input
                .full_name
                .map(|name| name.trim().to_owned())
                .filter(|name| !name.is_empty()),
            role,
            profile_completed: previous.is_some_and(|user| user.profile_completed),
        };

        registry.insert(email, user.clone());
        self.store.write_json(keys::USERS, &registry).await;

        tracing::info!(email = %user.email, role = ?user.role, "account registered");
        Ok(user)
    }

    pub async fn login(&self, email: &str) -> Result<StoredUser, BoardError> {
        let email = normalize_email(email);
        if let Some(user) = self.find(&email).await {
            return Ok(user);
        }

        if self.is_admin_email(&email) {
            return Ok(StoredUser {
                id: format!("admin:{email}"),
                email,
                full_name: None,
                role: Role::Admin,
                profile_completed: true,
            });
        }

        Err(BoardError::UnknownAccount(email))
    }

    /// Flips `profileCompleted` so later sign-ins skip the wizard.
    pub async fn mark_profile_completed(&self, email: &str) -> Option<StoredUser> {
        let _guard = self.writes.lock().await;
        let mut registry = self.registry().await;
        let user = registry.get_mut(&normalize_email(email))?;
        user.profile_completed = true;
        let user = user.clone();

        self.store.write_json(keys::USERS, &registry).await;
        Some(user)
    }
}
