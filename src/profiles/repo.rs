use uuid::Uuid;

use crate::{
    store::{keys, Store},
    BoardError,
};

use super::{
    validate::{split_skills, validate},
    Links, Location, Profile, ProfileForm, Status,
};

/// Locally created profiles (newest first) in front of the bundled seed.
pub struct ProfileRepo {
    store: Store,
    local: Vec<Profile>,
    seed: Vec<Profile>,
}

impl ProfileRepo {
    pub async fn load(store: Store, seed: Vec<Profile>) -> ProfileRepo {
        let local = store
            .read_json::<Vec<Profile>>(keys::USER_PROFILES)
            .await
            .unwrap_or_default();

        tracing::debug!(local = local.len(), seed = seed.len(), "profiles loaded");
        ProfileRepo { store, local, seed }
    }

    pub fn list(&self) -> Vec<Profile> {
        self.local.iter().chain(&self.seed).cloned().collect()
    }

    pub fn local(&self) -> &[Profile] {
        &self.local
    }

    pub async fn create(&mut self, form: &ProfileForm) -> Result<Profile, BoardError> {
        validate(form)?;

        let profile = normalize(form);
        self.local.insert(0, profile.clone());
        self.store.write_json(keys::USER_PROFILES, &self.local).await;

        tracing::info!(id = %profile.id, name = %profile.name, "profile created");
        Ok(profile)
    }

    pub async fn clear(&mut self) {
        self.local.clear();
        self.store.remove(keys::USER_PROFILES).await;
    }
}

fn optional_link(raw: &str) -> Option<String> {
    let raw = raw.trim();
    (!raw.is_empty()).then(|| raw.to_owned())
}

fn normalize(form: &ProfileForm) -> Profile {
    Profile {
        id: Uuid::now_v7().to_string(),
        name: form.name.trim().to_owned(),
        img: form.img.trim().to_owned(),
        email: form.email.trim().to_owned(),
        job_title: form.job_title.trim().to_owned(),
        location: Location {
            city: form.city.trim().to_owned(),
            state: form.state.trim().to_owned(),
            country: form.country.trim().to_owned(),
        },
        links: Links {
            website: optional_link(&form.website),
            linkedin: optional_link(&form.linkedin),
            github: optional_link(&form.github),
        },
        skills: split_skills(&form.skills),
        status: Status::Approved,
    }
}
