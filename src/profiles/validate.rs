use url::Url;

use crate::BoardError;

use super::{Country, ProfileForm};

pub const MAX_SKILLS: usize = 20;

/// Checks a wizard submission and reports the first field that fails.
pub fn validate(form: &ProfileForm) -> Result<(), BoardError> {
    let required = [
        ("name", &form.name),
        ("img", &form.img),
        ("email", &form.email),
        ("jobTitle", &form.job_title),
        ("city", &form.city),
        ("country", &form.country),
        ("state", &form.state),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(BoardError::invalid(field, "is required"));
        }
    }

    if !form.email.contains('@') {
        return Err(BoardError::invalid("email", "must contain @"));
    }
    if !is_url(&form.img) {
        return Err(BoardError::invalid("img", "is not a valid URL"));
    }

    let Ok(country) = form.country.trim().parse::<Country>() else {
        return Err(BoardError::invalid("country", "is not a supported country"));
    };
    if !country.states().contains(&form.state.trim()) {
        return Err(BoardError::invalid("state", "does not belong to the country"));
    }

    let links = [
        ("website", &form.website),
        ("linkedin", &form.linkedin),
        ("github", &form.github),
    ];
    for (field, value) in links {
        if !value.trim().is_empty() && !is_url(value) {
            return Err(BoardError::invalid(field, "is not a valid URL"));
        }
    }

    Ok(())
}

pub fn is_valid(form: &ProfileForm) -> bool {
    validate(form).is_ok()
}

fn is_url(raw: &str) -> bool {
    Url::parse(raw.trim()).is_ok()
}

/// Splits free text on commas and newlines, keeping at most [`MAX_SKILLS`].
pub fn split_skills(raw: &str) -> Vec<String> {
    raw.split([',', '\n'])
        .map(str::trim)
        .filter(|skill| !skill.is_empty())
        .take(MAX_SKILLS)
        .map(str::to_owned)
        .collect()
}
