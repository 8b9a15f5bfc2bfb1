//! Query and facet filtering shared by the profile listing and the admin job
//! list.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::{
    jobs::Job,
    profiles::{Location, Profile},
};

/// What the filter engine needs to know about a listed record.
pub trait Searchable {
    /// Free text the query is matched against. Need not be lowercased.
    fn haystack(&self) -> String;
    fn city(&self) -> Option<&str>;
    fn role(&self) -> Option<&str>;
}

impl Searchable for Profile {
    fn haystack(&self) -> String {
        let Location { city, state, country } = &self.location;
        [&self.name, &self.job_title, city, state, country]
            .into_iter()
            .filter(|value| !value.is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn city(&self) -> Option<&str> {
        Some(self.location.city.as_str()).filter(|city| !city.is_empty())
    }

    fn role(&self) -> Option<&str> {
        Some(self.job_title.as_str()).filter(|role| !role.is_empty())
    }
}

impl Searchable for Job {
    fn haystack(&self) -> String {
        [Some(&self.job_title), self.company.as_ref(), self.location.as_ref()]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// First comma-separated segment of the free-form location.
    fn city(&self) -> Option<&str> {
        let location = self.location.as_deref()?;
        let city = location.split(',').next()?.trim();
        (!city.is_empty()).then_some(city)
    }

    fn role(&self) -> Option<&str> {
        Some(self.job_title.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    Name,
    /// Stored order: locally created records first, most recent on top.
    Newest,
    Shuffle,
}

/// Query string form: facet values are comma separated.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterParams {
    pub q: Option<String>,
    pub cities: Option<String>,
    pub roles: Option<String>,
    pub sort: Option<SortBy>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub query: String,
    pub cities: HashSet<String>,
    pub roles: HashSet<String>,
    pub sort: Option<SortBy>,
}

fn facet_set(raw: Option<&str>) -> HashSet<String> {
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
        .collect()
}

impl From<FilterParams> for Selection {
    fn from(params: FilterParams) -> Self {
        Selection {
            query: params.q.unwrap_or_default(),
            cities: facet_set(params.cities.as_deref()),
            roles: facet_set(params.roles.as_deref()),
            sort: params.sort,
        }
    }
}

impl Selection {
    pub fn query(query: impl Into<String>) -> Self {
        Selection {
            query: query.into(),
            ..Selection::default()
        }
    }

    pub fn toggle_city(&mut self, city: &str) {
        if !self.cities.remove(city) {
            self.cities.insert(city.to_owned());
        }
    }

    pub fn toggle_role(&mut self, role: &str) {
        if !self.roles.remove(role) {
            self.roles.insert(role.to_owned());
        }
    }

    pub fn clear_facets(&mut self) {
        self.cities.clear();
        self.roles.clear();
    }

    pub fn matches<T: Searchable>(&self, item: &T) -> bool {
        let query = self.query.trim().to_lowercase();
        if !query.is_empty() && !item.haystack().to_lowercase().contains(&query) {
            return false;
        }

        let in_facet = |selected: &HashSet<String>, value: Option<&str>| {
            selected.is_empty() || value.is_some_and(|value| selected.contains(value))
        };
        in_facet(&self.cities, item.city()) && in_facet(&self.roles, item.role())
    }

    /// Stable filter over `items`, then the requested sort if any.
    pub fn apply<T: Searchable + Clone>(&self, items: &[T]) -> Vec<T> {
        let mut out: Vec<T> = items.iter().filter(|item| self.matches(*item)).cloned().collect();

        match self.sort {
            None | Some(SortBy::Newest) => {}
            Some(SortBy::Name) => out.sort_by_cached_key(|item| item.haystack().to_lowercase()),
            Some(SortBy::Shuffle) => out.shuffle(&mut rand::rng()),
        }
        out
    }
}

/// Distinct facet values of a collection, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Facets {
    pub cities: Vec<String>,
    pub roles: Vec<String>,
}

pub fn facet_options<T: Searchable>(items: &[T]) -> Facets {
    let mut facets = Facets::default();
    for item in items {
        if let Some(city) = item.city() {
            if !facets.cities.iter().any(|c| c == city) {
                facets.cities.push(city.to_owned());
            }
        }
        if let Some(role) = item.role() {
            if !facets.roles.iter().any(|r| r == role) {
                facets.roles.push(role.to_owned());
            }
        }
    }
    facets
}
