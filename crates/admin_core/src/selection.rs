//! Cascading master-detail selection state and the derived list views.
//!
//! Two independent cascades: the main dashboard's country → visa type
//! selection, and the specialist editor's country → visa-type checkbox
//! picker. Both are plain state machines with explicit transitions so they
//! can be driven and asserted without any rendering environment.

use shared::domain::{Country, Specialist, Specialization, VisaType};
use tracing::debug;

use crate::normalize;

/// Ties an in-flight fetch to the selection generation that issued it.
/// Results presented with a stale token are discarded: a late response for a
/// superseded selection must never overwrite the live one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchToken {
    generation: u64,
}

/// Country → visa-type cascade for the main dashboard.
#[derive(Debug, Default)]
pub struct VisaCascade {
    country: Option<Country>,
    visa_types: Vec<VisaType>,
    selected: Option<String>,
    generation: u64,
    loading: bool,
}

impl VisaCascade {
    /// Picking a country clears the visa list and any visa selection; the
    /// caller fetches that country's catalog and commits it with the token.
    pub fn select_country(&mut self, country: Country) -> FetchToken {
        self.country = Some(country);
        self.visa_types.clear();
        self.selected = None;
        self.loading = true;
        self.generation += 1;
        FetchToken {
            generation: self.generation,
        }
    }

    pub fn clear_country(&mut self) {
        self.country = None;
        self.visa_types.clear();
        self.selected = None;
        self.loading = false;
        self.generation += 1;
    }

    /// Starts a list refresh for the current country without touching the
    /// visa selection (the post-mutation re-fetch path).
    pub fn begin_refresh(&mut self) -> Option<FetchToken> {
        self.country.as_ref()?;
        self.loading = true;
        self.generation += 1;
        Some(FetchToken {
            generation: self.generation,
        })
    }

    /// Commits a fetched list. Returns false, changing nothing, when the
    /// token no longer matches the live selection. A selection whose key
    /// vanished from the new list is dropped.
    pub fn apply_visa_types(&mut self, token: FetchToken, visa_types: Vec<VisaType>) -> bool {
        if token.generation != self.generation {
            debug!(
                stale = token.generation,
                live = self.generation,
                "discarding stale visa-type response"
            );
            return false;
        }
        if let Some(selected) = &self.selected {
            if !visa_types.iter().any(|visa| &visa.visa_type == selected) {
                self.selected = None;
            }
        }
        self.visa_types = visa_types;
        self.loading = false;
        true
    }

    /// Marks a failed fetch finished. Stale failures are ignored too.
    pub fn fail_load(&mut self, token: FetchToken) -> bool {
        if token.generation != self.generation {
            return false;
        }
        self.loading = false;
        true
    }

    pub fn select_visa(&mut self, visa_type: &str) -> bool {
        if !self.visa_types.iter().any(|visa| visa.visa_type == visa_type) {
            return false;
        }
        self.selected = Some(visa_type.to_string());
        true
    }

    pub fn clear_visa(&mut self) {
        self.selected = None;
    }

    pub fn country(&self) -> Option<&Country> {
        self.country.as_ref()
    }

    pub fn visa_types(&self) -> &[VisaType] {
        &self.visa_types
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn selected_record(&self) -> Option<&VisaType> {
        let selected = self.selected.as_deref()?;
        self.visa_types.iter().find(|visa| visa.visa_type == selected)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }
}

/// Country → visa-type checkbox cascade inside the specialist editor,
/// independent of the main specialist selection.
#[derive(Debug, Default)]
pub struct FormCascade {
    country: Option<Country>,
    catalog: Vec<VisaType>,
    checked: Vec<String>,
    generation: u64,
    loading: bool,
}

impl FormCascade {
    /// Picks a country for the specialization editor. The checkbox buffer is
    /// seeded from the specialist's existing entry for that country, so an
    /// edit session starts from what is already committed.
    pub fn select_country(&mut self, country: Country, existing: &Specialization) -> FetchToken {
        self.checked = existing
            .visa_types
            .iter()
            .find(|entry| entry.country == country)
            .map(|entry| entry.types.clone())
            .unwrap_or_default();
        self.country = Some(country);
        self.catalog.clear();
        self.loading = true;
        self.generation += 1;
        FetchToken {
            generation: self.generation,
        }
    }

    pub fn clear(&mut self) {
        self.country = None;
        self.catalog.clear();
        self.checked.clear();
        self.loading = false;
        self.generation += 1;
    }

    pub fn apply_catalog(&mut self, token: FetchToken, catalog: Vec<VisaType>) -> bool {
        if token.generation != self.generation {
            debug!(
                stale = token.generation,
                live = self.generation,
                "discarding stale form-catalog response"
            );
            return false;
        }
        self.catalog = catalog;
        self.loading = false;
        true
    }

    pub fn fail_load(&mut self, token: FetchToken) -> bool {
        if token.generation != self.generation {
            return false;
        }
        self.loading = false;
        true
    }

    pub fn toggle(&mut self, visa_type: &str, checked: bool) {
        if checked {
            if !self.checked.iter().any(|key| key == visa_type) {
                self.checked.push(visa_type.to_string());
            }
        } else {
            self.checked.retain(|key| key != visa_type);
        }
    }

    /// Commits the checkbox buffer into the specialization by country-key
    /// upsert, then resets the pick: the dropdown returns to its placeholder
    /// and the buffer never persists past a commit. A commit with nothing
    /// checked is refused, leaving the pick in place.
    pub fn commit_into(&mut self, specialization: &mut Specialization) -> bool {
        let Some(country) = self.country.take() else {
            return false;
        };
        if self.checked.is_empty() {
            self.country = Some(country);
            return false;
        }
        normalize::upsert_specialization(
            &mut specialization.visa_types,
            &country,
            std::mem::take(&mut self.checked),
        );
        self.catalog.clear();
        self.loading = false;
        self.generation += 1;
        true
    }

    pub fn country(&self) -> Option<&Country> {
        self.country.as_ref()
    }

    pub fn catalog(&self) -> &[VisaType] {
        &self.catalog
    }

    pub fn checked(&self) -> &[String] {
        &self.checked
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }
}

/// Case-insensitive substring filter over country names, order-preserving.
/// Blank terms filter nothing.
pub fn filtered_countries<'a>(countries: &'a [Country], term: &str) -> Vec<&'a Country> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return countries.iter().collect();
    }
    countries
        .iter()
        .filter(|country| country.as_str().to_lowercase().contains(&term))
        .collect()
}

/// Case-insensitive substring filter matching specialist name OR title.
pub fn filtered_specialists<'a>(specialists: &'a [Specialist], term: &str) -> Vec<&'a Specialist> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return specialists.iter().collect();
    }
    specialists
        .iter()
        .filter(|specialist| {
            specialist.name.to_lowercase().contains(&term)
                || specialist.title.to_lowercase().contains(&term)
        })
        .collect()
}

/// Server-side filter parameterization for the specialist list. These are
/// not client-side array filters: each combination maps onto its own fetch
/// variant against the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpertFilters {
    pub country: Option<Country>,
    pub visa_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpertQuery {
    All,
    ByCountry(Country),
    ByVisaType(String),
    ByCountryAndVisa(Country, String),
}

impl ExpertFilters {
    /// The four-way branch choosing which fetch variant serves the current
    /// filters.
    pub fn query(&self) -> ExpertQuery {
        match (&self.country, &self.visa_type) {
            (Some(country), Some(visa_type)) => {
                ExpertQuery::ByCountryAndVisa(country.clone(), visa_type.clone())
            }
            (Some(country), None) => ExpertQuery::ByCountry(country.clone()),
            (None, Some(visa_type)) => ExpertQuery::ByVisaType(visa_type.clone()),
            (None, None) => ExpertQuery::All,
        }
    }
}

#[cfg(test)]
#[path = "tests/selection_tests.rs"]
mod tests;
