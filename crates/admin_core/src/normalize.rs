//! Normalization boundary between raw catalog records and editable form
//! state.
//!
//! The backend is loosely typed: fields arrive under legacy aliases, list
//! fields arrive as arrays or comma-separated text, and scalars go missing.
//! All of that is resolved here, once; nothing outside this module inspects a
//! raw record.

use serde_json::Value;
use shared::domain::{
    Availability, Country, CountrySpecialization, ExpertId, Specialist, Specialization, VisaType,
};
use thiserror::Error;

/// Rating assumed for records that arrive without one.
pub const DEFAULT_RATING: f64 = 4.5;
/// Success rate assumed for records that arrive without one.
pub const DEFAULT_SUCCESS_RATE: f64 = 95.0;
pub const DEFAULT_CONSULTATION_FEE: &str = "$150";

/// Rating seeded into a blank add-form (the add flow starts slightly above
/// the record default).
const ADD_FORM_RATING: &str = "4.7";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("required fields are missing: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    #[error("fields must be numeric: {}", .0.join(", "))]
    NotNumeric(Vec<&'static str>),
}

fn text_field(raw: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|key| raw.get(key).and_then(Value::as_str))
        .map(str::to_string)
}

fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

fn number_field(raw: &Value, keys: &[&str]) -> Option<f64> {
    keys.iter()
        .find_map(|key| raw.get(key).and_then(numeric_value))
}

fn count_field(raw: &Value, keys: &[&str]) -> Option<u32> {
    number_field(raw, keys).map(|value| value.max(0.0) as u32)
}

/// List-or-text union: arrays are taken in order, plain strings are split on
/// commas, anything else is empty.
fn list_field(raw: &Value, key: &str) -> Vec<String> {
    match raw.get(key) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        Some(Value::String(text)) => split_csv(text),
        _ => Vec::new(),
    }
}

/// Splits comma-joined form text into tokens: trimmed, empties dropped,
/// duplicates and order preserved.
pub fn split_csv(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn join_csv<S: AsRef<str>>(items: &[S]) -> String {
    items
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(", ")
}

fn number_text(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// Updates the entry matching `country` in place, otherwise appends one.
/// Other entries keep their order; a country never appears twice.
pub fn upsert_specialization(
    entries: &mut Vec<CountrySpecialization>,
    country: &Country,
    types: Vec<String>,
) {
    if let Some(existing) = entries.iter_mut().find(|entry| &entry.country == country) {
        existing.types = types;
    } else {
        entries.push(CountrySpecialization {
            country: country.clone(),
            types,
        });
    }
}

pub fn remove_specialization(entries: &mut Vec<CountrySpecialization>, country: &Country) {
    entries.retain(|entry| &entry.country != country);
}

/// Canonical visa record from a raw catalog value. Never fails; absent
/// fields become empty.
pub fn visa_record(raw: &Value) -> VisaType {
    VisaType {
        visa_type: text_field(raw, &["visa_type"]).unwrap_or_default(),
        description: text_field(raw, &["description"]).unwrap_or_default(),
        eligible_applicants: list_field(raw, "eligible_applicants"),
        duration: text_field(raw, &["duration"]).unwrap_or_default(),
        exempted_countries: list_field(raw, "exempted_countries")
            .into_iter()
            .map(Country)
            .collect(),
        restricted_countries: list_field(raw, "restricted_countries")
            .into_iter()
            .map(Country)
            .collect(),
    }
}

fn specialization_record(raw: &Value) -> Specialization {
    let mut visa_types = Vec::new();
    if let Some(entries) = raw.get("visaTypes").and_then(Value::as_array) {
        for entry in entries {
            let Some(country) = entry.get("country").and_then(Value::as_str) else {
                continue;
            };
            upsert_specialization(
                &mut visa_types,
                &Country::from(country),
                list_field(entry, "types"),
            );
        }
    }
    Specialization {
        countries: list_field(raw, "countries").into_iter().map(Country).collect(),
        visa_types,
    }
}

/// Canonical specialist record from a raw catalog value.
///
/// Alias chains: `photo`|`image`, `bio`|`description`,
/// `yearsExperience`|`experience`, `reviewCount`|`reviews`. Absent scalars
/// take the documented defaults; an explicit `verified: false` survives.
pub fn specialist_record(raw: &Value) -> Specialist {
    Specialist {
        id: text_field(raw, &["id"]).map(ExpertId),
        name: text_field(raw, &["name"]).unwrap_or_default(),
        title: text_field(raw, &["title"]).unwrap_or_default(),
        photo: text_field(raw, &["photo", "image"]).unwrap_or_default(),
        bio: text_field(raw, &["bio", "description"]).unwrap_or_default(),
        years_experience: count_field(raw, &["yearsExperience", "experience"]).unwrap_or(0),
        languages: list_field(raw, "languages"),
        rating: number_field(raw, &["rating"]).unwrap_or(DEFAULT_RATING),
        review_count: count_field(raw, &["reviewCount", "reviews"]).unwrap_or(0),
        specialization: raw
            .get("specialization")
            .map(specialization_record)
            .unwrap_or_default(),
        success_rate: number_field(raw, &["successRate"]).unwrap_or(DEFAULT_SUCCESS_RATE),
        consultation_fee: text_field(raw, &["consultationFee"])
            .unwrap_or_else(|| DEFAULT_CONSULTATION_FEE.to_string()),
        availability: text_field(raw, &["availability"])
            .as_deref()
            .and_then(Availability::parse)
            .unwrap_or_default(),
        verified: raw.get("verified").and_then(Value::as_bool).unwrap_or(true),
    }
}

/// Editing buffer for one visa type. List fields are comma-joined text while
/// editing and re-split on submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisaForm {
    pub visa_type: String,
    pub description: String,
    pub eligible_applicants: String,
    pub duration: String,
    pub exempted_countries: String,
    pub restricted_countries: String,
}

impl VisaForm {
    pub fn from_record(record: &VisaType) -> Self {
        Self {
            visa_type: record.visa_type.clone(),
            description: record.description.clone(),
            eligible_applicants: join_csv(&record.eligible_applicants),
            duration: record.duration.clone(),
            exempted_countries: join_csv(&record.exempted_countries),
            restricted_countries: join_csv(&record.restricted_countries),
        }
    }

    pub fn missing_required(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.visa_type.trim().is_empty() {
            missing.push("visa type");
        }
        if self.description.trim().is_empty() {
            missing.push("description");
        }
        if self.duration.trim().is_empty() {
            missing.push("duration");
        }
        if self.eligible_applicants.trim().is_empty() {
            missing.push("eligible applicants");
        }
        missing
    }

    pub fn submission(&self) -> Result<VisaType, ValidationError> {
        let missing = self.missing_required();
        if !missing.is_empty() {
            return Err(ValidationError::MissingFields(missing));
        }
        Ok(VisaType {
            visa_type: self.visa_type.clone(),
            description: self.description.clone(),
            eligible_applicants: split_csv(&self.eligible_applicants),
            duration: self.duration.clone(),
            exempted_countries: split_csv(&self.exempted_countries)
                .into_iter()
                .map(Country)
                .collect(),
            restricted_countries: split_csv(&self.restricted_countries)
                .into_iter()
                .map(Country)
                .collect(),
        })
    }
}

/// Editing buffer for one specialist. Numeric fields stay free text until
/// submission coerces them; non-numeric input is a validation error, never
/// transmitted.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecialistForm {
    pub id: Option<ExpertId>,
    pub name: String,
    pub title: String,
    pub photo: String,
    pub bio: String,
    pub years_experience: String,
    pub languages: String,
    pub rating: String,
    pub review_count: String,
    pub specialization: Specialization,
    pub success_rate: String,
    pub consultation_fee: String,
    pub availability: Availability,
    pub verified: bool,
}

impl Default for SpecialistForm {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            title: String::new(),
            photo: String::new(),
            bio: String::new(),
            years_experience: String::new(),
            languages: String::new(),
            rating: ADD_FORM_RATING.to_string(),
            review_count: "0".to_string(),
            specialization: Specialization::default(),
            success_rate: "95".to_string(),
            consultation_fee: DEFAULT_CONSULTATION_FEE.to_string(),
            availability: Availability::default(),
            verified: true,
        }
    }
}

impl SpecialistForm {
    pub fn from_record(record: &Specialist) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            title: record.title.clone(),
            photo: record.photo.clone(),
            bio: record.bio.clone(),
            years_experience: record.years_experience.to_string(),
            languages: join_csv(&record.languages),
            rating: number_text(record.rating),
            review_count: record.review_count.to_string(),
            specialization: record.specialization.clone(),
            success_rate: number_text(record.success_rate),
            consultation_fee: record.consultation_fee.clone(),
            availability: record.availability,
            verified: record.verified,
        }
    }

    pub fn missing_required(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("name");
        }
        if self.title.trim().is_empty() {
            missing.push("title");
        }
        missing
    }

    pub fn submission(&self) -> Result<Specialist, ValidationError> {
        let missing = self.missing_required();
        if !missing.is_empty() {
            return Err(ValidationError::MissingFields(missing));
        }

        let mut invalid = Vec::new();
        let years_experience = numeric_text(&self.years_experience, "years of experience", &mut invalid);
        let rating = numeric_text(&self.rating, "rating", &mut invalid);
        let review_count = numeric_text(&self.review_count, "review count", &mut invalid);
        let success_rate = numeric_text(&self.success_rate, "success rate", &mut invalid);
        if !invalid.is_empty() {
            return Err(ValidationError::NotNumeric(invalid));
        }

        Ok(Specialist {
            id: self.id.clone(),
            name: self.name.clone(),
            title: self.title.clone(),
            photo: self.photo.clone(),
            bio: self.bio.clone(),
            years_experience: years_experience.max(0.0) as u32,
            languages: split_csv(&self.languages),
            rating,
            review_count: review_count.max(0.0) as u32,
            specialization: self.specialization.clone(),
            success_rate,
            consultation_fee: self.consultation_fee.clone(),
            availability: self.availability,
            verified: self.verified,
        })
    }
}

/// Empty input coerces to zero, as the original form did; anything else must
/// parse as a number or the field is reported invalid.
fn numeric_text(text: &str, field: &'static str, invalid: &mut Vec<&'static str>) -> f64 {
    let text = text.trim();
    if text.is_empty() {
        return 0.0;
    }
    text.parse().unwrap_or_else(|_| {
        invalid.push(field);
        f64::NAN
    })
}

#[cfg(test)]
#[path = "tests/normalize_tests.rs"]
mod tests;
