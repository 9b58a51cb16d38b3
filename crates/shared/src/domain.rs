use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! name_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

name_newtype!(Country);
name_newtype!(ExpertId);

/// One visa type in a country's catalog. `visa_type` is the key within the
/// country and is write-once after creation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VisaType {
    pub visa_type: String,
    pub description: String,
    #[serde(default)]
    pub eligible_applicants: Vec<String>,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub exempted_countries: Vec<Country>,
    #[serde(default)]
    pub restricted_countries: Vec<Country>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Availability {
    #[serde(rename = "Available now")]
    AvailableNow,
    #[serde(rename = "Available this week")]
    AvailableThisWeek,
    #[default]
    #[serde(rename = "Available next week")]
    AvailableNextWeek,
    #[serde(rename = "Limited availability")]
    LimitedAvailability,
    #[serde(rename = "Fully booked")]
    FullyBooked,
}

impl Availability {
    pub fn label(self) -> &'static str {
        match self {
            Self::AvailableNow => "Available now",
            Self::AvailableThisWeek => "Available this week",
            Self::AvailableNextWeek => "Available next week",
            Self::LimitedAvailability => "Limited availability",
            Self::FullyBooked => "Fully booked",
        }
    }

    pub fn parse(text: &str) -> Option<Self> {
        match text.trim() {
            "Available now" => Some(Self::AvailableNow),
            "Available this week" => Some(Self::AvailableThisWeek),
            "Available next week" => Some(Self::AvailableNextWeek),
            "Limited availability" => Some(Self::LimitedAvailability),
            "Fully booked" => Some(Self::FullyBooked),
            _ => None,
        }
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Visa types a specialist handles for one country. At most one entry per
/// country may appear in a specialist's `visa_types` sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountrySpecialization {
    pub country: Country,
    #[serde(default)]
    pub types: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Specialization {
    #[serde(default)]
    pub countries: Vec<Country>,
    #[serde(default, rename = "visaTypes")]
    pub visa_types: Vec<CountrySpecialization>,
}

/// A visa specialist as stored by the backend. `id` is server-assigned and
/// absent until the record is first created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Specialist {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ExpertId>,
    pub name: String,
    pub title: String,
    #[serde(default)]
    pub photo: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub years_experience: u32,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default = "default_rating")]
    pub rating: f64,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default)]
    pub specialization: Specialization,
    #[serde(default = "default_success_rate")]
    pub success_rate: f64,
    #[serde(default)]
    pub consultation_fee: String,
    #[serde(default)]
    pub availability: Availability,
    #[serde(default = "default_verified")]
    pub verified: bool,
}

fn default_rating() -> f64 {
    4.5
}

fn default_success_rate() -> f64 {
    95.0
}

fn default_verified() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn specialist_wire_form_is_camel_case() {
        let specialist = Specialist {
            id: Some(ExpertId::from("exp-7")),
            name: "Ana Silva".to_string(),
            title: "Immigration Attorney".to_string(),
            photo: String::new(),
            bio: String::new(),
            years_experience: 9,
            languages: vec!["English".to_string(), "Portuguese".to_string()],
            rating: 4.8,
            review_count: 31,
            specialization: Specialization::default(),
            success_rate: 97.0,
            consultation_fee: "$180".to_string(),
            availability: Availability::AvailableNow,
            verified: true,
        };

        let wire = serde_json::to_value(&specialist).expect("serialize");
        assert_eq!(wire["yearsExperience"], 9);
        assert_eq!(wire["reviewCount"], 31);
        assert_eq!(wire["successRate"], 97.0);
        assert_eq!(wire["consultationFee"], "$180");
        assert_eq!(wire["availability"], "Available now");
    }

    #[test]
    fn specialist_deserializes_with_defaults() {
        let raw = serde_json::json!({ "name": "Lee Min", "title": "Consultant" });
        let specialist: Specialist = serde_json::from_value(raw).expect("deserialize");
        assert_eq!(specialist.id, None);
        assert_eq!(specialist.rating, 4.5);
        assert_eq!(specialist.success_rate, 95.0);
        assert_eq!(specialist.availability, Availability::AvailableNextWeek);
        assert!(specialist.verified);
    }

    #[test]
    fn specialization_round_trips_visa_types_key() {
        let specialization = Specialization {
            countries: vec![Country::from("Canada")],
            visa_types: vec![CountrySpecialization {
                country: Country::from("Canada"),
                types: vec!["Study Permit".to_string()],
            }],
        };
        let wire = serde_json::to_value(&specialization).expect("serialize");
        assert!(wire.get("visaTypes").is_some());
        let back: Specialization = serde_json::from_value(wire).expect("deserialize");
        assert_eq!(back, specialization);
    }
}
