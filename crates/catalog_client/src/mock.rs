//! Fixed local datasets substituted when a collection's fetch comes back
//! empty and the fallback policy allows it.

use shared::domain::{
    Availability, Country, CountrySpecialization, ExpertId, Specialist, Specialization, VisaType,
};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| (*item).to_string()).collect()
}

fn countries(items: &[&str]) -> Vec<Country> {
    items.iter().copied().map(Country::from).collect()
}

pub fn mock_countries() -> Vec<Country> {
    countries(&[
        "United States",
        "Canada",
        "United Kingdom",
        "Australia",
        "Germany",
        "Singapore",
        "United Arab Emirates",
        "Switzerland",
        "Netherlands",
        "Japan",
        "South Korea",
        "Hong Kong",
        "France",
        "Spain",
        "Italy",
        "Portugal",
        "Brazil",
        "Mexico",
        "Sweden",
        "Norway",
    ])
}

pub fn mock_visa_types(country: &Country) -> Vec<VisaType> {
    match country.as_str() {
        "United States" => vec![
            VisaType {
                visa_type: "B-1/B-2".to_string(),
                description: "Visitor visa for business (B-1) or tourism/pleasure (B-2)"
                    .to_string(),
                eligible_applicants: strings(&[
                    "Business travelers",
                    "Tourists",
                    "Visiting family/friends",
                ]),
                duration: "Up to 6 months, may be extended".to_string(),
                exempted_countries: countries(&[
                    "Canada",
                    "United Kingdom",
                    "Australia",
                    "Japan",
                ]),
                restricted_countries: countries(&["Iran", "North Korea", "Syria"]),
            },
            VisaType {
                visa_type: "F-1".to_string(),
                description: "Student visa for academic studies".to_string(),
                eligible_applicants: strings(&[
                    "Full-time students admitted to US educational institutions",
                ]),
                duration: "Duration of study program plus 60 days".to_string(),
                exempted_countries: Vec::new(),
                restricted_countries: countries(&["Iran", "North Korea", "Syria"]),
            },
            VisaType {
                visa_type: "H-1B".to_string(),
                description: "Temporary work visa for specialty occupations".to_string(),
                eligible_applicants: strings(&[
                    "Professionals with bachelor's degree or higher in specialized fields",
                ]),
                duration: "Up to 6 years (3 years initially, with possible 3-year extension)"
                    .to_string(),
                exempted_countries: Vec::new(),
                restricted_countries: Vec::new(),
            },
        ],
        "Canada" => vec![
            VisaType {
                visa_type: "Visitor Visa".to_string(),
                description:
                    "Temporary visa for tourism, visiting family/friends, or business visits"
                        .to_string(),
                eligible_applicants: strings(&[
                    "Tourists",
                    "Business visitors",
                    "Family visitors",
                ]),
                duration: "Up to 6 months".to_string(),
                exempted_countries: countries(&["United States", "United Kingdom", "Australia"]),
                restricted_countries: Vec::new(),
            },
            VisaType {
                visa_type: "Study Permit".to_string(),
                description:
                    "Permit for international students to study at designated learning institutions"
                        .to_string(),
                eligible_applicants: strings(&[
                    "Students accepted by Canadian educational institutions",
                ]),
                duration: "Length of study program plus 90 days".to_string(),
                exempted_countries: Vec::new(),
                restricted_countries: Vec::new(),
            },
            VisaType {
                visa_type: "Work Permit".to_string(),
                description: "Permit allowing foreign nationals to work temporarily in Canada"
                    .to_string(),
                eligible_applicants: strings(&[
                    "Skilled workers",
                    "Temporary foreign workers",
                    "International graduates",
                ]),
                duration: "Varies based on employment offer, typically 1-3 years".to_string(),
                exempted_countries: Vec::new(),
                restricted_countries: Vec::new(),
            },
        ],
        other => vec![
            VisaType {
                visa_type: "Tourist Visa".to_string(),
                description: format!("Tourist visa for {other}"),
                eligible_applicants: strings(&["Tourists", "Visitors"]),
                duration: "Up to 90 days".to_string(),
                exempted_countries: Vec::new(),
                restricted_countries: Vec::new(),
            },
            VisaType {
                visa_type: "Business Visa".to_string(),
                description: format!("Business visa for {other}"),
                eligible_applicants: strings(&["Business travelers"]),
                duration: "Up to 60 days".to_string(),
                exempted_countries: Vec::new(),
                restricted_countries: Vec::new(),
            },
        ],
    }
}

pub fn mock_experts() -> Vec<Specialist> {
    vec![
        Specialist {
            id: Some(ExpertId::from("exp-001")),
            name: "Sarah Jenkins".to_string(),
            title: "Senior Immigration Attorney".to_string(),
            photo: "https://images.example.com/specialists/sarah-jenkins.jpg".to_string(),
            bio: "Former consular officer with over a decade of experience in employment \
                  and family-based petitions for North America."
                .to_string(),
            years_experience: 12,
            languages: strings(&["English", "Spanish"]),
            rating: 4.9,
            review_count: 214,
            specialization: Specialization {
                countries: countries(&["United States", "Canada"]),
                visa_types: vec![
                    CountrySpecialization {
                        country: Country::from("United States"),
                        types: strings(&["B-1/B-2", "H-1B"]),
                    },
                    CountrySpecialization {
                        country: Country::from("Canada"),
                        types: strings(&["Work Permit"]),
                    },
                ],
            },
            success_rate: 98.0,
            consultation_fee: "$250".to_string(),
            availability: Availability::AvailableThisWeek,
            verified: true,
        },
        Specialist {
            id: Some(ExpertId::from("exp-002")),
            name: "Rajesh Patel".to_string(),
            title: "Visa Consultant".to_string(),
            photo: "https://images.example.com/specialists/rajesh-patel.jpg".to_string(),
            bio: "Specializes in skilled-migration and sponsored work routes across the \
                  Commonwealth."
                .to_string(),
            years_experience: 8,
            languages: strings(&["English", "Hindi", "Gujarati"]),
            rating: 4.6,
            review_count: 143,
            specialization: Specialization {
                countries: countries(&["United Kingdom", "Australia"]),
                visa_types: vec![CountrySpecialization {
                    country: Country::from("Australia"),
                    types: strings(&["Business Visa"]),
                }],
            },
            success_rate: 95.0,
            consultation_fee: "$150".to_string(),
            availability: Availability::AvailableNow,
            verified: true,
        },
        Specialist {
            id: Some(ExpertId::from("exp-003")),
            name: "Elena Petrova".to_string(),
            title: "Student Visa Specialist".to_string(),
            photo: "https://images.example.com/specialists/elena-petrova.jpg".to_string(),
            bio: "Guides international students through admission-linked visa filings and \
                  post-study work options."
                .to_string(),
            years_experience: 5,
            languages: strings(&["English", "Russian"]),
            rating: 4.7,
            review_count: 87,
            specialization: Specialization {
                countries: countries(&["United States"]),
                visa_types: vec![CountrySpecialization {
                    country: Country::from("United States"),
                    types: strings(&["F-1"]),
                }],
            },
            success_rate: 94.0,
            consultation_fee: "$120".to_string(),
            availability: Availability::LimitedAvailability,
            verified: false,
        },
    ]
}
