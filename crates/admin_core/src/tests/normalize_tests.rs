use super::*;
use serde_json::json;

#[test]
fn clean_array_fields_survive_the_form_round_trip() {
    let raw = json!({
        "visa_type": "B-1/B-2",
        "description": "Visitor visa",
        "eligible_applicants": ["Business travelers", "Tourists", "Visiting family/friends"],
        "duration": "Up to 6 months",
        "exempted_countries": ["Canada", "Japan"],
        "restricted_countries": []
    });

    let record = visa_record(&raw);
    let form = VisaForm::from_record(&record);
    assert_eq!(
        form.eligible_applicants,
        "Business travelers, Tourists, Visiting family/friends"
    );

    let payload = form.submission().expect("valid form");
    assert_eq!(payload.eligible_applicants, record.eligible_applicants);
    assert_eq!(payload.exempted_countries, record.exempted_countries);
}

#[test]
fn string_valued_list_fields_are_split_at_the_boundary() {
    let raw = json!({
        "visa_type": "F-1",
        "description": "Student visa",
        "eligible_applicants": "Full-time students,  Exchange visitors",
        "duration": "Program length"
    });

    let record = visa_record(&raw);
    assert_eq!(
        record.eligible_applicants,
        vec!["Full-time students".to_string(), "Exchange visitors".to_string()]
    );
    assert!(record.exempted_countries.is_empty());
}

#[test]
fn splitting_preserves_duplicates_and_order() {
    assert_eq!(
        split_csv("Tourists, Students , Tourists,, "),
        vec![
            "Tourists".to_string(),
            "Students".to_string(),
            "Tourists".to_string()
        ]
    );
}

#[test]
fn specialist_aliases_resolve_to_canonical_fields() {
    let raw = json!({
        "id": "exp-9",
        "name": "Marta Kovacs",
        "title": "Consultant",
        "image": "https://example.com/marta.jpg",
        "description": "Schengen specialist",
        "experience": 7,
        "reviews": 52,
        "languages": ["Hungarian", "English"]
    });

    let record = specialist_record(&raw);
    assert_eq!(record.photo, "https://example.com/marta.jpg");
    assert_eq!(record.bio, "Schengen specialist");
    assert_eq!(record.years_experience, 7);
    assert_eq!(record.review_count, 52);
    assert_eq!(record.id, Some(ExpertId::from("exp-9")));
}

#[test]
fn primary_keys_win_over_their_aliases() {
    let raw = json!({
        "name": "Marta Kovacs",
        "title": "Consultant",
        "photo": "primary.jpg",
        "image": "legacy.jpg",
        "bio": "primary bio",
        "description": "legacy bio"
    });

    let record = specialist_record(&raw);
    assert_eq!(record.photo, "primary.jpg");
    assert_eq!(record.bio, "primary bio");
}

#[test]
fn absent_scalars_take_documented_defaults() {
    let record = specialist_record(&json!({ "name": "Lee Min", "title": "Advisor" }));
    assert_eq!(record.rating, DEFAULT_RATING);
    assert_eq!(record.review_count, 0);
    assert_eq!(record.success_rate, DEFAULT_SUCCESS_RATE);
    assert_eq!(record.consultation_fee, DEFAULT_CONSULTATION_FEE);
    assert_eq!(record.availability, Availability::AvailableNextWeek);
    assert!(record.verified);
}

#[test]
fn explicit_unverified_flag_survives_defaulting() {
    let record = specialist_record(&json!({
        "name": "Lee Min",
        "title": "Advisor",
        "verified": false
    }));
    assert!(!record.verified);
}

#[test]
fn numeric_strings_are_accepted_for_numeric_fields() {
    let record = specialist_record(&json!({
        "name": "Lee Min",
        "title": "Advisor",
        "yearsExperience": "11",
        "rating": "4.2"
    }));
    assert_eq!(record.years_experience, 11);
    assert_eq!(record.rating, 4.2);
}

#[test]
fn duplicate_specialization_entries_collapse_on_ingest() {
    let record = specialist_record(&json!({
        "name": "Lee Min",
        "title": "Advisor",
        "specialization": {
            "countries": ["Canada"],
            "visaTypes": [
                { "country": "Canada", "types": ["Visitor Visa"] },
                { "country": "Canada", "types": ["Study Permit", "Work Permit"] }
            ]
        }
    }));
    assert_eq!(record.specialization.visa_types.len(), 1);
    assert_eq!(
        record.specialization.visa_types[0].types,
        vec!["Study Permit".to_string(), "Work Permit".to_string()]
    );
}

#[test]
fn upsert_replaces_in_place_without_reordering_other_entries() {
    let mut entries = vec![
        CountrySpecialization {
            country: Country::from("United States"),
            types: vec!["B-1/B-2".to_string()],
        },
        CountrySpecialization {
            country: Country::from("Canada"),
            types: vec!["Visitor Visa".to_string()],
        },
        CountrySpecialization {
            country: Country::from("Japan"),
            types: vec!["Tourist Visa".to_string()],
        },
    ];

    upsert_specialization(
        &mut entries,
        &Country::from("Canada"),
        vec!["Study Permit".to_string()],
    );

    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].country, Country::from("United States"));
    assert_eq!(entries[1].country, Country::from("Canada"));
    assert_eq!(entries[1].types, vec!["Study Permit".to_string()]);
    assert_eq!(entries[2].country, Country::from("Japan"));
}

#[test]
fn upsert_appends_unknown_countries() {
    let mut entries = Vec::new();
    upsert_specialization(
        &mut entries,
        &Country::from("France"),
        vec!["Tourist Visa".to_string()],
    );
    assert_eq!(entries.len(), 1);

    remove_specialization(&mut entries, &Country::from("France"));
    assert!(entries.is_empty());
}

#[test]
fn missing_visa_fields_are_reported_by_name() {
    let form = VisaForm {
        visa_type: String::new(),
        description: "Visitor visa".to_string(),
        eligible_applicants: String::new(),
        duration: "6 months".to_string(),
        exempted_countries: String::new(),
        restricted_countries: String::new(),
    };

    let err = form.submission().expect_err("must fail");
    assert_eq!(
        err,
        ValidationError::MissingFields(vec!["visa type", "eligible applicants"])
    );
    assert_eq!(
        err.to_string(),
        "required fields are missing: visa type, eligible applicants"
    );
}

#[test]
fn non_numeric_specialist_input_is_a_validation_error() {
    let form = SpecialistForm {
        name: "Lee Min".to_string(),
        title: "Advisor".to_string(),
        rating: "excellent".to_string(),
        review_count: "many".to_string(),
        ..SpecialistForm::default()
    };

    let err = form.submission().expect_err("must fail");
    assert_eq!(
        err,
        ValidationError::NotNumeric(vec!["rating", "review count"])
    );
}

#[test]
fn empty_numeric_input_coerces_to_zero() {
    let form = SpecialistForm {
        name: "Lee Min".to_string(),
        title: "Advisor".to_string(),
        years_experience: String::new(),
        rating: "4.5".to_string(),
        ..SpecialistForm::default()
    };

    let payload = form.submission().expect("valid form");
    assert_eq!(payload.years_experience, 0);
}

#[test]
fn blank_add_form_carries_the_seeded_defaults() {
    let form = SpecialistForm::default();
    assert_eq!(form.rating, "4.7");
    assert_eq!(form.review_count, "0");
    assert_eq!(form.success_rate, "95");
    assert_eq!(form.consultation_fee, "$150");
    assert_eq!(form.availability, Availability::AvailableNextWeek);
    assert!(form.verified);
}

#[test]
fn languages_round_trip_through_the_specialist_form() {
    let record = specialist_record(&json!({
        "name": "Marta Kovacs",
        "title": "Consultant",
        "languages": ["Hungarian", "English", "German"]
    }));
    let form = SpecialistForm::from_record(&record);
    assert_eq!(form.languages, "Hungarian, English, German");

    let payload = form.submission().expect("valid form");
    assert_eq!(payload.languages, record.languages);
}
