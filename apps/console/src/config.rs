use std::{collections::HashMap, fs};

/// Console settings: defaults, then `console.toml`, then environment
/// overrides; last writer wins.
#[derive(Debug)]
pub struct Settings {
    pub api_endpoint: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_endpoint: "http://127.0.0.1:8080".into(),
        }
    }
}

pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("console.toml") {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(&raw) {
            if let Some(v) = file_cfg.get("api_endpoint") {
                settings.api_endpoint = v.clone();
            }
        }
    }

    if let Ok(v) = std::env::var("CATALOG_API_ENDPOINT") {
        settings.api_endpoint = v;
    }
    if let Ok(v) = std::env::var("APP__API_ENDPOINT") {
        settings.api_endpoint = v;
    }

    settings
}
