use crate::error::{PlannerError, Result};
use std::fmt;

pub const API_KEY_VAR: &str = "GEMINI_API_KEY";
pub const MODEL_VAR: &str = "GEMINI_MODEL";
pub const BASE_URL_VAR: &str = "GEMINI_BASE_URL";

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Connection settings for the Gemini API, injected from the environment.
#[derive(Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: Option<String>,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: None,
        }
    }

    /// Reads `GEMINI_API_KEY` (required), `GEMINI_MODEL` and `GEMINI_BASE_URL`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_key = lookup(API_KEY_VAR)
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or_else(|| PlannerError::MissingConfig(format!("{} must be set", API_KEY_VAR)))?;

        let model = lookup(MODEL_VAR)
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let base_url = lookup(BASE_URL_VAR)
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty());

        Ok(Self {
            api_key,
            model,
            base_url,
        })
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

impl fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_missing_key_is_an_error() {
        let result = GeminiConfig::from_lookup(lookup_from(&[]));
        assert!(matches!(result, Err(PlannerError::MissingConfig(_))));

        let result = GeminiConfig::from_lookup(lookup_from(&[(API_KEY_VAR, "  ")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_defaults_and_overrides() {
        let config = GeminiConfig::from_lookup(lookup_from(&[(API_KEY_VAR, "secret")])).unwrap();
        assert_eq!(config.model, DEFAULT_MODEL);
        assert!(config.base_url.is_none());

        let config = GeminiConfig::from_lookup(lookup_from(&[
            (API_KEY_VAR, "secret"),
            (MODEL_VAR, "gemini-2.5-flash"),
            (BASE_URL_VAR, "http://localhost:8080/v1beta/"),
        ]))
        .unwrap();
        assert_eq!(config.model, "gemini-2.5-flash");
        assert_eq!(config.base_url.as_deref(), Some("http://localhost:8080/v1beta"));
    }

    #[test]
    fn test_debug_hides_api_key() {
        let config = GeminiConfig::new("super-secret");
        let printed = format!("{:?}", config);
        assert!(!printed.contains("super-secret"));
        assert!(printed.contains("gemini-2.0-flash"));
    }
}
