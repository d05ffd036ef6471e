use std::env;
use std::time::Duration;
use crate::error::{AppError, Result};
use dotenvy::dotenv;

pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image-preview";

#[derive(Clone, Debug)]
pub struct Config {
    /// `None` when no credential is configured; dispatch then fails up front.
    pub api_key: Option<String>,
    pub text_model: String,
    pub image_model: String,
    pub request_timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            request_timeout: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load .env file if it exists, ignore if it doesn't
        let _ = dotenv();

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let api_key = non_blank("GEMINI_API_KEY").or_else(|| non_blank("API_KEY"));
        if api_key.is_none() {
            log::warn!("GEMINI_API_KEY is not set; every request will fail until it is configured");
        }

        let text_model = non_blank("GEMINI_TEXT_MODEL")
            .unwrap_or_else(|| DEFAULT_TEXT_MODEL.to_string());
        let image_model = non_blank("GEMINI_IMAGE_MODEL")
            .unwrap_or_else(|| DEFAULT_IMAGE_MODEL.to_string());

        let request_timeout = match non_blank("GEMINI_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| {
                    AppError::config(format!("GEMINI_TIMEOUT_SECS must be a whole number, got {raw:?}"))
                })?;
                if secs == 0 {
                    return Err(AppError::config("GEMINI_TIMEOUT_SECS must be greater than zero"));
                }
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        Ok(Self {
            api_key,
            text_model,
            image_model,
            request_timeout,
        })
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_text_model(mut self, model: impl Into<String>) -> Self {
        self.text_model = model.into();
        self
    }

    pub fn with_image_model(mut self, model: impl Into<String>) -> Self {
        self.image_model = model.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn defaults_when_only_key_is_set() {
        let config = Config::from_lookup(lookup(&[("GEMINI_API_KEY", "secret")])).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert_eq!(config.text_model, DEFAULT_TEXT_MODEL);
        assert_eq!(config.image_model, DEFAULT_IMAGE_MODEL);
        assert!(config.request_timeout.is_none());
    }

    #[test]
    fn missing_key_is_not_a_load_error() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert!(config.api_key.is_none());
    }

    #[test]
    fn blank_key_counts_as_missing_and_alias_is_used() {
        let config = Config::from_lookup(lookup(&[("GEMINI_API_KEY", "  "), ("API_KEY", "alias")])).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("alias"));
    }

    #[test]
    fn model_overrides_and_timeout() {
        let config = Config::from_lookup(lookup(&[
            ("GEMINI_TEXT_MODEL", "gemini-2.5-pro"),
            ("GEMINI_IMAGE_MODEL", "imagen-x"),
            ("GEMINI_TIMEOUT_SECS", "30"),
        ]))
        .unwrap();
        assert_eq!(config.text_model, "gemini-2.5-pro");
        assert_eq!(config.image_model, "imagen-x");
        assert_eq!(config.request_timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn bad_timeout_is_rejected() {
        assert!(matches!(
            Config::from_lookup(lookup(&[("GEMINI_TIMEOUT_SECS", "soon")])),
            Err(AppError::Config(_))
        ));
        assert!(matches!(
            Config::from_lookup(lookup(&[("GEMINI_TIMEOUT_SECS", "0")])),
            Err(AppError::Config(_))
        ));
    }
}
