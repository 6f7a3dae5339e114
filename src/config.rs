use crate::ai::client::GenerationParams;
use crate::error::PlannerError;

pub const API_KEY_VAR: &str = "OPENAI_API_KEY";
const BASE_URL_VAR: &str = "OPENAI_BASE_URL";
const MODEL_VAR: &str = "PLANNER_MODEL";
const TARGET_LANGUAGE_VAR: &str = "PLANNER_TARGET_LANGUAGE";
const PLAN_DAYS_VAR: &str = "PLANNER_PLAN_DAYS";

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_TARGET_LANGUAGE: &str = "Persian (Farsi)";
const DEFAULT_PLAN_DAYS: u32 = 30;

const MAX_TOKENS: u32 = 2500;

/// Proxy variables that confuse the HTTP transport when left over from the shell.
pub const PROXY_VARS: [&str; 6] = [
    "HTTP_PROXY",
    "http_proxy",
    "HTTPS_PROXY",
    "https_proxy",
    "ALL_PROXY",
    "all_proxy",
];

/// Process-wide settings, built once at startup and passed by reference.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub plan: GenerationParams,
    pub translation: GenerationParams,
    pub target_language: String,
    pub plan_days: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, PlannerError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. Fails when the API key
    /// is absent or blank.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, PlannerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let api_key = read(API_KEY_VAR).ok_or(PlannerError::MissingCredential(API_KEY_VAR))?;

        let plan_days = match read(PLAN_DAYS_VAR) {
            Some(raw) => match raw.parse::<u32>() {
                Ok(days) if days > 0 => days,
                _ => {
                    log::warn!("Ignoring {PLAN_DAYS_VAR}={raw}, using {DEFAULT_PLAN_DAYS}");
                    DEFAULT_PLAN_DAYS
                }
            },
            None => DEFAULT_PLAN_DAYS,
        };

        Ok(Self {
            api_key,
            base_url: read(BASE_URL_VAR)
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            model: read(MODEL_VAR).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            plan: GenerationParams { temperature: 0.7, max_tokens: MAX_TOKENS },
            translation: GenerationParams { temperature: 0.3, max_tokens: MAX_TOKENS },
            target_language: read(TARGET_LANGUAGE_VAR)
                .unwrap_or_else(|| DEFAULT_TARGET_LANGUAGE.to_string()),
            plan_days,
        })
    }
}

/// Removes proxy settings from the process environment.
///
/// Must run before any other thread is started.
pub fn clear_proxy_env() {
    for var in PROXY_VARS {
        if std::env::var_os(var).is_some() {
            log::debug!("Clearing {var}");
        }
        // SAFETY: called from `main` before the runtime or any other thread exists.
        unsafe { std::env::remove_var(var) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn missing_key_is_fatal() {
        let err = Config::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, PlannerError::MissingCredential(API_KEY_VAR)));
        assert!(err.to_string().contains("OPENAI_API_KEY not found"));
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let err = Config::from_lookup(lookup(&[(API_KEY_VAR, "   ")])).unwrap_err();
        assert!(matches!(err, PlannerError::MissingCredential(_)));
    }

    #[test]
    fn defaults_match_the_two_call_sites() {
        let config = Config::from_lookup(lookup(&[(API_KEY_VAR, "sk-test")])).unwrap();
        assert_eq!(config.api_key, "sk-test");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.plan_days, 30);
        assert_eq!(config.plan.max_tokens, config.translation.max_tokens);
        assert!(config.translation.temperature < config.plan.temperature);
    }

    #[test]
    fn overrides_are_honoured() {
        let config = Config::from_lookup(lookup(&[
            (API_KEY_VAR, "sk-test"),
            (BASE_URL_VAR, "http://localhost:11434/v1/"),
            (MODEL_VAR, "qwen2.5"),
            (TARGET_LANGUAGE_VAR, "Spanish"),
            (PLAN_DAYS_VAR, "14"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "http://localhost:11434/v1");
        assert_eq!(config.model, "qwen2.5");
        assert_eq!(config.target_language, "Spanish");
        assert_eq!(config.plan_days, 14);
    }

    #[test]
    fn proxy_vars_are_cleared() {
        // SAFETY: no other test writes these names, and they are cleared again straight away.
        unsafe {
            std::env::set_var("HTTP_PROXY", "http://127.0.0.1:9");
            std::env::set_var("all_proxy", "socks5://127.0.0.1:9");
        }
        clear_proxy_env();
        for var in PROXY_VARS {
            assert!(std::env::var_os(var).is_none(), "{var} still set");
        }
    }

    #[test]
    fn bad_plan_days_fall_back() {
        let config = Config::from_lookup(lookup(&[(API_KEY_VAR, "k"), (PLAN_DAYS_VAR, "zero")])).unwrap();
        assert_eq!(config.plan_days, DEFAULT_PLAN_DAYS);
    }
}
