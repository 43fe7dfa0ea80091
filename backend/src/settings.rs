//! Environment-driven application settings.
//!
//! Every variable has a default except `OPENAI_API_KEY`. Values that are
//! present but unparsable are rejected rather than silently replaced, so a
//! typo in deployment configuration fails at startup.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use mockable::Env;
use url::Url;
use zeroize::Zeroizing;

use crate::domain::DEFAULT_ITINERARY_TTL;
use crate::outbound::generator::{
    DEFAULT_OPENAI_BASE_URL, DEFAULT_OPENAI_MODEL, DEFAULT_OPENAI_TIMEOUT, OpenAiSettings,
};

const PORT_ENV: &str = "PORT";
const BIND_HOST_ENV: &str = "BIND_HOST";
const REDIS_URL_ENV: &str = "REDIS_URL";
const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";
const OPENAI_MODEL_ENV: &str = "OPENAI_MODEL";
const OPENAI_BASE_URL_ENV: &str = "OPENAI_BASE_URL";
const OPENAI_TIMEOUT_ENV: &str = "OPENAI_TIMEOUT_SECS";
const CACHE_TTL_ENV: &str = "ITINERARY_CACHE_TTL_SECS";
const COALESCE_ENV: &str = "ITINERARY_COALESCE_REQUESTS";

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_BIND_HOST: &str = "0.0.0.0";
const DEFAULT_REDIS_URL: &str = "redis://localhost:6379";

const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";
const SECONDS_EXPECTED: &str = "a whole number of seconds >= 1";

/// Errors raised while reading settings.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum SettingsError {
    /// A required environment variable is missing or blank.
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Settings for the whole process.
#[derive(Debug, Clone)]
pub struct AppSettings {
    /// Listener address.
    pub bind_addr: SocketAddr,
    /// Redis endpoint for the itinerary cache.
    pub redis_url: String,
    /// Generator connection settings.
    pub openai: OpenAiSettings,
    /// Lifetime of cached itineraries.
    pub cache_ttl: Duration,
    /// Whether concurrent misses on one key share a generation.
    pub coalesce_requests: bool,
}

impl AppSettings {
    /// Read settings from `env`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use itinerary_backend::settings::AppSettings;
    /// use mockable::MockEnv;
    ///
    /// let mut env = MockEnv::new();
    /// env.expect_string().returning(|name| match name {
    ///     "OPENAI_API_KEY" => Some("sk-example".to_owned()),
    ///     "PORT" => Some("9000".to_owned()),
    ///     _ => None,
    /// });
    ///
    /// let settings = AppSettings::from_env(&env).expect("valid settings");
    /// assert_eq!(settings.bind_addr.port(), 9000);
    /// assert_eq!(settings.openai.model, "gpt-4o");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::MissingEnv`] when `OPENAI_API_KEY` is unset or
    /// blank and [`SettingsError::InvalidEnv`] for any unparsable value.
    pub fn from_env<E: Env>(env: &E) -> Result<Self, SettingsError> {
        let host = parse_or(
            env,
            BIND_HOST_ENV,
            DEFAULT_BIND_HOST.parse::<IpAddr>(),
            "an IP address",
            |v| v.parse::<IpAddr>().ok(),
        )?;
        let port = parse_or(env, PORT_ENV, Ok::<_, ()>(DEFAULT_PORT), "a port number", |v| {
            v.parse::<u16>().ok()
        })?;

        Ok(Self {
            bind_addr: SocketAddr::new(host, port),
            redis_url: env
                .string(REDIS_URL_ENV)
                .unwrap_or_else(|| DEFAULT_REDIS_URL.to_owned()),
            openai: openai_from_env(env)?,
            cache_ttl: seconds_or(env, CACHE_TTL_ENV, DEFAULT_ITINERARY_TTL)?,
            coalesce_requests: parse_or(
                env,
                COALESCE_ENV,
                Ok::<_, ()>(true),
                BOOL_EXPECTED,
                parse_bool,
            )?,
        })
    }
}

fn openai_from_env<E: Env>(env: &E) -> Result<OpenAiSettings, SettingsError> {
    let api_key = env
        .string(OPENAI_API_KEY_ENV)
        .filter(|value| !value.trim().is_empty())
        .map(Zeroizing::new)
        .ok_or(SettingsError::MissingEnv {
            name: OPENAI_API_KEY_ENV,
        })?;
    let model = env
        .string(OPENAI_MODEL_ENV)
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_owned());
    let base_url = parse_or(
        env,
        OPENAI_BASE_URL_ENV,
        Url::parse(DEFAULT_OPENAI_BASE_URL),
        "an absolute http(s) URL",
        |v| Url::parse(v).ok().filter(|url| matches!(url.scheme(), "http" | "https")),
    )?;

    Ok(OpenAiSettings {
        api_key,
        model,
        base_url,
        timeout: seconds_or(env, OPENAI_TIMEOUT_ENV, DEFAULT_OPENAI_TIMEOUT)?,
    })
}

/// Parse `name` with `parse`, falling back to `default` when unset.
///
/// A default that fails to build is reported against `name` so a broken
/// constant never panics at startup.
fn parse_or<E, T, D, F>(
    env: &E,
    name: &'static str,
    default: Result<T, D>,
    expected: &'static str,
    parse: F,
) -> Result<T, SettingsError>
where
    E: Env,
    F: FnOnce(&str) -> Option<T>,
{
    match env.string(name) {
        Some(value) => parse(value.trim()).ok_or(SettingsError::InvalidEnv {
            name,
            value,
            expected,
        }),
        None => default.map_err(|_| SettingsError::MissingEnv { name }),
    }
}

fn seconds_or<E: Env>(
    env: &E,
    name: &'static str,
    default: Duration,
) -> Result<Duration, SettingsError> {
    parse_or(env, name, Ok::<_, ()>(default), SECONDS_EXPECTED, |v| {
        v.parse::<u64>()
            .ok()
            .filter(|secs| *secs >= 1)
            .map(Duration::from_secs)
    })
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests;
