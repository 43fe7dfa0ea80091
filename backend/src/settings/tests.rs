//! Unit tests for environment-driven settings.

use std::collections::HashMap;

use mockable::MockEnv;
use rstest::rstest;

use super::*;

fn mock_env(pairs: &[(&str, &str)]) -> MockEnv {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
        .collect();
    let mut env = MockEnv::new();
    env.expect_string()
        .times(0..)
        .returning(move |key| vars.get(key).cloned());
    env
}

fn expect_error(result: Result<AppSettings, SettingsError>, label: &str) -> SettingsError {
    match result {
        Ok(_) => panic!("{label}"),
        Err(error) => error,
    }
}

#[test]
fn defaults_apply_when_only_api_key_is_set() {
    let env = mock_env(&[(OPENAI_API_KEY_ENV, "sk-test")]);

    let settings = AppSettings::from_env(&env).expect("defaults are valid");

    assert_eq!(settings.bind_addr, "0.0.0.0:8000".parse().expect("socket addr"));
    assert_eq!(settings.redis_url, "redis://localhost:6379");
    assert_eq!(settings.openai.api_key.as_str(), "sk-test");
    assert_eq!(settings.openai.model, "gpt-4o");
    assert_eq!(settings.openai.base_url.as_str(), "https://api.openai.com/v1");
    assert_eq!(settings.openai.timeout, Duration::from_secs(120));
    assert_eq!(settings.cache_ttl, Duration::from_secs(3600));
    assert!(settings.coalesce_requests);
}

#[test]
fn explicit_values_override_defaults() {
    let env = mock_env(&[
        (OPENAI_API_KEY_ENV, "sk-test"),
        (PORT_ENV, "9100"),
        (BIND_HOST_ENV, "127.0.0.1"),
        (REDIS_URL_ENV, "redis://cache:6380/2"),
        (OPENAI_MODEL_ENV, "gpt-4o-mini"),
        (OPENAI_BASE_URL_ENV, "http://localhost:4010/v1"),
        (OPENAI_TIMEOUT_ENV, "30"),
        (CACHE_TTL_ENV, "600"),
        (COALESCE_ENV, "no"),
    ]);

    let settings = AppSettings::from_env(&env).expect("overrides are valid");

    assert_eq!(settings.bind_addr, "127.0.0.1:9100".parse().expect("socket addr"));
    assert_eq!(settings.redis_url, "redis://cache:6380/2");
    assert_eq!(settings.openai.model, "gpt-4o-mini");
    assert_eq!(settings.openai.base_url.as_str(), "http://localhost:4010/v1");
    assert_eq!(settings.openai.timeout, Duration::from_secs(30));
    assert_eq!(settings.cache_ttl, Duration::from_secs(600));
    assert!(!settings.coalesce_requests);
}

#[rstest]
#[case::unset(&[])]
#[case::blank(&[(OPENAI_API_KEY_ENV, "   ")])]
fn api_key_is_required(#[case] pairs: &[(&str, &str)]) {
    let error = expect_error(AppSettings::from_env(&mock_env(pairs)), "missing key must fail");
    assert_eq!(
        error,
        SettingsError::MissingEnv {
            name: OPENAI_API_KEY_ENV
        }
    );
}

#[rstest]
#[case::port_not_numeric(PORT_ENV, "eighty")]
#[case::port_out_of_range(PORT_ENV, "70000")]
#[case::host_not_ip(BIND_HOST_ENV, "localhost:8000")]
#[case::base_url_relative(OPENAI_BASE_URL_ENV, "/v1")]
#[case::base_url_wrong_scheme(OPENAI_BASE_URL_ENV, "ftp://example.test")]
#[case::timeout_zero(OPENAI_TIMEOUT_ENV, "0")]
#[case::ttl_negative(CACHE_TTL_ENV, "-5")]
#[case::ttl_fractional(CACHE_TTL_ENV, "1.5")]
#[case::coalesce_unknown(COALESCE_ENV, "sometimes")]
fn invalid_values_are_rejected(#[case] name: &'static str, #[case] value: &str) {
    let env = mock_env(&[(OPENAI_API_KEY_ENV, "sk-test"), (name, value)]);

    let error = expect_error(AppSettings::from_env(&env), "invalid value must fail");

    match error {
        SettingsError::InvalidEnv {
            name: reported,
            value: reported_value,
            ..
        } => {
            assert_eq!(reported, name);
            assert_eq!(reported_value, value);
        }
        other => panic!("expected InvalidEnv, got {other:?}"),
    }
}

#[rstest]
#[case("1", true)]
#[case("TRUE", true)]
#[case("y", true)]
#[case("0", false)]
#[case("False", false)]
#[case("n", false)]
fn coalescing_toggle_accepts_common_spellings(#[case] value: &str, #[case] expected: bool) {
    let env = mock_env(&[(OPENAI_API_KEY_ENV, "sk-test"), (COALESCE_ENV, value)]);
    let settings = AppSettings::from_env(&env).expect("valid toggle");
    assert_eq!(settings.coalesce_requests, expected);
}

#[test]
fn errors_never_echo_the_api_key() {
    let env = mock_env(&[(OPENAI_API_KEY_ENV, "sk-secret"), (PORT_ENV, "bad")]);
    let error = expect_error(AppSettings::from_env(&env), "bad port must fail");
    assert!(!error.to_string().contains("sk-secret"));
}
