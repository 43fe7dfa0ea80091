//! Backend entry-point: reads settings, wires the itinerary cache and serves
//! the REST API.

mod server;

use actix_web::web;
use mockable::{DefaultEnv, Env};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use itinerary_backend::inbound::http::health::HealthState;
use itinerary_backend::settings::AppSettings;
use server::{ServerConfig, build_itinerary_resolver, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    load_dotenv();
    let settings = load_settings(&DefaultEnv::new())?;
    let config = ServerConfig::new(settings.bind_addr)
        .with_itinerary_resolver(build_itinerary_resolver(&settings)?);
    info!(bind_addr = %config.bind_addr(), "starting itinerary backend");

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    server.await
}

/// Load a `.env` file into the process environment when one is present.
///
/// Variables already set take precedence over the file.
fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => info!(path = %path.display(), "loaded environment file"),
        Err(error) if error.not_found() => {}
        Err(error) => warn!(%error, "ignoring unreadable environment file"),
    }
}

/// Read settings from `env`, surfacing configuration errors as I/O errors.
fn load_settings<E: Env>(env: &E) -> std::io::Result<AppSettings> {
    AppSettings::from_env(env).map_err(std::io::Error::other)
}

#[cfg(test)]
mod tests {
    use mockable::MockEnv;

    use super::*;

    fn env_with(api_key: Option<&'static str>) -> MockEnv {
        let mut env = MockEnv::new();
        env.expect_string().times(0..).returning(move |name| match name {
            "OPENAI_API_KEY" => api_key.map(str::to_owned),
            _ => None,
        });
        env
    }

    #[test]
    fn settings_load_with_only_an_api_key() {
        let settings = load_settings(&env_with(Some("sk-test"))).expect("settings load");
        assert_eq!(settings.bind_addr.port(), 8000);
    }

    #[test]
    fn missing_api_key_stops_startup() {
        let error = load_settings(&env_with(None)).expect_err("startup must fail");
        assert!(error.to_string().contains("OPENAI_API_KEY"));
    }

    #[test]
    fn absent_env_file_is_tolerated() {
        load_dotenv();
    }

    #[test]
    fn process_environment_is_readable() {
        // Only checks that the production reader is wired; the key may be unset.
        let _ = load_settings(&DefaultEnv::new());
    }
}
