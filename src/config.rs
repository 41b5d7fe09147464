//! Command-line and environment configuration

use std::time::Duration;

use clap::Parser;

/// Default quiescence window for the search bar
pub const DEFAULT_DEBOUNCE_MS: u64 = 400;

/// Command-line arguments for tunescout
#[derive(Parser, Debug, Clone)]
#[command(name = "tunescout")]
#[command(about = "Terminal music discovery client")]
#[command(version)]
pub struct Args {
    /// Base URL of the user/auth backend (without port)
    #[arg(long, default_value = "http://localhost", env = "API_BASE_URL")]
    pub api_base_url: String,

    /// Port of the user/auth backend
    #[arg(long, default_value = "8000", env = "BACKEND_PORT")]
    pub backend_port: u16,

    /// Base URL of the music metadata service (without port)
    #[arg(long, default_value = "http://localhost", env = "MUSIC_SERVICE_BASE_URL")]
    pub music_service_base_url: String,

    /// Port of the music metadata service
    #[arg(long, default_value = "8001", env = "MUSIC_SERVICE_PORT")]
    pub music_service_port: u16,

    /// Search debounce window in milliseconds
    #[arg(long, default_value_t = DEFAULT_DEBOUNCE_MS, env = "TUNESCOUT_DEBOUNCE_MS")]
    pub debounce_ms: u64,

    /// Access token sent as a bearer header
    #[arg(long, env = "TUNESCOUT_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    /// Location to open at startup, e.g. `/search?query=abbey%20road`
    #[arg(long, value_name = "PATH")]
    pub open: Option<String>,
}

/// Resolved base URLs, one per logical service
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServiceUrls {
    pub backend: String,
    pub music_service: String,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub urls: ServiceUrls,
    pub debounce: Duration,
    pub access_token: Option<String>,
    pub open: Option<String>,
}

fn join_base(base: &str, port: u16) -> String {
    format!("{}:{}", base.trim_end_matches('/'), port)
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Self {
            urls: ServiceUrls {
                backend: join_base(&args.api_base_url, args.backend_port),
                music_service: join_base(&args.music_service_base_url, args.music_service_port),
            },
            debounce: Duration::from_millis(args.debounce_ms),
            access_token: args.access_token.filter(|t| !t.is_empty()),
            open: args.open,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_local_services() {
        let args = Args::try_parse_from(["tunescout"]).unwrap();
        let config = Config::from(args);

        // Only meaningful when the environment does not override the defaults
        if std::env::var_os("API_BASE_URL").is_none() && std::env::var_os("BACKEND_PORT").is_none() {
            assert_eq!(config.urls.backend, "http://localhost:8000");
        }
        if std::env::var_os("MUSIC_SERVICE_BASE_URL").is_none()
            && std::env::var_os("MUSIC_SERVICE_PORT").is_none()
        {
            assert_eq!(config.urls.music_service, "http://localhost:8001");
        }
    }

    #[test]
    fn flags_override_defaults() {
        let args = Args::try_parse_from([
            "tunescout",
            "--music-service-base-url",
            "https://music.example.com/",
            "--music-service-port",
            "9443",
            "--debounce-ms",
            "250",
            "--access-token",
            "",
            "--open",
            "/album/42",
        ])
        .unwrap();
        let config = Config::from(args);

        assert_eq!(config.urls.music_service, "https://music.example.com:9443");
        assert_eq!(config.debounce, Duration::from_millis(250));
        assert!(config.access_token.is_none());
        assert_eq!(config.open.as_deref(), Some("/album/42"));
    }
}
