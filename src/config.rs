use std::time::Duration;

/// Base path used when no API URL is configured at build time.
pub const DEFAULT_API_BASE: &str = "/api";

/// Default per-request timeout for calls through the shared client.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(60_000);

/// Timeout for question requests, which wait on retrieval and generation.
pub const ASK_TIMEOUT: Duration = Duration::from_millis(120_000);

/// Connection settings for the backend, fixed when the bundle is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl ApiConfig {
    /// Build a config from raw variable values, falling back to defaults
    /// for anything missing or malformed.
    pub fn from_vars(base_url: Option<&str>, timeout_ms: Option<&str>) -> Self {
        let base_url = base_url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_API_BASE)
            .to_string();

        let timeout = timeout_ms
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .filter(|ms| *ms > 0)
            .map_or(DEFAULT_TIMEOUT, Duration::from_millis);

        Self { base_url, timeout }
    }

    /// Read `RAGASK_API_URL` and `RAGASK_API_TIMEOUT_MS` as captured at compile time.
    pub fn from_build_env() -> Self {
        Self::from_vars(
            option_env!("RAGASK_API_URL"),
            option_env!("RAGASK_API_TIMEOUT_MS"),
        )
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::from_vars(None, None)
    }
}

/// Which top-level composition the app mounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShellVariant {
    /// Navigation bar with Home and Ask routes
    #[default]
    Router,
    /// Loader shown for a short delay, then Home
    StartupGate,
}

impl ShellVariant {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_ascii_lowercase()) {
            Some(s) if s == "gate" => Self::StartupGate,
            _ => Self::Router,
        }
    }

    /// Read `RAGASK_SHELL` as captured at compile time.
    pub fn from_build_env() -> Self {
        Self::parse(option_env!("RAGASK_SHELL"))
    }
}

/// When this bundle was built (RFC 3339, stamped by the build script).
pub const BUILD_TIME: &str = env!("RAGASK_BUILD_TIME");
