use reqwest::Url;
use std::{env, fmt};

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:5000";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub backend_url: Url,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = env::var("PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);
        let backend_url = resolve_backend_url(env::var("TRACKER_BACKEND_URL").ok().as_deref())?;

        Ok(Self { port, backend_url })
    }
}

pub fn resolve_backend_url(value: Option<&str>) -> Result<Url, ConfigError> {
    let raw = value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(DEFAULT_BACKEND_URL);
    let url = Url::parse(raw).map_err(|err| ConfigError(format!("invalid backend url {raw:?}: {err}")))?;

    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(ConfigError(format!("backend url must be an absolute http(s) url, got {raw:?}")));
    }
    Ok(url)
}

#[derive(Debug)]
pub struct ConfigError(String);

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}
