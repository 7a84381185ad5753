use std::time::Duration;

use url::Url;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

pub const ENV_BACKEND_URL: &str = "FAKEBUSTER_BACKEND_URL";
pub const ENV_TOP_K: &str = "FAKEBUSTER_TOP_K";
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "FAKEBUSTER_REQUEST_TIMEOUT_SECS";

/// Connection settings for the classification backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub base_url: Url,
    pub connect_timeout: Duration,
    /// `None` leaves an unresponsive backend pending indefinitely.
    pub request_timeout: Option<Duration>,
    pub max_response_bytes: u64,
    /// Forwarded as `top_k` when set; the backend picks its own default otherwise.
    pub top_k: Option<u32>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BACKEND_URL).expect("default backend url is valid"),
            connect_timeout: Duration::from_secs(10),
            request_timeout: None,
            max_response_bytes: 1024 * 1024,
            top_k: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} is not a valid url: {message}")]
    InvalidUrl { var: &'static str, message: String },
    #[error("{var} must be a positive integer, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },
}

impl ClientSettings {
    pub fn with_base_url(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url("base_url", base_url)?,
            ..Self::default()
        })
    }

    /// Reads overrides from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from an arbitrary key lookup; unset or blank keys keep defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut settings = Self::default();

        if let Some(raw) = get(ENV_BACKEND_URL) {
            settings.base_url = parse_base_url(ENV_BACKEND_URL, raw.trim())?;
        }
        if let Some(raw) = get(ENV_TOP_K) {
            settings.top_k = Some(parse_positive(ENV_TOP_K, &raw)?);
        }
        if let Some(raw) = get(ENV_REQUEST_TIMEOUT_SECS) {
            let secs = parse_positive(ENV_REQUEST_TIMEOUT_SECS, &raw)?;
            settings.request_timeout = Some(Duration::from_secs(u64::from(secs)));
        }
        Ok(settings)
    }

    /// Resolves `path` below the base url, keeping any path prefix the base carries.
    pub(crate) fn endpoint(&self, path: &str) -> Url {
        let mut url = self.base_url.clone();
        let joined = format!(
            "{}/{}",
            url.path().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        url.set_path(&joined);
        url
    }
}

fn parse_base_url(var: &'static str, raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|err| ConfigError::InvalidUrl {
        var,
        message: err.to_string(),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidUrl {
            var,
            message: format!("unsupported scheme {}", url.scheme()),
        });
    }
    Ok(url)
}

fn parse_positive(var: &'static str, raw: &str) -> Result<u32, ConfigError> {
    match raw.trim().parse::<u32>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(ConfigError::InvalidNumber {
            var,
            value: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_keeps_base_path_prefix() {
        let settings = ClientSettings::with_base_url("http://host:9000/api/").unwrap();
        assert_eq!(
            settings.endpoint("check-fake-news").as_str(),
            "http://host:9000/api/check-fake-news"
        );

        let settings = ClientSettings::default();
        assert_eq!(
            settings.endpoint("/check-fake-news").as_str(),
            "http://localhost:8000/check-fake-news"
        );
    }
}
