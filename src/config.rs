use std::{env, path::PathBuf, time::Duration};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// How long a confirmation stays on screen before the page moves on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delays {
    pub registered: Duration,
    pub logged_in: Duration,
    pub profile_saved: Duration,
    pub session_expired: Duration,
    pub missing_profile: Duration,
    pub banner: Duration,
}

impl Default for Delays {
    fn default() -> Self {
        Self {
            registered: Duration::from_millis(2000),
            logged_in: Duration::from_millis(1500),
            profile_saved: Duration::from_millis(1500),
            session_expired: Duration::from_millis(2000),
            missing_profile: Duration::from_millis(2000),
            banner: Duration::from_millis(5000),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub storage_path: Option<PathBuf>,
    pub delays: Delays,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            storage_path: None,
            delays: Delays::default(),
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url =
            env::var("WELLFIT_BASE_URL").unwrap_or_else(|_| "http://127.0.0.1:5000".to_string());
        let mut config = Self::new(base_url);

        config.storage_path = env::var("WELLFIT_STORAGE_PATH").ok().map(PathBuf::from);

        if let Some(banner) = millis_var("WELLFIT_BANNER_TIMEOUT_MS")? {
            config.delays.banner = banner;
        }

        if let Some(redirect) = millis_var("WELLFIT_REDIRECT_DELAY_MS")? {
            config.delays = Delays {
                registered: redirect,
                logged_in: redirect,
                profile_saved: redirect,
                session_expired: redirect,
                missing_profile: redirect,
                banner: config.delays.banner,
            };
        }

        Ok(config)
    }
}

fn millis_var(name: &str) -> Result<Option<Duration>, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse::<u64>()
            .map(|ms| Some(Duration::from_millis(ms)))
            .map_err(|err| ConfigError::InvalidValue(name.to_string(), err.to_string())),
        Err(_) => Ok(None),
    }
}
