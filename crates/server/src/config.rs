//! Server configuration

use std::time::Duration;

use tower_sessions::cookie::Key;

const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";

/// Server configuration loaded from environment variables
pub struct Config {
    pub bind_address: String,
    /// Forward unrecognized queries to the completion service
    pub smart_replies: bool,
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub openai_model: String,
    pub completion_timeout: Duration,
    /// Signs the session cookie; needs at least 64 bytes
    pub session_secret: Option<String>,
    pub rate_limit_rps: u32,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            bind_address: std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8080".into()),
            smart_replies: std::env::var("SMART_REPLIES")
                .map(|v| parse_flag(&v))
                .unwrap_or(true),
            openai_api_key: std::env::var("OPENAI_API_KEY")
                .ok()
                .filter(|k| !k.is_empty()),
            openai_base_url: std::env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_OPENAI_BASE_URL.into()),
            openai_model: std::env::var("OPENAI_MODEL")
                .unwrap_or_else(|_| DEFAULT_OPENAI_MODEL.into()),
            completion_timeout: Duration::from_secs(env_number("COMPLETION_TIMEOUT_SECS", 20)),
            session_secret: std::env::var("SESSION_SECRET").ok(),
            rate_limit_rps: env_number("RATE_LIMIT_RPS", 50),
        }
    }

    /// Key for signing session cookies.
    ///
    /// Falls back to a random key when the secret is missing or shorter than
    /// 64 bytes; sessions then do not survive a restart.
    pub fn session_key(&self) -> Key {
        match self.session_secret.as_deref() {
            Some(secret) => Key::try_from(secret.as_bytes()).unwrap_or_else(|_| {
                tracing::warn!("SESSION_SECRET shorter than 64 bytes, using a random key");
                Key::generate()
            }),
            None => Key::generate(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            smart_replies: true,
            openai_api_key: None,
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            openai_model: DEFAULT_OPENAI_MODEL.to_string(),
            completion_timeout: Duration::from_secs(20),
            session_secret: None,
            rate_limit_rps: 50,
        }
    }
}

fn parse_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}

fn env_number<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
