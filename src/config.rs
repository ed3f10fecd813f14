use dotenvy::dotenv;
use once_cell::sync::Lazy;
use std::env;
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_BIND: &str = "127.0.0.1:3000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

pub static CONFIG: Lazy<Config> = Lazy::new(|| {
    dotenv().ok(); // Load .env file if present
    Config::from_env()
});

#[derive(Debug, Clone)]
pub struct Config {
    /// Absent keys are not fatal here; the backend client refuses to send
    /// a request without one.
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub bind: String,
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Config {
        let api_key = get_env_opt("GEMINI_API_KEY").or_else(|| get_env_opt("API_KEY"));
        let request_timeout = get_env_opt("GLASSBOX_REQUEST_TIMEOUT_SECS")
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);

        Config {
            api_key,
            model: get_env_or_default("GLASSBOX_MODEL", DEFAULT_MODEL),
            base_url: get_env_or_default("GEMINI_BASE_URL", DEFAULT_BASE_URL),
            bind: get_env_or_default("GLASSBOX_BIND", DEFAULT_BIND),
            request_timeout: Duration::from_secs(request_timeout),
        }
    }
}

// empty values count as unset
fn get_env_opt(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn get_env_or_default(key: &str, default: &str) -> String {
    get_env_opt(key).unwrap_or_else(|| default.to_string())
}
