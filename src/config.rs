use std::path::PathBuf;
use std::time::Duration;

use actix_web::cookie::Key;

pub const DEFAULT_BASE_URL: &str = "https://router.huggingface.co/v1";
pub const DEFAULT_MODEL: &str = "openai/gpt-oss-120b:cerebras";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Set HF_ROUTER_API_KEY or OPENAI_API_KEY as environment variable")]
    MissingApiKey,

    #[error("Invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Settings for the remote chat completion service.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
}

impl LlmConfig {
    /// The API key is only needed once generation starts, so its absence is
    /// reported here rather than at startup.
    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        self.api_key.as_deref().ok_or(ConfigError::MissingApiKey)
    }
}

/// Process-wide configuration, read once at startup and shared as `web::Data`.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub work_dir: PathBuf,
    pub max_upload_bytes: usize,
    pub secret_key: Option<String>,
    pub llm: LlmConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let port = parse_or(get("PORT"), "PORT", 5000u16)?;
        let max_upload_mb = parse_or(get("MAX_UPLOAD_MB"), "MAX_UPLOAD_MB", 50usize)?;
        let timeout_secs = parse_or(get("LLM_TIMEOUT_SECS"), "LLM_TIMEOUT_SECS", 300u64)?;

        let work_dir = get("UPLOAD_FOLDER")
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join("proposal-reports"));

        let llm = LlmConfig {
            api_key: get("HF_ROUTER_API_KEY").or_else(|| get("OPENAI_API_KEY")),
            base_url: get("LLM_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: get("LLM_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            timeout: Duration::from_secs(timeout_secs),
        };

        Ok(Self {
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            work_dir,
            max_upload_bytes: max_upload_mb * 1024 * 1024,
            secret_key: get("SECRET_KEY"),
            llm,
        })
    }

    /// Cookie signing key. Falls back to a random key (sessions lost on restart).
    pub fn session_key(&self) -> Key {
        match &self.secret_key {
            Some(val) if val.len() >= 64 => {
                log::info!("Using SECRET_KEY from environment");
                Key::from(val.as_bytes())
            }
            Some(val) => {
                log::warn!("SECRET_KEY too short ({} bytes, need 64+) - generating random key", val.len());
                Key::generate()
            }
            None => {
                log::warn!("No SECRET_KEY set - generating random key (sessions lost on restart)");
                Key::generate()
            }
        }
    }
}

fn parse_or<T: std::str::FromStr>(
    raw: Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}
