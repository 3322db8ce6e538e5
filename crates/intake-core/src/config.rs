//! Configuration module
//!
//! Settings are read from the environment (after loading `.env`), optional
//! numeric values fall back to defaults when unparseable, and the result is
//! checked by [`Config::validate`].

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

const DEFAULT_PORT: u16 = 3001;
const DEFAULT_UPLOAD_DIR: &str = "uploads";
const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1";
const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
const DEFAULT_GEMINI_TIMEOUT_SECS: u64 = 120;
const MAX_JSON_BODY_MB: usize = 50;
const MAX_VIDEO_SIZE_MB: usize = 100;
const VIDEO_ALLOWED_EXTENSIONS: &str = "mp4,avi,mov,wmv,flv,mkv,webm";

/// How the four generation calls of one upload are issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenerationMode {
    /// All kinds awaited together
    #[default]
    Concurrent,
    /// One kind after another, in report order
    Sequential,
}

impl FromStr for GenerationMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "concurrent" | "parallel" => Ok(GenerationMode::Concurrent),
            "sequential" => Ok(GenerationMode::Sequential),
            other => Err(anyhow::anyhow!(
                "GENERATION_MODE must be 'concurrent' or 'sequential', got '{}'",
                other
            )),
        }
    }
}

/// Connection settings for the generative-language API.
#[derive(Clone, Debug)]
pub struct GenerationConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl GenerationConfig {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            timeout_secs: DEFAULT_GEMINI_TIMEOUT_SECS,
        }
    }
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub environment: String,
    pub cors_origins: Vec<String>,
    pub upload_dir: PathBuf,
    pub generation: GenerationConfig,
    pub generation_mode: GenerationMode,
    pub max_json_body_bytes: usize,
    pub max_video_size_bytes: usize,
    pub video_allowed_extensions: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let environment = lookup("ENVIRONMENT")
            .or_else(|| lookup("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let cors_origins = var("CORS_ORIGINS", "*")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let api_key = lookup("GEMINI_API_KEY")
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| anyhow::anyhow!("GEMINI_API_KEY must be set"))?;

        let generation = GenerationConfig {
            api_key,
            base_url: var("GEMINI_BASE_URL", DEFAULT_GEMINI_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
            model: var("GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
            timeout_secs: var("GEMINI_TIMEOUT_SECS", &DEFAULT_GEMINI_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(DEFAULT_GEMINI_TIMEOUT_SECS),
        };

        let config = Config {
            server_port: var("PORT", &DEFAULT_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            environment,
            cors_origins,
            upload_dir: PathBuf::from(var("UPLOAD_DIR", DEFAULT_UPLOAD_DIR)),
            generation,
            generation_mode: var("GENERATION_MODE", "concurrent").parse()?,
            max_json_body_bytes: megabytes(&lookup, "MAX_JSON_BODY_MB", MAX_JSON_BODY_MB)?,
            max_video_size_bytes: megabytes(&lookup, "MAX_VIDEO_SIZE_MB", MAX_VIDEO_SIZE_MB)?,
            video_allowed_extensions: var("VIDEO_ALLOWED_EXTENSIONS", VIDEO_ALLOWED_EXTENSIONS)
                .split(',')
                .map(|s| s.trim().trim_start_matches('.').to_lowercase())
                .filter(|s| !s.is_empty())
                .collect(),
        };

        config.validate()?;
        Ok(config)
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.is_production() && self.cors_origins.iter().any(|o| o == "*") {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        if !self.generation.base_url.starts_with("http://")
            && !self.generation.base_url.starts_with("https://")
        {
            return Err(anyhow::anyhow!(
                "GEMINI_BASE_URL must be an http(s) URL"
            ));
        }

        if self.generation.timeout_secs == 0 {
            return Err(anyhow::anyhow!("GEMINI_TIMEOUT_SECS must be greater than 0"));
        }

        if self.max_json_body_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_JSON_BODY_MB must be greater than 0"));
        }

        if self.max_video_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_VIDEO_SIZE_MB must be greater than 0"));
        }

        if self.video_allowed_extensions.is_empty() {
            return Err(anyhow::anyhow!(
                "VIDEO_ALLOWED_EXTENSIONS must list at least one extension"
            ));
        }

        Ok(())
    }
}

/// Read a size in megabytes and convert it to bytes.
///
/// Unparseable values fall back to `default`; values that overflow `usize` are an error.
fn megabytes<F>(lookup: &F, key: &str, default: usize) -> Result<usize, anyhow::Error>
where
    F: Fn(&str) -> Option<String>,
{
    let mb = lookup(key)
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(default);
    mb.checked_mul(1024 * 1024)
        .ok_or_else(|| anyhow::anyhow!("{} is too large: {}", key, mb))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, anyhow::Error> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("GEMINI_API_KEY", "key")]).unwrap();
        assert_eq!(config.server_port, 3001);
        assert_eq!(config.upload_dir, PathBuf::from("uploads"));
        assert_eq!(config.generation.model, "gemini-1.5-flash");
        assert_eq!(
            config.generation.base_url,
            "https://generativelanguage.googleapis.com/v1"
        );
        assert_eq!(config.generation_mode, GenerationMode::Concurrent);
        assert_eq!(config.max_json_body_bytes, 50 * 1024 * 1024);
        assert_eq!(config.max_video_size_bytes, 100 * 1024 * 1024);
        assert_eq!(config.video_allowed_extensions.len(), 7);
        assert!(!config.is_production());
    }

    #[test]
    fn test_missing_api_key_fails() {
        let err = load(&[]).unwrap_err();
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }

    #[test]
    fn test_unparseable_numbers_fall_back() {
        let config = load(&[
            ("GEMINI_API_KEY", "key"),
            ("MAX_VIDEO_SIZE_MB", "lots"),
            ("GEMINI_TIMEOUT_SECS", "soon"),
        ])
        .unwrap();
        assert_eq!(config.max_video_size_bytes, 100 * 1024 * 1024);
        assert_eq!(config.generation.timeout_secs, 120);
    }

    #[test]
    fn test_size_limits_are_bounded() {
        let huge = usize::MAX.to_string();
        let err = load(&[("GEMINI_API_KEY", "key"), ("MAX_VIDEO_SIZE_MB", &huge)]).unwrap_err();
        assert!(err.to_string().contains("MAX_VIDEO_SIZE_MB"));

        let err = load(&[("GEMINI_API_KEY", "key"), ("MAX_JSON_BODY_MB", &huge)]).unwrap_err();
        assert!(err.to_string().contains("MAX_JSON_BODY_MB"));

        let err = load(&[("GEMINI_API_KEY", "key"), ("MAX_VIDEO_SIZE_MB", "0")]).unwrap_err();
        assert!(err.to_string().contains("greater than 0"));

        let err = load(&[("GEMINI_API_KEY", "key"), ("MAX_JSON_BODY_MB", "0")]).unwrap_err();
        assert!(err.to_string().contains("greater than 0"));
    }

    #[test]
    fn test_invalid_port_fails() {
        assert!(load(&[("GEMINI_API_KEY", "key"), ("PORT", "http")]).is_err());
    }

    #[test]
    fn test_wildcard_cors_rejected_in_production() {
        let err = load(&[("GEMINI_API_KEY", "key"), ("ENVIRONMENT", "production")]).unwrap_err();
        assert!(err.to_string().contains("CORS_ORIGINS"));

        let config = load(&[
            ("GEMINI_API_KEY", "key"),
            ("APP_ENV", "prod"),
            ("CORS_ORIGINS", "https://a.example, https://b.example"),
        ])
        .unwrap();
        assert!(config.is_production());
        assert_eq!(config.cors_origins.len(), 2);
    }

    #[test]
    fn test_generation_mode_parsing() {
        let config = load(&[("GEMINI_API_KEY", "key"), ("GENERATION_MODE", "Sequential")]).unwrap();
        assert_eq!(config.generation_mode, GenerationMode::Sequential);
        assert!(load(&[("GEMINI_API_KEY", "key"), ("GENERATION_MODE", "batch")]).is_err());
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let config = load(&[
            ("GEMINI_API_KEY", "key"),
            ("GEMINI_BASE_URL", "http://localhost:9000/v1/"),
        ])
        .unwrap();
        assert_eq!(config.generation.base_url, "http://localhost:9000/v1");
    }
}
