use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub backend: BackendConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
}

/// Connection settings for the LOCAFY REST backend.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Base URL including the `/api` prefix, no trailing slash.
    pub api_base_url: String,
    pub request_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// JSON file the session store is persisted to.
    pub store_path: PathBuf,
    pub cookie_name: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            backend: BackendConfig::from_env()?,
            session: SessionConfig::from_env()?,
        })
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl BackendConfig {
    const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;

    pub fn from_env() -> Result<Self, String> {
        let raw = env::var("API_BASE_URL").unwrap_or_else(|_| "http://localhost:7000".to_string());
        let api_base_url = Self::normalize_base_url(&raw);

        let request_timeout_secs = env::var("API_REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_REQUEST_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "API_REQUEST_TIMEOUT_SECS must be a valid number".to_string())?;

        Ok(Self {
            api_base_url,
            request_timeout: Duration::from_secs(request_timeout_secs),
        })
    }

    /// Strip a trailing slash and ensure the `/api` prefix is present.
    fn normalize_base_url(raw: &str) -> String {
        let trimmed = raw.trim_end_matches('/');
        if trimmed.ends_with("/api") {
            trimmed.to_string()
        } else {
            format!("{}/api", trimmed)
        }
    }
}

impl SessionConfig {
    pub fn from_env() -> Result<Self, String> {
        let store_path = env::var("SESSION_STORE_PATH")
            .unwrap_or_else(|_| "locafy-sessions.json".to_string())
            .into();
        let cookie_name = env::var("SESSION_COOKIE_NAME").unwrap_or_else(|_| "sid".to_string());

        Ok(Self {
            store_path,
            cookie_name,
        })
    }
}
