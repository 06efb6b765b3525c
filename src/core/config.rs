use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub media: MediaHostConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub max_request_body_size: usize,
}

/// Media host configuration for image uploads.
///
/// The host is a single HTTP endpoint accepting multipart form data
/// (`file`, `upload_preset`, `folder`) and returning a JSON body with a
/// `secure_url` field on success.
#[derive(Debug, Clone)]
pub struct MediaHostConfig {
    /// Upload endpoint URL
    pub upload_url: String,
    /// Unsigned upload preset name
    pub upload_preset: String,
    /// Target folder on the host
    pub folder: String,
    /// Per-request network timeout
    pub timeout: Duration,
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
            media: MediaHostConfig::from_env()?,
        })
    }
}

impl AppConfig {
    const DEFAULT_MAX_REQUEST_BODY_SIZE: usize = 32 * 1024 * 1024; // 3 photos + payload headroom

    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        // Parse CORS allowed origins from comma-separated string
        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let max_request_body_size = env::var("MAX_REQUEST_BODY_SIZE")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_REQUEST_BODY_SIZE.to_string())
            .parse::<usize>()
            .map_err(|_| "MAX_REQUEST_BODY_SIZE must be a valid number".to_string())?;

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
            max_request_body_size,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl MediaHostConfig {
    const DEFAULT_UPLOAD_TIMEOUT_SECS: u64 = 45;

    pub fn from_env() -> Result<Self, String> {
        let upload_url = env::var("MEDIA_UPLOAD_URL")
            .map_err(|_| "MEDIA_UPLOAD_URL environment variable is required".to_string())?;

        let upload_preset = env::var("MEDIA_UPLOAD_PRESET")
            .map_err(|_| "MEDIA_UPLOAD_PRESET environment variable is required".to_string())?;

        let folder = env::var("MEDIA_UPLOAD_FOLDER").unwrap_or_else(|_| "pawtrail".to_string());

        let timeout_secs = env::var("MEDIA_UPLOAD_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_UPLOAD_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "MEDIA_UPLOAD_TIMEOUT_SECS must be a valid number".to_string())?;

        Ok(Self {
            upload_url,
            upload_preset,
            folder,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}
