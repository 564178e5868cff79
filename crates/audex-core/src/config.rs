//! Configuration module
//!
//! Process-wide settings, read once at startup from the environment (and an
//! optional `.env` file). Nothing here is mutated after startup.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::storage_types::StorageBackend;

const SERVER_PORT: u16 = 8080;
const FFMPEG_PATH: &str = "ffmpeg";
const MAX_REQUEST_BODY_BYTES: usize = 64 * 1024;

/// Console log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "compact" | "text" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            _ => Err(anyhow::anyhow!("Invalid log format: {}", s)),
        }
    }
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub environment: String,
    pub cors_origins: Vec<String>,
    pub log_format: LogFormat,
    pub max_request_body_bytes: usize,
    // Storage configuration
    pub storage_backend: StorageBackend,
    /// Default output bucket used when the output path is a bare key.
    pub gcs_bucket_name: Option<String>,
    pub local_storage_path: Option<String>,
    // Transcoding configuration
    pub ffmpeg_path: String,
    /// Parent directory for per-request working areas. System temp dir when unset.
    pub work_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: SERVER_PORT,
            environment: "development".to_string(),
            cors_origins: vec!["*".to_string()],
            log_format: LogFormat::Compact,
            max_request_body_bytes: MAX_REQUEST_BODY_BYTES,
            storage_backend: StorageBackend::Gcs,
            gcs_bucket_name: None,
            local_storage_path: None,
            ffmpeg_path: FFMPEG_PATH.to_string(),
            work_dir: None,
        }
    }
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
        let defaults = Config::default();

        let environment = lookup("ENVIRONMENT")
            .or_else(|| lookup("APP_ENV"))
            .unwrap_or(defaults.environment);

        let server_port = match lookup("PORT") {
            Some(port) => port
                .trim()
                .parse::<u16>()
                .map_err(|e| anyhow::anyhow!("Invalid PORT '{}': {}", port, e))?,
            None => SERVER_PORT,
        };

        let cors_origins = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let log_format = match lookup("LOG_FORMAT") {
            Some(format) => format.parse()?,
            None => LogFormat::Compact,
        };

        let max_request_body_bytes = match lookup("MAX_REQUEST_BODY_BYTES") {
            Some(limit) => limit.trim().parse::<usize>().map_err(|e| {
                anyhow::anyhow!("Invalid MAX_REQUEST_BODY_BYTES '{}': {}", limit, e)
            })?,
            None => MAX_REQUEST_BODY_BYTES,
        };

        let storage_backend = match lookup("STORAGE_BACKEND") {
            Some(backend) => backend.parse()?,
            None => StorageBackend::Gcs,
        };

        let gcs_bucket_name = lookup("GCS_BUCKET_NAME");
        let local_storage_path = lookup("LOCAL_STORAGE_PATH").filter(|s| !s.trim().is_empty());

        let ffmpeg_path = lookup("FFMPEG_PATH").unwrap_or_else(|| FFMPEG_PATH.to_string());
        let work_dir = lookup("WORK_DIR")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        Ok(Config {
            server_port,
            environment,
            cors_origins,
            log_format,
            max_request_body_bytes,
            storage_backend,
            gcs_bucket_name,
            local_storage_path,
            ffmpeg_path,
            work_dir,
        })
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.server_port == 0 {
            return Err(anyhow::anyhow!("PORT cannot be 0"));
        }

        if self.ffmpeg_path.trim().is_empty() {
            return Err(anyhow::anyhow!("FFMPEG_PATH cannot be empty"));
        }

        if let Some(bucket) = &self.gcs_bucket_name {
            if bucket.trim().is_empty() {
                return Err(anyhow::anyhow!(
                    "GCS_BUCKET_NAME is set but empty; unset it or provide a bucket name"
                ));
            }
            if bucket.contains('/') {
                return Err(anyhow::anyhow!(
                    "GCS_BUCKET_NAME must be a bucket name, not a path: {}",
                    bucket
                ));
            }
        }

        if self.storage_backend == StorageBackend::Local && self.local_storage_path.is_none() {
            return Err(anyhow::anyhow!(
                "LOCAL_STORAGE_PATH must be set when using local storage backend"
            ));
        }

        if self.is_production() && self.cors_origins.iter().any(|o| o == "*") {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        Ok(())
    }

    /// Default output bucket, if configured.
    pub fn default_output_bucket(&self) -> Option<&str> {
        self.gcs_bucket_name.as_deref()
    }
}
