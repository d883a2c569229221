//! Configuration module
//!
//! Env-driven configuration, loaded once at startup. The storage backend
//! profile is resolved here and never re-read per request.

use std::env;

use crate::storage_types::StorageBackend;

const DEFAULT_PORT: u16 = 4000;
const DEFAULT_STORAGE_DIR: &str = "./data/media";
const DEFAULT_MAX_FILE_SIZE_MB: usize = 100;

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub environment: String,
    pub cors_origins: Vec<String>,
    /// Active storage profile, fixed for the process lifetime.
    pub storage_backend: StorageBackend,
    /// Root directory for the local backend.
    pub media_storage_dir: String,
    /// Base URL used to build retrieval URLs for locally stored files.
    pub public_base_url: String,
    /// Bucket name, required when the backend is GCS.
    pub gcs_bucket: Option<String>,
    pub max_file_size_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let server_port: u16 = env::var("PORT")
            .unwrap_or_else(|_| DEFAULT_PORT.to_string())
            .parse()
            .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?;

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .collect();

        let storage_backend = match env::var("STORAGE_BACKEND") {
            Ok(s) => s.parse()?,
            Err(_) => StorageBackend::Local,
        };

        let max_file_size_mb = env::var("MAX_FILE_SIZE_MB")
            .unwrap_or_else(|_| DEFAULT_MAX_FILE_SIZE_MB.to_string())
            .parse::<usize>()
            .unwrap_or(DEFAULT_MAX_FILE_SIZE_MB);

        let config = Config {
            server_port,
            environment,
            cors_origins,
            storage_backend,
            media_storage_dir: env::var("MEDIA_STORAGE_DIR")
                .unwrap_or_else(|_| DEFAULT_STORAGE_DIR.to_string()),
            public_base_url: env::var("PUBLIC_BASE_URL")
                .unwrap_or_else(|_| format!("http://localhost:{}", server_port)),
            gcs_bucket: env::var("GCS_BUCKET").ok().filter(|s| !s.is_empty()),
            max_file_size_bytes: max_file_size_mb * 1024 * 1024,
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
        if self.storage_backend == StorageBackend::Gcs && self.gcs_bucket.is_none() {
            return Err(anyhow::anyhow!(
                "GCS_BUCKET must be set when using the gcs storage backend"
            ));
        }

        if self.media_storage_dir.trim().is_empty() {
            return Err(anyhow::anyhow!("MEDIA_STORAGE_DIR must not be empty"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config {
            server_port: 4000,
            environment: "development".to_string(),
            cors_origins: vec!["*".to_string()],
            storage_backend: StorageBackend::Local,
            media_storage_dir: "./data/media".to_string(),
            public_base_url: "http://localhost:4000".to_string(),
            gcs_bucket: None,
            max_file_size_bytes: 100 * 1024 * 1024,
        }
    }

    #[test]
    fn gcs_backend_requires_bucket() {
        let mut config = base_config();
        config.storage_backend = StorageBackend::Gcs;
        assert!(config.validate().is_err());

        config.gcs_bucket = Some("media-bucket".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn local_backend_validates_without_bucket() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn production_detection() {
        let mut config = base_config();
        assert!(!config.is_production());
        config.environment = "Production".to_string();
        assert!(config.is_production());
    }
}
