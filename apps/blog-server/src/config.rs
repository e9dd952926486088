//! Application configuration loaded from environment variables.

use std::env;

use postboard_core::BoardSettings;
use postboard_infra::{DatabaseConfig, S3Config};

/// Presentation settings shared by every page.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub title: String,
    /// Fixed author label in the reader's metadata line.
    pub author_label: String,
    /// Grid image for posts without a cover.
    pub placeholder_image_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Blog".to_string(),
            author_label: "The Editors".to_string(),
            placeholder_image_url: "https://via.placeholder.com/400x200".to_string(),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    pub s3: Option<S3Config>,
    /// Base of public cover URLs. `None` serves covers through `/media`.
    pub media_base_url: Option<String>,
    pub max_upload_bytes: usize,
    pub board: BoardSettings,
    pub site: SiteConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            database: None,
            s3: None,
            media_base_url: None,
            max_upload_bytes: 10 * 1024 * 1024,
            board: BoardSettings::default(),
            site: SiteConfig::default(),
        }
    }
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parsed_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

fn non_empty(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = non_empty("DATABASE_URL").map(|url| DatabaseConfig {
            url,
            max_connections: parsed_or("DB_MAX_CONNECTIONS", 10),
            min_connections: parsed_or("DB_MIN_CONNECTIONS", 1),
        });

        let s3 = non_empty("S3_BUCKET").map(|bucket| S3Config {
            bucket,
            region: var_or("S3_REGION", "us-east-1"),
            endpoint: non_empty("S3_ENDPOINT"),
            access_key: non_empty("AWS_ACCESS_KEY_ID"),
            secret_key: non_empty("AWS_SECRET_ACCESS_KEY"),
        });

        // A public-read bucket can serve covers directly
        let media_base_url = non_empty("MEDIA_PUBLIC_BASE_URL").or_else(|| {
            let public_bucket = env::var("S3_PUBLIC_READ")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false);
            s3.as_ref()
                .filter(|_| public_bucket)
                .map(S3Config::bucket_url)
        });

        let defaults = Self::default();

        Self {
            host: var_or("HOST", &defaults.host),
            port: parsed_or("PORT", defaults.port),
            database,
            s3,
            media_base_url,
            max_upload_bytes: parsed_or("MAX_UPLOAD_BYTES", defaults.max_upload_bytes),
            board: BoardSettings {
                cover_prefix: var_or("COVER_PREFIX", &defaults.board.cover_prefix),
                date_format: var_or("DATE_FORMAT", &defaults.board.date_format),
            },
            site: SiteConfig {
                title: var_or("SITE_TITLE", &defaults.site.title),
                author_label: var_or("AUTHOR_LABEL", &defaults.site.author_label),
                placeholder_image_url: var_or(
                    "PLACEHOLDER_IMAGE_URL",
                    &defaults.site.placeholder_image_url,
                ),
            },
        }
    }

    /// Base URL covers are published under.
    pub fn media_base(&self) -> &str {
        self.media_base_url.as_deref().unwrap_or("/media")
    }
}
