//! Application configuration
//!
//! Centralized configuration management with environment variable support
//! and sensible defaults.

use std::env;
use std::path::PathBuf;

/// Maximum size of a single uploaded image in bytes (5 MiB)
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Maximum number of images accepted per listing
pub const MAX_IMAGES_PER_LISTING: usize = 10;

/// Public URL prefix under which uploaded files are served
pub const UPLOAD_PUBLIC_PREFIX: &str = "/uploads";

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,
    /// Upload configuration
    pub uploads: UploadConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to bind the server to
    pub port: u16,
    /// Host address to bind to
    pub host: String,
}

/// Upload configuration
#[derive(Debug, Clone)]
pub struct UploadConfig {
    /// Directory uploaded images are written to
    pub dir: PathBuf,
    /// Per-file size cap in bytes
    pub max_file_bytes: usize,
    /// Per-request file count cap
    pub max_files: usize,
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig {
                port: env::var("PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(3000),
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            },
            uploads: UploadConfig {
                dir: env::var("UPLOAD_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| PathBuf::from("uploads")),
                max_file_bytes: MAX_IMAGE_BYTES,
                max_files: MAX_IMAGES_PER_LISTING,
            },
        }
    }

    /// Get the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl UploadConfig {
    /// Request body limit for the create route, sized to the upload caps
    /// plus headroom for the text fields and multipart framing.
    pub fn max_body_bytes(&self) -> usize {
        self.max_files * self.max_file_bytes + 1024 * 1024
    }
}
