//! Static-asset and image stores.
//!
//! # Responsibilities
//! - Serve prebuilt site files from the static directory
//! - Serve the image passthrough from the image directory
//!
//! # Design Decisions
//! - Both directories are optional; a missing directory means every lookup
//!   misses and the dispatcher falls through to its next option
//! - Extensionless paths retry with `.html` so `/careers` finds careers.html
//! - Cache-header policy stays with the caller; the store only reports
//!   bytes, content type, and ETag

use std::collections::hash_map::DefaultHasher;
use std::hash::Hasher;
use std::path::{Path, PathBuf};

use crate::config::AssetConfig;

/// One file fetched from a store.
#[derive(Debug, Clone)]
pub struct Asset {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
    pub etag: String,
}

/// Filesystem-backed stores for the site shell and the image bucket.
#[derive(Debug, Clone, Default)]
pub struct AssetStore {
    static_dir: Option<PathBuf>,
    image_dir: Option<PathBuf>,
}

impl AssetStore {
    pub fn new(config: &AssetConfig) -> Self {
        Self {
            static_dir: config.static_dir.as_ref().map(PathBuf::from),
            image_dir: config.image_dir.as_ref().map(PathBuf::from),
        }
    }

    /// Fetch an image by its URL path. Unknown extensions are still served,
    /// typed as PNG, matching the bucket's upload convention.
    pub async fn image(&self, path: &str) -> Option<Asset> {
        let dir = self.image_dir.as_ref()?;
        let relative = sanitize(path)?;
        let bytes = tokio::fs::read(dir.join(&relative)).await.ok()?;
        let content_type = content_type_for(&relative).unwrap_or("image/png");
        Some(asset(bytes, content_type))
    }

    /// Fetch a site file. `/` maps to index.html and extensionless paths
    /// retry with `.html` appended.
    pub async fn static_asset(&self, path: &str) -> Option<Asset> {
        let dir = self.static_dir.as_ref()?;
        let relative = if path == "/" {
            PathBuf::from("index.html")
        } else {
            sanitize(path)?
        };

        let candidate = dir.join(&relative);
        let bytes = match tokio::fs::read(&candidate).await {
            Ok(bytes) => bytes,
            Err(_) if relative.extension().is_none() => {
                let mut with_html = candidate.into_os_string();
                with_html.push(".html");
                tokio::fs::read(PathBuf::from(with_html)).await.ok()?
            }
            Err(_) => return None,
        };

        let content_type = content_type_for(&relative).unwrap_or("text/html; charset=utf-8");
        Some(asset(bytes, content_type))
    }
}

fn asset(bytes: Vec<u8>, content_type: &'static str) -> Asset {
    let mut hasher = DefaultHasher::new();
    hasher.write(&bytes);
    let etag = format!("\"{:016x}\"", hasher.finish());
    Asset {
        bytes,
        content_type,
        etag,
    }
}

/// Strip the leading slash and refuse traversal components.
fn sanitize(path: &str) -> Option<PathBuf> {
    let trimmed = path.trim_start_matches('/');
    if trimmed.is_empty() {
        return None;
    }
    let relative = Path::new(trimmed);
    let safe = relative.components().all(|component| {
        matches!(component, std::path::Component::Normal(_))
    });
    safe.then(|| relative.to_path_buf())
}

fn content_type_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let content_type = match ext.as_str() {
        "html" => "text/html; charset=utf-8",
        "css" => "text/css",
        "js" => "application/javascript",
        "json" => "application/json",
        "txt" => "text/plain; charset=utf-8",
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "webp" => "image/webp",
        "ico" => "image/x-icon",
        "woff2" => "font/woff2",
        _ => return None,
    };
    Some(content_type)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn traversal_is_rejected() {
        assert!(sanitize("/../etc/passwd").is_none());
        assert!(sanitize("/img/../../secret").is_none());
        assert!(sanitize("/img/logo.png").is_some());
    }

    #[tokio::test]
    async fn missing_directory_always_misses() {
        let store = AssetStore::new(&AssetConfig::default());
        assert!(store.image("/logo.png").await.is_none());
        assert!(store.static_asset("/").await.is_none());
    }

    #[tokio::test]
    async fn extensionless_paths_retry_with_html() {
        let dir = std::env::temp_dir().join(format!("lab-assets-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("careers.html"), b"<html>jobs</html>").unwrap();

        let store = AssetStore::new(&AssetConfig {
            static_dir: Some(dir.to_string_lossy().into_owned()),
            image_dir: None,
        });

        let asset = store.static_asset("/careers").await.unwrap();
        assert_eq!(asset.content_type, "text/html; charset=utf-8");
        assert_eq!(asset.bytes, b"<html>jobs</html>");

        std::fs::remove_dir_all(&dir).unwrap_or_default();
    }
}
