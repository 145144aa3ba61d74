use crate::config::ScraperConfig;
use crate::http::{HttpClient, HttpError};
use crate::utils::title_to_filename;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
enum FetchError {
    #[error(transparent)]
    Http(#[from] HttpError),

    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Downloads article images into a directory
pub struct AssetFetcher {
    http: Arc<dyn HttpClient>,
    download_dir: PathBuf,
    extension: String,
    filename_max_chars: usize,
}

impl AssetFetcher {
    pub fn new(http: Arc<dyn HttpClient>, config: &ScraperConfig) -> Self {
        Self {
            http,
            download_dir: config.download_dir.clone(),
            extension: config.image_extension.clone(),
            filename_max_chars: config.filename_max_chars,
        }
    }

    /// Path an image for `title` is written to
    pub fn image_path(&self, title: &str) -> PathBuf {
        let stem = title_to_filename(title, self.filename_max_chars);
        self.download_dir
            .join(format!("{}.{}", stem, self.extension))
    }

    /// Downloads `image_url` and saves it under a name derived from `title`.
    ///
    /// Returns the written path. Does nothing when either argument is missing
    /// or empty; failures are logged and yield `None`.
    pub async fn fetch(&self, image_url: Option<&str>, title: &str) -> Option<PathBuf> {
        let image_url = image_url.filter(|u| !u.trim().is_empty())?;
        if title.trim().is_empty() {
            return None;
        }

        match self.download(image_url, title).await {
            Ok(Some(path)) => {
                ::log::info!("Downloaded image for '{}' as {}", title, path.display());
                Some(path)
            }
            Ok(None) => None,
            Err(e) => {
                ::log::warn!("Failed to download image {}: {}", image_url, e);
                None
            }
        }
    }

    async fn download(&self, image_url: &str, title: &str) -> Result<Option<PathBuf>, FetchError> {
        let response = self.http.get(image_url).await?;
        if !response.has_content() {
            ::log::warn!(
                "Image {} returned status {} with {} bytes, not saving",
                image_url,
                response.status,
                response.body.len()
            );
            return Ok(None);
        }

        let path = self.image_path(title);
        write_file(&self.download_dir, &path, &response.body).await?;
        Ok(Some(path))
    }
}

async fn write_file(dir: &Path, path: &Path, body: &[u8]) -> Result<(), FetchError> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|source| FetchError::Write {
            path: dir.to_path_buf(),
            source,
        })?;
    tokio::fs::write(path, body)
        .await
        .map_err(|source| FetchError::Write {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StubHttp;

    fn fetcher(http: StubHttp, dir: &Path) -> AssetFetcher {
        let config = ScraperConfig {
            download_dir: dir.join("downloads"),
            ..ScraperConfig::default()
        };
        AssetFetcher::new(Arc::new(http), &config)
    }

    #[tokio::test]
    async fn test_saves_image_under_title_name() {
        let tmp = tempfile::tempdir().unwrap();
        let http = StubHttp::new().with_get("https://img.example/a.jpg", 200, b"JPEGDATA");
        let fetcher = fetcher(http, tmp.path());

        let path = fetcher
            .fetch(Some("https://img.example/a.jpg"), "El fin del verano")
            .await
            .unwrap();
        assert_eq!(
            path,
            tmp.path().join("downloads").join("El_fin_del_verano.jpg")
        );
        assert_eq!(std::fs::read(&path).unwrap(), b"JPEGDATA");
    }

    #[tokio::test]
    async fn test_missing_inputs_are_noop() {
        let tmp = tempfile::tempdir().unwrap();
        let fetcher = fetcher(StubHttp::new(), tmp.path());

        assert_eq!(fetcher.fetch(None, "Titular").await, None);
        assert_eq!(fetcher.fetch(Some(""), "Titular").await, None);
        assert_eq!(fetcher.fetch(Some("https://img.example/a.jpg"), "").await, None);
        assert!(!tmp.path().join("downloads").exists());
    }

    #[tokio::test]
    async fn test_transport_error_is_swallowed() {
        let tmp = tempfile::tempdir().unwrap();
        let fetcher = fetcher(StubHttp::new(), tmp.path());
        assert_eq!(
            fetcher.fetch(Some("https://img.example/gone.jpg"), "Titular").await,
            None
        );
    }

    #[tokio::test]
    async fn test_only_full_responses_are_saved() {
        let tmp = tempfile::tempdir().unwrap();
        let http = StubHttp::new()
            .with_get("https://img.example/empty.jpg", 204, b"")
            .with_get("https://img.example/blank.jpg", 200, b"")
            .with_get("https://img.example/missing.jpg", 404, b"not found");
        let fetcher = fetcher(http, tmp.path());

        for url in [
            "https://img.example/empty.jpg",
            "https://img.example/blank.jpg",
            "https://img.example/missing.jpg",
        ] {
            assert_eq!(fetcher.fetch(Some(url), "Titular").await, None);
        }
        assert!(!fetcher.image_path("Titular").exists());
    }

    #[tokio::test]
    async fn test_same_truncated_title_overwrites() {
        let tmp = tempfile::tempdir().unwrap();
        let prefix = "x".repeat(50);
        let http = StubHttp::new()
            .with_get("https://img.example/1.jpg", 200, b"first")
            .with_get("https://img.example/2.jpg", 200, b"second");
        let fetcher = fetcher(http, tmp.path());

        let a = fetcher
            .fetch(Some("https://img.example/1.jpg"), &format!("{} uno", prefix))
            .await
            .unwrap();
        let b = fetcher
            .fetch(Some("https://img.example/2.jpg"), &format!("{} dos", prefix))
            .await
            .unwrap();
        assert_eq!(a, b);
        assert_eq!(std::fs::read(&b).unwrap(), b"second");
    }
}
