//! # Page Image Loading
//!
//! Page images are opaque references: a path under the asset directory or an
//! absolute `http(s)` URL. [`PageLoader`] fetches every page of a template in
//! parallel and reports an all-or-nothing [`LoadState`]. Nothing is rendered
//! until every page is in; one failure fails the whole set.
//!
//! Loaded pages are cached per reference for the lifetime of the process.
//! Failed references are remembered too, and retried on the next explicit
//! [`PageLoader::load_all`].

use async_trait::async_trait;
use image::ImageReader;
use std::collections::HashMap;
use std::io::Cursor;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::OverprintError;
use crate::schema::PageImages;

/// Route prefix under which relative page references are served.
pub const PAGES_ROUTE: &str = "/pages";

/// A decoded-enough page image: raw bytes plus pixel size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedPage {
    pub reference: String,
    pub mime: &'static str,
    pub width: u32,
    pub height: u32,
    pub bytes: Vec<u8>,
}

impl LoadedPage {
    /// Inspect `bytes`, failing if they aren't a readable image.
    pub fn from_bytes(reference: impl Into<String>, bytes: Vec<u8>) -> Result<Self, OverprintError> {
        let reference = reference.into();
        let reader = ImageReader::new(Cursor::new(&bytes))
            .with_guessed_format()
            .map_err(|e| OverprintError::Image(format!("{}: {}", reference, e)))?;
        let mime = reader
            .format()
            .map(|f| f.to_mime_type())
            .ok_or_else(|| OverprintError::Image(format!("{}: unrecognized image format", reference)))?;
        let (width, height) = reader
            .into_dimensions()
            .map_err(|e| OverprintError::Image(format!("{}: {}", reference, e)))?;
        Ok(Self {
            reference,
            mime,
            width,
            height,
            bytes,
        })
    }
}

/// Load progress of a whole page set.
#[derive(Debug, Clone)]
pub enum LoadState {
    Loading,
    Ready(Vec<Arc<LoadedPage>>),
    Failed(String),
}

impl LoadState {
    pub fn is_ready(&self) -> bool {
        matches!(self, LoadState::Ready(_))
    }
}

/// Where page bytes come from.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch(&self, reference: &str) -> Result<Vec<u8>, OverprintError>;
}

/// Pages read from a local directory.
#[derive(Debug, Clone)]
pub struct FileSource {
    root: PathBuf,
}

impl FileSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve `reference` inside the root, refusing anything that escapes it.
    pub fn path_for(&self, reference: &str) -> Result<PathBuf, OverprintError> {
        let relative = Path::new(reference);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if reference.is_empty() || escapes {
            return Err(OverprintError::Asset(format!("invalid page path: {}", reference)));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl PageSource for FileSource {
    async fn fetch(&self, reference: &str) -> Result<Vec<u8>, OverprintError> {
        let path = self.path_for(reference)?;
        tokio::fs::read(&path)
            .await
            .map_err(|e| OverprintError::Asset(format!("{}: {}", path.display(), e)))
    }
}

/// Pages downloaded over HTTP.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new() -> Result<Self, OverprintError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("overprint/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| OverprintError::Asset(format!("HTTP client error: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageSource for HttpSource {
    async fn fetch(&self, reference: &str) -> Result<Vec<u8>, OverprintError> {
        let response = self
            .client
            .get(reference)
            .send()
            .await
            .map_err(|e| OverprintError::Asset(format!("Failed to download {}: {}", reference, e)))?;
        if !response.status().is_success() {
            return Err(OverprintError::Asset(format!(
                "Failed to download {}: HTTP {}",
                reference,
                response.status()
            )));
        }
        let bytes = response
            .bytes()
            .await
            .map_err(|e| OverprintError::Asset(format!("Failed to read {}: {}", reference, e)))?;
        Ok(bytes.to_vec())
    }
}

/// Whether a reference is fetched over the network.
pub fn is_remote(reference: &str) -> bool {
    reference.starts_with("http://") || reference.starts_with("https://")
}

/// `src` for a page reference in a browser served by this process.
pub fn page_href(reference: &str) -> String {
    if is_remote(reference) || reference.starts_with("data:") {
        reference.to_string()
    } else {
        format!("{}/{}", PAGES_ROUTE, reference.trim_start_matches('/'))
    }
}

#[derive(Debug, Clone)]
enum Slot {
    Loaded(Arc<LoadedPage>),
    Failed(String),
}

/// Parallel, cached page loader.
#[derive(Clone)]
pub struct PageLoader {
    local: Arc<dyn PageSource>,
    remote: Arc<dyn PageSource>,
    cache: Arc<RwLock<HashMap<String, Slot>>>,
}

impl PageLoader {
    pub fn new(local: Arc<dyn PageSource>, remote: Arc<dyn PageSource>) -> Self {
        Self {
            local,
            remote,
            cache: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Loader over an asset directory plus HTTP for absolute URLs.
    pub fn with_asset_dir(root: impl Into<PathBuf>) -> Result<Self, OverprintError> {
        Ok(Self::new(
            Arc::new(FileSource::new(root)),
            Arc::new(HttpSource::new()?),
        ))
    }

    fn source_for(&self, reference: &str) -> &Arc<dyn PageSource> {
        if is_remote(reference) { &self.remote } else { &self.local }
    }

    /// Load one page, from cache when possible.
    pub async fn load(&self, reference: &str) -> Result<Arc<LoadedPage>, OverprintError> {
        if let Some(Slot::Loaded(page)) = self.cache.read().await.get(reference) {
            return Ok(page.clone());
        }

        let result = match self.source_for(reference).fetch(reference).await {
            Ok(bytes) => LoadedPage::from_bytes(reference, bytes).map(Arc::new),
            Err(e) => Err(e),
        };

        let slot = match &result {
            Ok(page) => Slot::Loaded(page.clone()),
            Err(e) => {
                tracing::warn!(reference, error = %e, "page image failed to load");
                Slot::Failed(e.to_string())
            }
        };
        self.cache.write().await.insert(reference.to_string(), slot);
        result
    }

    /// Load every page concurrently. Ready only if all of them loaded.
    pub async fn load_all(&self, pages: &PageImages) -> LoadState {
        let handles: Vec<_> = pages
            .as_slice()
            .iter()
            .map(|reference| {
                let loader = self.clone();
                let reference = reference.clone();
                tokio::spawn(async move { loader.load(&reference).await })
            })
            .collect();

        let mut loaded = Vec::with_capacity(handles.len());
        let mut failure = None;
        for handle in handles {
            match handle.await {
                Ok(Ok(page)) => loaded.push(page),
                Ok(Err(e)) => {
                    failure.get_or_insert(e.to_string());
                }
                Err(e) => {
                    failure.get_or_insert(format!("page load task failed: {}", e));
                }
            }
        }

        match failure {
            Some(message) => LoadState::Failed(message),
            None => LoadState::Ready(loaded),
        }
    }

    /// Start loading in the background without waiting.
    pub fn prefetch(&self, pages: &PageImages) {
        let loader = self.clone();
        let pages = pages.clone();
        tokio::spawn(async move {
            loader.load_all(&pages).await;
        });
    }

    /// Drop cached failures for `pages` so the next load fetches them again.
    pub async fn forget_failures(&self, pages: &PageImages) {
        let mut cache = self.cache.write().await;
        for reference in pages.as_slice() {
            if matches!(cache.get(reference), Some(Slot::Failed(_))) {
                tracing::debug!(reference = %reference, "retrying failed page");
                cache.remove(reference);
            }
        }
    }

    /// Current state from the cache alone; never fetches.
    pub async fn status(&self, pages: &PageImages) -> LoadState {
        let cache = self.cache.read().await;
        let mut loaded = Vec::with_capacity(pages.len());
        for reference in pages.as_slice() {
            match cache.get(reference) {
                Some(Slot::Loaded(page)) => loaded.push(page.clone()),
                Some(Slot::Failed(message)) => return LoadState::Failed(message.clone()),
                None => return LoadState::Loading,
            }
        }
        LoadState::Ready(loaded)
    }
}

// ============================================================================
// TESTS
// ============================================================================
