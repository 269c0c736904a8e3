//! Print readiness gate.
//!
//! Printing is only offered once every page image is loaded. The gate polls
//! a load-state check at a fixed short interval for a bounded number of
//! attempts, the same cadence the print document's inline script uses for
//! `img.complete`.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::assets::{LoadState, LoadedPage, PageLoader};
use crate::error::OverprintError;
use crate::schema::PageImages;

/// Poll interval for image readiness.
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Attempts before giving up (10 s at the default interval).
pub const MAX_ATTEMPTS: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadinessGate {
    pub interval: Duration,
    pub attempts: u32,
}

impl Default for ReadinessGate {
    fn default() -> Self {
        Self {
            interval: POLL_INTERVAL,
            attempts: MAX_ATTEMPTS,
        }
    }
}

impl ReadinessGate {
    pub fn new(interval: Duration, attempts: u32) -> Self {
        Self { interval, attempts }
    }

    /// Poll `check` until it reports ready or failed.
    ///
    /// A failed load ends the wait immediately. Running out of attempts
    /// while still loading is [`OverprintError::NotReady`].
    pub async fn wait_for<F, Fut>(&self, mut check: F) -> Result<Vec<Arc<LoadedPage>>, OverprintError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = LoadState>,
    {
        for attempt in 0..self.attempts.max(1) {
            match check().await {
                LoadState::Ready(pages) => return Ok(pages),
                LoadState::Failed(message) => return Err(OverprintError::PageLoad(message)),
                LoadState::Loading => {
                    tracing::debug!(attempt, "pages not ready yet");
                    tokio::time::sleep(self.interval).await;
                }
            }
        }
        Err(OverprintError::NotReady(format!(
            "page images still loading after {} ms",
            self.interval.as_millis() * u128::from(self.attempts.max(1))
        )))
    }

    /// Kick off loading `pages` and wait until the whole set is in.
    ///
    /// Pages that failed on an earlier call are fetched again.
    pub async fn wait(&self, loader: &PageLoader, pages: &PageImages) -> Result<Vec<Arc<LoadedPage>>, OverprintError> {
        loader.forget_failures(pages).await;
        if !loader.status(pages).await.is_ready() {
            loader.prefetch(pages);
        }
        self.wait_for(|| loader.status(pages)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::PageSource;
    use async_trait::async_trait;
    use image::{ImageFormat, RgbImage};
    use std::io::Cursor;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Fails the first `failures` fetches, then serves a tiny PNG.
    struct FlakySource {
        failures: u32,
        fetches: AtomicU32,
    }

    #[async_trait]
    impl PageSource for FlakySource {
        async fn fetch(&self, _reference: &str) -> Result<Vec<u8>, OverprintError> {
            if self.fetches.fetch_add(1, Ordering::SeqCst) < self.failures {
                return Err(OverprintError::Asset("transient".into()));
            }
            let mut out = Cursor::new(Vec::new());
            RgbImage::new(4, 6)
                .write_to(&mut out, ImageFormat::Png)
                .map_err(|e| OverprintError::Image(e.to_string()))?;
            Ok(out.into_inner())
        }
    }

    fn flaky_loader(failures: u32) -> PageLoader {
        let source = Arc::new(FlakySource {
            failures,
            fetches: AtomicU32::new(0),
        });
        PageLoader::new(source.clone(), source)
    }

    fn gate(attempts: u32) -> ReadinessGate {
        ReadinessGate::new(Duration::from_millis(1), attempts)
    }

    #[tokio::test]
    async fn test_ready_after_a_few_polls() {
        let polls = AtomicU32::new(0);
        let result = gate(10)
            .wait_for(|| async {
                if polls.fetch_add(1, Ordering::SeqCst) < 3 {
                    LoadState::Loading
                } else {
                    LoadState::Ready(Vec::new())
                }
            })
            .await;
        assert!(result.is_ok());
        assert_eq!(polls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_failure_stops_polling() {
        let polls = AtomicU32::new(0);
        let result = gate(10)
            .wait_for(|| async {
                polls.fetch_add(1, Ordering::SeqCst);
                LoadState::Failed("p1".into())
            })
            .await;
        assert!(matches!(result, Err(OverprintError::PageLoad(_))));
        assert_eq!(polls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_bounded_attempts() {
        let polls = AtomicU32::new(0);
        let result = gate(5)
            .wait_for(|| async {
                polls.fetch_add(1, Ordering::SeqCst);
                LoadState::Loading
            })
            .await;
        assert!(matches!(result, Err(OverprintError::NotReady(_))));
        assert_eq!(polls.load(Ordering::SeqCst), 5);
    }

    #[tokio::test]
    async fn test_wait_retries_a_failed_page() {
        let loader = flaky_loader(1);
        let pages = PageImages::new(["p1.png"]);
        assert!(matches!(loader.load_all(&pages).await, LoadState::Failed(_)));

        let loaded = gate(50).wait(&loader, &pages).await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert!(loader.status(&pages).await.is_ready());
    }

    #[tokio::test]
    async fn test_failure_message_is_not_rewrapped() {
        let loader = flaky_loader(u32::MAX);
        let pages = PageImages::new(["p1.png"]);
        let err = gate(50).wait(&loader, &pages).await.unwrap_err();
        assert_eq!(err.to_string(), "Page images failed to load: Asset error: transient");
    }

    #[test]
    fn test_default_cadence() {
        let gate = ReadinessGate::default();
        assert_eq!(gate.interval, Duration::from_millis(100));
        assert_eq!(gate.attempts, MAX_ATTEMPTS);
    }
}
