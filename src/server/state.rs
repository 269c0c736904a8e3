//! Server state shared across handlers.

use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::assets::{LoadState, PageLoader};
use crate::config::ServerConfig;
use crate::error::OverprintError;
use crate::format;
use crate::print::readiness::ReadinessGate;
use crate::room::{FileRoomStore, MemoryRoomStore, RoomCounter, room_number};
use crate::schema::PageImages;
use crate::templates::{FormContext, Template};

/// Attempts the live preview waits for pages before showing the loading view.
const PREVIEW_ATTEMPTS: u32 = 20;

/// Application state shared across handlers.
pub struct AppState {
    pub config: ServerConfig,
    pub loader: PageLoader,
    pub rooms: Arc<dyn RoomCounter>,
    /// Gate used before handing out a print document.
    pub print_gate: ReadinessGate,
    /// Shorter gate for the live preview.
    pub preview_gate: ReadinessGate,
    /// Unix timestamp of server boot for cache busting.
    pub boot_time: u64,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Result<Self, OverprintError> {
        let loader = PageLoader::with_asset_dir(&config.asset_dir)?;
        let rooms: Arc<dyn RoomCounter> = match &config.state_path {
            Some(path) => Arc::new(FileRoomStore::new(path)),
            None => Arc::new(MemoryRoomStore::default()),
        };
        Ok(Self::with_parts(config, loader, rooms))
    }

    pub fn with_parts(config: ServerConfig, loader: PageLoader, rooms: Arc<dyn RoomCounter>) -> Self {
        let boot_time = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        Self {
            config,
            loader,
            rooms,
            print_gate: ReadinessGate::default(),
            preview_gate: ReadinessGate::new(Duration::from_millis(100), PREVIEW_ATTEMPTS),
            boot_time,
        }
    }

    /// Current rotation index, read on the blocking pool.
    pub async fn peek_room(&self) -> Result<usize, OverprintError> {
        let rooms = self.rooms.clone();
        tokio::task::spawn_blocking(move || rooms.peek())
            .await
            .map_err(|e| OverprintError::Room(format!("room counter task failed: {}", e)))?
    }

    /// Room index for `template`, if it uses the rotation.
    ///
    /// A store failure is logged and leaves the address blank.
    pub async fn room_index(&self, template: &dyn Template) -> Option<usize> {
        if !template.uses_room_counter() {
            return None;
        }
        match self.peek_room().await {
            Ok(index) => Some(index),
            Err(e) => {
                tracing::warn!(error = %e, "room counter unavailable");
                None
            }
        }
    }

    /// Initial form context: today's date plus the current room.
    pub async fn form_context(&self, template: &dyn Template) -> FormContext {
        FormContext::new(format::today(), self.room_index(template).await.map(room_number))
    }

    /// Load state for the live preview.
    ///
    /// Waits briefly; pages still in flight afterwards show the loading view.
    pub async fn preview_state(&self, pages: &PageImages) -> LoadState {
        match self.preview_gate.wait(&self.loader, pages).await {
            Ok(loaded) => LoadState::Ready(loaded),
            Err(OverprintError::NotReady(_)) => LoadState::Loading,
            Err(OverprintError::PageLoad(message)) => LoadState::Failed(message),
            Err(e) => LoadState::Failed(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::room::Advance;
    use crate::templates;
    use std::path::PathBuf;

    /// Store whose backing file is unreadable.
    struct BrokenStore;

    impl RoomCounter for BrokenStore {
        fn peek(&self) -> Result<usize, OverprintError> {
            Err(OverprintError::Room("state file unreadable".into()))
        }

        fn advance(&self, _expected: usize) -> Result<Advance, OverprintError> {
            Err(OverprintError::Room("state file unreadable".into()))
        }
    }

    fn state(rooms: Arc<dyn RoomCounter>) -> AppState {
        let config = ServerConfig {
            listen_addr: "127.0.0.1:0".into(),
            asset_dir: PathBuf::from("does-not-exist"),
            state_path: None,
        };
        let loader = PageLoader::with_asset_dir(&config.asset_dir).unwrap();
        AppState::with_parts(config, loader, rooms)
    }

    #[tokio::test]
    async fn test_room_index_only_for_rotation_templates() {
        let state = state(Arc::new(MemoryRoomStore::new(21)));
        let story = templates::by_id("lg-story").unwrap();
        let asia = templates::by_id("kt-asia").unwrap();
        assert_eq!(state.room_index(story).await, Some(21));
        assert_eq!(state.room_index(asia).await, None);
        assert_eq!(state.form_context(story).await.room, Some(202));
    }

    #[tokio::test]
    async fn test_broken_store_leaves_room_blank() {
        let state = state(Arc::new(BrokenStore));
        let story = templates::by_id("lg-story").unwrap();
        assert_eq!(state.room_index(story).await, None);
        assert!(matches!(state.peek_room().await, Err(OverprintError::Room(_))));
    }
}
