//! Runtime configuration.
//!
//! Built from CLI flags (with environment fallbacks, see `main.rs`). The
//! only derived value is the default state file location under the
//! platform data directory.

use std::path::{Path, PathBuf};

use crate::error::OverprintError;

/// Default listen address.
pub const DEFAULT_LISTEN: &str = "127.0.0.1:8080";

/// Default page image directory, relative to the working directory.
pub const DEFAULT_ASSETS: &str = "assets/templates";

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to listen on (e.g., "0.0.0.0:8080")
    pub listen_addr: String,
    /// Directory holding the scanned form pages
    pub asset_dir: PathBuf,
    /// Room rotation state file; `None` keeps the counter in memory
    pub state_path: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN.to_string(),
            asset_dir: PathBuf::from(DEFAULT_ASSETS),
            state_path: default_state_path(),
        }
    }
}

impl ServerConfig {
    /// Check the configuration before binding anything.
    pub fn validate(&self) -> Result<(), OverprintError> {
        if self.listen_addr.trim().is_empty() {
            return Err(OverprintError::Config("listen address is empty".into()));
        }
        if !self.asset_dir.is_dir() {
            // Pages may all be absolute URLs, so this is only a warning.
            tracing::warn!(dir = %self.asset_dir.display(), "asset directory does not exist");
        }
        if let Some(path) = &self.state_path
            && path.is_dir()
        {
            return Err(OverprintError::Config(format!(
                "state path {} is a directory",
                path.display()
            )));
        }
        Ok(())
    }
}

/// `<data dir>/overprint/state.json`, if the platform has a data dir.
pub fn default_state_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| state_path_in(&dir))
}

fn state_path_in(data_dir: &Path) -> PathBuf {
    data_dir.join("overprint").join("state.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_path_layout() {
        assert_eq!(
            state_path_in(Path::new("/home/op/.local/share")),
            PathBuf::from("/home/op/.local/share/overprint/state.json")
        );
    }

    #[test]
    fn test_validate() {
        let config = ServerConfig {
            listen_addr: "127.0.0.1:0".into(),
            asset_dir: PathBuf::from("does-not-exist"),
            state_path: None,
        };
        assert!(config.validate().is_ok());

        let empty = ServerConfig {
            listen_addr: " ".into(),
            ..config.clone()
        };
        assert!(matches!(empty.validate(), Err(OverprintError::Config(_))));

        let dir_state = ServerConfig {
            state_path: Some(std::env::temp_dir()),
            ..config
        };
        assert!(dir_state.validate().is_err());
    }
}
