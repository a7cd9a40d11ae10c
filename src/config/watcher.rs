//! Configuration file watcher for hot reload.
//!
//! The parent directory is watched rather than the file itself so that
//! editors which save by rename-and-replace keep triggering reloads.

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc;

use crate::config::loader::load_config;
use crate::config::schema::AppConfig;

/// A watcher that monitors the configuration file for changes.
pub struct ConfigWatcher {
    path: PathBuf,
    current: AppConfig,
    update_tx: mpsc::UnboundedSender<AppConfig>,
}

impl ConfigWatcher {
    /// Create a watcher for `path`, seeded with the config already in use.
    ///
    /// Returns the watcher and a receiver for configuration updates. Only
    /// configs that differ from the last one delivered are sent.
    pub fn new(path: &Path, current: AppConfig) -> (Self, mpsc::UnboundedReceiver<AppConfig>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        (
            Self {
                path: path.to_path_buf(),
                current,
                update_tx,
            },
            update_rx,
        )
    }

    /// Start watching the file. The returned handle must be kept alive.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let Self {
            path,
            mut current,
            update_tx,
        } = self;

        let file_name: Option<OsString> = path.file_name().map(ToOwned::to_owned);
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let config_path = path.clone();
        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if !(event.kind.is_modify() || event.kind.is_create()) {
                        return;
                    }
                    let touches_config = event
                        .paths
                        .iter()
                        .any(|p| p.file_name().map(ToOwned::to_owned) == file_name);
                    if !touches_config {
                        return;
                    }

                    match load_config(&config_path) {
                        Ok(new_config) if new_config == current => {
                            tracing::debug!(path = ?config_path, "Config unchanged, skipping");
                        }
                        Ok(new_config) => {
                            tracing::info!(path = ?config_path, "Config file changed, reloading");
                            current = new_config.clone();
                            let _ = update_tx.send(new_config);
                        }
                        Err(e) => {
                            tracing::error!(
                                error = %e,
                                "Failed to reload config. Keeping current configuration."
                            );
                        }
                    }
                }
                Err(e) => tracing::error!(error = ?e, "Watch error"),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&dir, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?path, "Config watcher started");
        Ok(watcher)
    }
}
