//! Route manifest watcher for hot reload.
//!
//! # Design Decisions
//! - Only validated manifests are forwarded; a broken edit keeps the
//!   current routes
//! - A single save often fires several notify events; a manifest equal to
//!   the last one forwarded is dropped

use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::load_config;
use crate::config::schema::RouterConfig;

/// What a reload attempt did.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ReloadOutcome {
    /// A new manifest with this many routes was forwarded.
    Forwarded(usize),
    /// The manifest matches the last one forwarded.
    Unchanged,
    /// The manifest failed to load or validate.
    Rejected,
    /// Nobody is listening for updates any more.
    Closed,
}

/// Loads the manifest and forwards it when it actually changed.
struct Reloader {
    path: PathBuf,
    last: Option<RouterConfig>,
    tx: mpsc::UnboundedSender<RouterConfig>,
}

impl Reloader {
    fn reload(&mut self) -> ReloadOutcome {
        let config = match load_config(&self.path) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!(
                    path = ?self.path,
                    error = %e,
                    "Failed to reload route manifest, keeping current routes"
                );
                return ReloadOutcome::Rejected;
            }
        };

        if self.last.as_ref() == Some(&config) {
            tracing::debug!(path = ?self.path, "Route manifest unchanged, reload skipped");
            return ReloadOutcome::Unchanged;
        }

        let routes = config.routes.len();
        if self.tx.send(config.clone()).is_err() {
            tracing::warn!(path = ?self.path, "Route manifest receiver dropped");
            return ReloadOutcome::Closed;
        }
        self.last = Some(config);
        tracing::info!(path = ?self.path, routes, "Route manifest reloaded");
        ReloadOutcome::Forwarded(routes)
    }
}

/// A watcher that monitors the route manifest for changes.
pub struct ConfigWatcher {
    reloader: Reloader,
}

impl ConfigWatcher {
    /// Create a new ConfigWatcher.
    ///
    /// `current` is the manifest already in use, so an event that does not
    /// change it is not forwarded. Returns the watcher and a receiver for
    /// validated manifest updates.
    pub fn new(
        path: &Path,
        current: Option<RouterConfig>,
    ) -> (Self, mpsc::UnboundedReceiver<RouterConfig>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let reloader = Reloader {
            path: path.to_path_buf(),
            last: current,
            tx,
        };
        (Self { reloader }, rx)
    }

    /// Start watching the file. Keep the returned watcher alive for as long
    /// as updates are wanted.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let path = self.reloader.path.clone();
        let mut reloader = self.reloader;

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) if event.kind.is_modify() || event.kind.is_create() => {
                    reloader.reload();
                }
                Ok(_) => {}
                Err(e) => tracing::error!("Watch error: {:?}", e),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?path, "Route manifest watcher started");
        Ok(watcher)
    }
}
