//! Configuration file watcher for hot reload.
//!
//! The directory holding the file is watched rather than the file itself:
//! editors that save through a temp file and a rename replace the inode,
//! which a watch on the file would lose. Events are filtered by file name.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::load_config;
use crate::config::schema::AppConfig;

/// Monitors the configuration file and publishes every valid config that
/// differs from the last one published.
pub struct ConfigWatcher {
    path: PathBuf,
    current: AppConfig,
    update_tx: mpsc::UnboundedSender<AppConfig>,
}

impl ConfigWatcher {
    /// Create a watcher for `path`, starting from the config already loaded
    /// from it.
    ///
    /// Returns the watcher and a receiver for configuration updates.
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

    /// Start watching. The returned watcher must be kept alive.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let Self {
            path,
            current,
            update_tx,
        } = self;

        let dir = watch_dir(&path);
        let file_name = path.file_name().map(OsString::from);
        let mut reloader = Reloader {
            path: path.clone(),
            last: current,
            tx: update_tx,
        };

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) if concerns_file(&event, file_name.as_deref()) => reloader.reload(),
                Ok(_) => {}
                Err(e) => tracing::error!(error = ?e, "Watch error"),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&dir, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?path, dir = ?dir, "Config watcher started");
        Ok(watcher)
    }
}

struct Reloader {
    path: PathBuf,
    last: AppConfig,
    tx: mpsc::UnboundedSender<AppConfig>,
}

impl Reloader {
    fn reload(&mut self) {
        // A truncate-then-write save shows up as an empty file first.
        if std::fs::metadata(&self.path).is_ok_and(|m| m.len() == 0) {
            tracing::debug!(path = ?self.path, "Config file empty, waiting for write");
            return;
        }

        match load_config(&self.path) {
            Ok(config) if config == self.last => {
                tracing::debug!(path = ?self.path, "Config file unchanged, skipping reload");
            }
            Ok(config) => {
                tracing::info!(path = ?self.path, "Config file changed, publishing update");
                self.last = config.clone();
                let _ = self.tx.send(config);
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to reload config, keeping current configuration");
            }
        }
    }
}

fn watch_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn concerns_file(event: &Event, file_name: Option<&std::ffi::OsStr>) -> bool {
    if !(event.kind.is_modify() || event.kind.is_create()) {
        return false;
    }
    event
        .paths
        .iter()
        .any(|p| p.file_name().is_some_and(|name| Some(name) == file_name))
}

#[cfg(test)]
mod tests {
    use notify::event::{CreateKind, EventKind, ModifyKind, RemoveKind, RenameMode};

    use super::*;

    #[test]
    fn test_watch_dir() {
        assert_eq!(watch_dir(Path::new("/etc/charity/site.toml")), PathBuf::from("/etc/charity"));
        assert_eq!(watch_dir(Path::new("site.toml")), PathBuf::from("."));
    }

    #[test]
    fn test_events_filtered_by_file_name() {
        let name = Some(std::ffi::OsStr::new("site.toml"));

        let rename = Event::new(EventKind::Modify(ModifyKind::Name(RenameMode::To)))
            .add_path(PathBuf::from("/etc/charity/site.toml"));
        assert!(concerns_file(&rename, name));

        let temp = Event::new(EventKind::Create(CreateKind::File))
            .add_path(PathBuf::from("/etc/charity/.site.toml.swp"));
        assert!(!concerns_file(&temp, name));

        let removed = Event::new(EventKind::Remove(RemoveKind::File))
            .add_path(PathBuf::from("/etc/charity/site.toml"));
        assert!(!concerns_file(&removed, name));
    }
}
