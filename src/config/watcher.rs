//! Configuration file watcher for re-validation on save.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::load_config;
use crate::config::schema::AppConfig;

/// A watcher that monitors the configuration file for changes.
pub struct ConfigWatcher {
    path: PathBuf,
    update_tx: mpsc::UnboundedSender<AppConfig>,
}

impl ConfigWatcher {
    /// Create a new ConfigWatcher.
    ///
    /// Returns the watcher and a receiver for configurations that loaded and
    /// validated successfully.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<AppConfig>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        (
            Self {
                path: path.to_path_buf(),
                update_tx,
            },
            update_rx,
        )
    }

    /// Start watching in a background thread; keep the returned watcher alive.
    ///
    /// The parent directory is watched so editors that save by renaming a
    /// temporary file over the original are still seen.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let tx = self.update_tx.clone();
        let path = self.path.clone();
        let file_name: Option<OsString> = path.file_name().map(|n| n.to_os_string());
        let mut last_sent: Option<AppConfig> = None;

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    let relevant = (event.kind.is_modify() || event.kind.is_create())
                        && event
                            .paths
                            .iter()
                            .any(|p| p.file_name().map(|n| n.to_os_string()) == file_name);
                    if !relevant {
                        return;
                    }

                    tracing::info!(
                        path = %path.display(),
                        "Config file change detected, revalidating"
                    );
                    match load_config(&path) {
                        Ok(new_config) => {
                            // Editors often emit several events per save.
                            if last_sent.as_ref() == Some(&new_config) {
                                return;
                            }
                            last_sent = Some(new_config.clone());
                            let _ = tx.send(new_config);
                        }
                        Err(e) => {
                            tracing::error!(
                                error = %e,
                                "Invalid config after change, keeping last valid configuration"
                            );
                        }
                    }
                }
                Err(e) => tracing::error!("Watch error: {:?}", e),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        let watch_root = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        watcher.watch(&watch_root, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, "Config watcher started");
        Ok(watcher)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::loader::parse_config;
    use std::fs;
    use tokio::time::{sleep, timeout};

    fn level(level: &str) -> String {
        format!("[logging]\nlevel = \"{level}\"\n")
    }

    /// Save the way editors do: write a sibling file, then rename it over.
    fn save(path: &Path, content: &str) {
        let tmp = path.with_extension("toml.tmp");
        fs::write(&tmp, content).unwrap();
        fs::rename(&tmp, path).unwrap();
    }

    #[tokio::test]
    async fn test_only_new_valid_configs_are_forwarded() {
        let dir = std::env::temp_dir().join(format!("spa-router-watch-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("app.toml");
        fs::write(&path, level("info")).unwrap();

        let (watcher, mut rx) = ConfigWatcher::new(&path);
        let _watcher = watcher.run().unwrap();
        sleep(Duration::from_millis(200)).await;

        save(&path, &level("debug"));
        let first = timeout(Duration::from_secs(5), rx.recv()).await.unwrap();
        assert_eq!(first, Some(parse_config(&level("debug")).unwrap()));

        save(&path, &level("loud"));
        sleep(Duration::from_millis(300)).await;
        save(&path, &level("debug"));
        sleep(Duration::from_millis(300)).await;
        save(&path, &level("warn"));

        let next = timeout(Duration::from_secs(5), rx.recv()).await.unwrap();
        assert_eq!(next, Some(parse_config(&level("warn")).unwrap()));

        sleep(Duration::from_millis(300)).await;
        assert!(rx.try_recv().is_err());

        let _ = fs::remove_dir_all(&dir);
    }
}
