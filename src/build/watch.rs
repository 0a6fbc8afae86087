//! Rebuild-on-change for `src/`.

use super::{compile, copy_dist};
use crate::error::{BuildError, Result};
use crate::project::ProjectLayout;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc;

/// Recursive filesystem watcher over one directory
pub struct SourceWatcher {
    // Dropping the watcher stops event delivery
    _watcher: RecommendedWatcher,
    events: mpsc::Receiver<Event>,
}

impl SourceWatcher {
    /// Start watching `dir` and everything beneath it
    pub fn new(dir: &Path) -> Result<Self> {
        let watch_error = |e: notify::Error| BuildError::Watch {
            path: dir.to_path_buf(),
            reason: e.to_string(),
        };

        let (tx, events) = mpsc::channel::<Event>(100);
        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            if let Ok(event) = res {
                let _ = tx.blocking_send(event);
            }
        })
        .map_err(watch_error)?;

        watcher
            .watch(dir, RecursiveMode::Recursive)
            .map_err(watch_error)?;

        Ok(Self {
            _watcher: watcher,
            events,
        })
    }

    /// Wait for the next change, then keep collecting events until the
    /// directory has been quiet for `debounce`. Returns the changed paths,
    /// or `None` once the watcher has stopped.
    pub async fn next_change(&mut self, debounce: Duration) -> Option<Vec<PathBuf>> {
        let mut changed = Vec::new();
        loop {
            let event = self.events.recv().await?;
            if is_change(&event) {
                changed.extend(event.paths);
                break;
            }
        }

        loop {
            match tokio::time::timeout(debounce, self.events.recv()).await {
                Ok(Some(event)) if is_change(&event) => changed.extend(event.paths),
                Ok(Some(_)) => {}
                Ok(None) | Err(_) => break,
            }
        }

        changed.sort();
        changed.dedup();
        Some(changed)
    }
}

/// Reads and metadata-only access never trigger a rebuild
fn is_change(event: &Event) -> bool {
    !matches!(event.kind, EventKind::Access(_))
}

/// Compile and copy once, then again whenever `src/` changes, until Ctrl-C.
///
/// Events are batched until `src/` has been quiet for `debounce`.
/// `on_build` sees the outcome of every run; a failed run does not stop
/// the watch.
pub async fn watch<F>(
    layout: &ProjectLayout,
    name: &str,
    debounce: Duration,
    mut on_build: F,
) -> Result<()>
where
    F: FnMut(&Result<()>),
{
    let source = layout.source_dir();
    let mut watcher = SourceWatcher::new(&source)?;
    log::info!("Watching {}", source.display());

    on_build(&rebuild(layout, name).await);

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                log::info!("Stopping watch");
                return Ok(());
            }
            change = watcher.next_change(debounce) => {
                let Some(paths) = change else {
                    log::warn!("Watcher for {} stopped", source.display());
                    return Ok(());
                };
                for path in &paths {
                    log::debug!("Changed: {}", path.display());
                }
                on_build(&rebuild(layout, name).await);
            }
        }
    }
}

async fn rebuild(layout: &ProjectLayout, name: &str) -> Result<()> {
    compile(layout, name).await?;
    copy_dist(layout, name).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};

    const WAIT: Duration = Duration::from_secs(10);
    const DEBOUNCE: Duration = Duration::from_millis(100);

    #[tokio::test]
    async fn content_change_is_seen_even_when_mtime_is_restored() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("hero6e.js");
        fs::write(&script, "export const a = 1;").unwrap();
        let modified = fs::metadata(&script).unwrap().modified().unwrap();

        let mut watcher = SourceWatcher::new(dir.path()).unwrap();
        fs::write(&script, "export const a = 2;").unwrap();
        File::options()
            .write(true)
            .open(&script)
            .unwrap()
            .set_modified(modified)
            .unwrap();

        let changed = tokio::time::timeout(WAIT, watcher.next_change(DEBOUNCE))
            .await
            .unwrap()
            .unwrap();
        assert!(changed.iter().any(|p| p.ends_with("hero6e.js")));
    }

    #[tokio::test]
    async fn files_in_new_subdirectories_are_seen() {
        let dir = tempfile::tempdir().unwrap();
        let mut watcher = SourceWatcher::new(dir.path()).unwrap();

        fs::create_dir(dir.path().join("lang")).unwrap();
        fs::write(dir.path().join("lang").join("en.json"), "{}").unwrap();

        let changed = tokio::time::timeout(WAIT, watcher.next_change(DEBOUNCE))
            .await
            .unwrap()
            .unwrap();
        assert!(!changed.is_empty());
    }

    #[test]
    fn missing_directory_cannot_be_watched() {
        let dir = tempfile::tempdir().unwrap();
        let err = SourceWatcher::new(&dir.path().join("nope")).err().unwrap();
        assert!(matches!(
            err,
            crate::ReleaseError::Build(BuildError::Watch { .. })
        ));
    }
}
