//! File watching for rebuild-on-change.

use std::path::{Path, PathBuf};
use std::sync::mpsc;

use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc as async_mpsc;

/// Events emitted by the file watcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchEvent {
    /// File was created
    Created(PathBuf),

    /// File was modified
    Modified(PathBuf),

    /// File was deleted
    Deleted(PathBuf),
}

impl WatchEvent {
    /// Path the event refers to.
    pub fn path(&self) -> &Path {
        match self {
            Self::Created(path) | Self::Modified(path) | Self::Deleted(path) => path,
        }
    }
}

/// File watcher for detecting changes.
pub struct FileWatcher {
    _watcher: Option<RecommendedWatcher>,
}

impl FileWatcher {
    /// Create a new file watcher for `targets` under `root`.
    ///
    /// The root is watched recursively and only events at or below a target
    /// are forwarded, so targets that appear later or are replaced by a rename
    /// are still seen. A missing root is skipped. Matching events are not
    /// debounced.
    ///
    /// Returns the watcher and a channel to receive events.
    pub fn new(
        root: &Path,
        targets: &[PathBuf],
    ) -> Result<(Self, async_mpsc::Receiver<WatchEvent>), std::io::Error> {
        let (async_tx, async_rx) = async_mpsc::channel(100);

        let Ok(base) = root.canonicalize() else {
            tracing::warn!("Not watching missing path: {}", root.display());
            return Ok((Self { _watcher: None }, async_rx));
        };

        // Event paths are reported under the canonical root
        let targets: Vec<PathBuf> = targets
            .iter()
            .map(|t| base.join(t.strip_prefix(root).unwrap_or(t)))
            .collect();

        let (sync_tx, sync_rx) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(move |res: Result<notify::Event, _>| {
            if let Ok(event) = res {
                let _ = sync_tx.send(event);
            }
        })
        .map_err(std::io::Error::other)?;

        watcher
            .watch(&base, RecursiveMode::Recursive)
            .map_err(std::io::Error::other)?;

        std::thread::spawn(move || {
            while let Ok(event) = sync_rx.recv() {
                for path in event.paths {
                    if !is_relevant(&path, &targets) {
                        continue;
                    }
                    if let Some(e) = classify_event(&path, &event.kind) {
                        if async_tx.blocking_send(e).is_err() {
                            return;
                        }
                    }
                }
            }
        });

        Ok((
            Self {
                _watcher: Some(watcher),
            },
            async_rx,
        ))
    }
}

/// Whether a changed path is one of the targets or inside one.
fn is_relevant(path: &Path, targets: &[PathBuf]) -> bool {
    targets.iter().any(|target| path.starts_with(target))
}

/// Classify a notify event into a WatchEvent.
fn classify_event(path: &Path, kind: &notify::EventKind) -> Option<WatchEvent> {
    use notify::EventKind;

    match kind {
        EventKind::Create(_) => Some(WatchEvent::Created(path.to_path_buf())),
        EventKind::Remove(_) => Some(WatchEvent::Deleted(path.to_path_buf())),
        EventKind::Modify(_) => Some(WatchEvent::Modified(path.to_path_buf())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::Duration;
    use tempfile::tempdir;

    #[test]
    fn classifies_event_kinds() {
        use notify::event::{AccessKind, CreateKind, ModifyKind, RemoveKind};
        use notify::EventKind;

        let path = Path::new("content/index.md");

        assert_eq!(
            classify_event(path, &EventKind::Create(CreateKind::File)),
            Some(WatchEvent::Created(path.to_path_buf()))
        );
        assert_eq!(
            classify_event(path, &EventKind::Modify(ModifyKind::Any)),
            Some(WatchEvent::Modified(path.to_path_buf()))
        );
        assert_eq!(
            classify_event(path, &EventKind::Remove(RemoveKind::File)),
            Some(WatchEvent::Deleted(path.to_path_buf()))
        );
        assert_eq!(
            classify_event(path, &EventKind::Access(AccessKind::Any)),
            None
        );
    }

    #[test]
    fn filters_paths_outside_targets() {
        let targets = vec![
            PathBuf::from("/site/content"),
            PathBuf::from("/site/themes/my-theme/layout.html"),
        ];

        assert!(is_relevant(Path::new("/site/content"), &targets));
        assert!(is_relevant(Path::new("/site/content/index.md"), &targets));
        assert!(is_relevant(
            Path::new("/site/themes/my-theme/layout.html"),
            &targets
        ));
        assert!(!is_relevant(Path::new("/site/dist/index.html"), &targets));
        assert!(!is_relevant(Path::new("/site/content-old/a.md"), &targets));
        assert!(!is_relevant(
            Path::new("/site/themes/my-theme/styles.css"),
            &targets
        ));
    }

    /// Wait for the next event, skipping any that don't match.
    async fn next_event_for(
        rx: &mut async_mpsc::Receiver<WatchEvent>,
        wanted: impl Fn(&Path) -> bool,
    ) -> Option<WatchEvent> {
        tokio::time::timeout(Duration::from_secs(3), async {
            while let Some(event) = rx.recv().await {
                if wanted(event.path()) {
                    return Some(event);
                }
            }
            None
        })
        .await
        .ok()
        .flatten()
    }

    #[tokio::test]
    async fn watches_file_changes() {
        let temp = tempdir().unwrap();
        let content = temp.path().join("content");
        fs::create_dir_all(&content).unwrap();

        // Create the watcher first (so it catches file creation)
        let (watcher, mut rx) = FileWatcher::new(temp.path(), &[content.clone()]).unwrap();

        // Give inotify time to set up
        tokio::time::sleep(Duration::from_millis(100)).await;

        fs::write(content.join("test.md"), "# Created").unwrap();

        let event = next_event_for(&mut rx, |p| p.ends_with("test.md")).await;

        drop(watcher);

        assert!(event.is_some(), "timeout waiting for file watch event");
    }

    #[tokio::test]
    async fn ignores_changes_outside_targets() {
        let temp = tempdir().unwrap();
        let content = temp.path().join("content");
        fs::create_dir_all(&content).unwrap();
        fs::create_dir_all(temp.path().join("dist")).unwrap();

        let (_watcher, mut rx) = FileWatcher::new(temp.path(), &[content.clone()]).unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;

        fs::write(temp.path().join("dist/index.html"), "<p>out</p>").unwrap();
        fs::write(content.join("index.md"), "# In").unwrap();

        let event = next_event_for(&mut rx, |_| true).await.unwrap();
        assert!(event.path().ends_with("content/index.md") || event.path().ends_with("content"));
    }

    #[tokio::test]
    async fn sees_content_dir_created_after_start() {
        let temp = tempdir().unwrap();
        let content = temp.path().join("content");

        let (_watcher, mut rx) = FileWatcher::new(temp.path(), &[content.clone()]).unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;

        fs::create_dir_all(&content).unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;
        fs::write(content.join("late.md"), "# Late").unwrap();

        let event = next_event_for(&mut rx, |p| p.ends_with("late.md")).await;
        assert!(event.is_some(), "file in late content dir was not seen");
    }

    #[tokio::test]
    async fn sees_layout_replaced_by_rename() {
        let temp = tempdir().unwrap();
        let theme = temp.path().join("themes/my-theme");
        fs::create_dir_all(&theme).unwrap();
        let layout = theme.join("layout.html");
        fs::write(&layout, "{{Title}}").unwrap();

        let (_watcher, mut rx) = FileWatcher::new(temp.path(), &[layout.clone()]).unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;

        // Editors save by writing a sibling and renaming it over the original
        let swap = theme.join("layout.html.swp");
        fs::write(&swap, "<b>{{Title}}</b>").unwrap();
        fs::rename(&swap, &layout).unwrap();

        let first = next_event_for(&mut rx, |p| p.ends_with("layout.html")).await;
        assert!(first.is_some(), "rename over layout was not seen");

        // Later edits to the replaced file are still seen
        tokio::time::sleep(Duration::from_millis(100)).await;
        while rx.try_recv().is_ok() {}
        fs::write(&layout, "<i>{{Title}}</i>").unwrap();

        let second = next_event_for(&mut rx, |p| p.ends_with("layout.html")).await;
        assert!(second.is_some(), "edit after rename was not seen");
    }

    #[tokio::test]
    async fn skips_missing_root() {
        let temp = tempdir().unwrap();
        let missing = temp.path().join("nope");

        let result = FileWatcher::new(&missing, &[missing.join("content")]);

        assert!(result.is_ok());
    }
}
