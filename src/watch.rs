use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};

use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};

use crate::error::Result;

/// Reports changes to one input file.
///
/// The parent directory is watched rather than the file itself, so editors
/// that save by replacing the file keep being seen.
pub struct InputWatcher {
    // Dropping the watcher stops the events
    _watcher: RecommendedWatcher,
    rx: Receiver<notify::Result<Event>>,
    path: PathBuf,
}

impl InputWatcher {
    pub fn new(path: &Path) -> Result<Self> {
        let (tx, rx) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            let _ = tx.send(res);
        })?;

        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        watcher.watch(dir, RecursiveMode::NonRecursive)?;

        Ok(Self {
            _watcher: watcher,
            rx,
            path: path.to_path_buf(),
        })
    }

    /// Block until the input is created or modified. Returns `false` once the
    /// watcher has shut down.
    pub fn wait_for_change(&self) -> bool {
        while let Ok(res) = self.rx.recv() {
            match res {
                Ok(event) if touches_input(&event, &self.path) => return true,
                Ok(_) => {}
                Err(e) => tracing::warn!("watch error: {e}"),
            }
        }
        false
    }
}

fn touches_input(event: &Event, input: &Path) -> bool {
    if !(event.kind.is_modify() || event.kind.is_create()) {
        return false;
    }
    event
        .paths
        .iter()
        .any(|p| p.file_name().is_some() && p.file_name() == input.file_name())
}
