//! Live reload for documents resolved from the local file system.

use notify::{
    Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher,
    event::{AccessKind, AccessMode, ModifyKind},
};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::time::{Duration, Instant};

/// Watches one file and reports debounced modifications.
pub struct FileWatcher {
    // Dropping the watcher stops event delivery
    _watcher: RecommendedWatcher,
    receiver: Receiver<Result<Event, notify::Error>>,
    path: PathBuf,
    debounce: Debounce,
}

/// Rate limit for reloads. A change inside the window is held back and
/// reported by the first check after the window ends.
struct Debounce {
    window: Duration,
    last_fired: Instant,
    pending: bool,
}

impl Debounce {
    fn new(window: Duration, now: Instant) -> Self {
        Self {
            window,
            last_fired: now,
            pending: false,
        }
    }

    fn check(&mut self, changed: bool, now: Instant) -> bool {
        self.pending |= changed;
        if self.pending && now.duration_since(self.last_fired) >= self.window {
            self.pending = false;
            self.last_fired = now;
            return true;
        }
        false
    }
}

impl FileWatcher {
    /// Start watching `path`, which should be canonical so that event paths
    /// compare equal.
    pub fn watch(path: &Path) -> Result<Self, notify::Error> {
        let (tx, rx) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(tx)?;
        watcher.watch(path, RecursiveMode::NonRecursive)?;

        Ok(Self {
            _watcher: watcher,
            receiver: rx,
            path: path.to_path_buf(),
            debounce: Debounce::new(Duration::from_millis(100), Instant::now()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Drain pending events. Returns true when the file changed since the
    /// last reported change and that report is older than the debounce
    /// window.
    pub fn check_for_changes(&mut self) -> bool {
        let mut changed = false;

        loop {
            match self.receiver.try_recv() {
                Ok(Ok(event)) => changed |= is_relevant(&self.path, &event),
                Ok(Err(e)) => log::debug!("watch error on {}: {e}", self.path.display()),
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            }
        }

        self.debounce.check(changed, Instant::now())
    }
}

fn is_relevant(path: &Path, event: &Event) -> bool {
    event.paths.iter().any(|p| p == path)
        && matches!(
            event.kind,
            EventKind::Modify(ModifyKind::Data(_))
                | EventKind::Modify(ModifyKind::Any)
                | EventKind::Access(AccessKind::Close(AccessMode::Write))
                | EventKind::Create(_)
        )
}
