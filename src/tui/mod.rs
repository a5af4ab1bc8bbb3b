//! Interactive viewer.
//!
//! [`run`] drives the loop: it drains document loads from a background
//! [`Loader`], draws the [`App`] on a [`Canvas`], and feeds the canvas'
//! intents back into the app. Documents that resolve to a local file are
//! watched and reloaded when they change.

mod app;
mod canvas;
mod content;
mod ui;
mod watcher;

pub use app::{App, Clipboard, FocusMode, SystemClipboard, TocEntry};
pub use canvas::{Canvas, TerminalCanvas};
pub use content::ContentState;

use crate::error::Error;
use crate::parser::{Document, Transformer, load_document};
use crate::resolver::Resolver;
use color_eyre::Result;
use color_eyre::eyre::Report;
use std::path::Path;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;
use watcher::FileWatcher;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Outcome of one background load.
#[derive(Debug)]
pub enum LoadEvent {
    Loaded(Document),
    Failed(Error),
}

/// Resolves and parses a document off the UI thread.
pub struct Loader {
    locator: String,
    resolver: Arc<dyn Resolver>,
    transformer: Transformer,
    tx: Sender<LoadEvent>,
    rx: Receiver<LoadEvent>,
}

impl Loader {
    pub fn new(locator: impl Into<String>, resolver: Arc<dyn Resolver>, transformer: Transformer) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            locator: locator.into(),
            resolver,
            transformer,
            tx,
            rx,
        }
    }

    pub fn locator(&self) -> &str {
        &self.locator
    }

    /// Start loading in a background thread; the result is delivered
    /// through [`Loader::try_recv`].
    pub fn spawn(&self) {
        let tx = self.tx.clone();
        let locator = self.locator.clone();
        let resolver = Arc::clone(&self.resolver);
        let transformer = self.transformer.clone();

        thread::spawn(move || {
            let event = match load_document(&locator, resolver.as_ref(), &transformer) {
                Ok(document) => LoadEvent::Loaded(document),
                Err(e) => LoadEvent::Failed(e),
            };
            // The viewer may already be gone
            let _ = tx.send(event);
        });
    }

    pub fn try_recv(&self) -> Option<LoadEvent> {
        self.rx.try_recv().ok()
    }
}

/// Feed one load result into the app. Only a failed initial load is fatal;
/// a failed reload keeps the current document.
fn apply_load_event(app: &mut App, event: LoadEvent, locator: &str) -> Result<()> {
    match event {
        LoadEvent::Loaded(document) => app.set_document(document),
        LoadEvent::Failed(e) if app.is_loading() => {
            return Err(Report::new(e).wrap_err(format!("could not load {locator}")));
        }
        LoadEvent::Failed(e) => {
            log::warn!("reload of {locator} failed: {e}");
            app.reload_failed(&e);
        }
    }
    Ok(())
}

/// Watch `locator` if it names an existing local file.
fn watch_local(locator: &str) -> Option<FileWatcher> {
    let path = Path::new(locator);
    if !path.is_file() {
        return None;
    }
    let path = path.canonicalize().ok()?;
    match FileWatcher::watch(&path) {
        Ok(watcher) => {
            log::debug!("watching {} for changes", path.display());
            Some(watcher)
        }
        Err(e) => {
            log::warn!("live reload disabled for {}: {e}", path.display());
            None
        }
    }
}

/// Run the viewer until the user exits.
///
/// # Errors
///
/// Fails if the initial load fails or the canvas reports an I/O error.
pub fn run(canvas: &mut dyn Canvas, app: &mut App, loader: &Loader) -> Result<()> {
    let mut watcher = None;
    loader.spawn();

    loop {
        while let Some(event) = loader.try_recv() {
            let first_load = app.is_loading();
            apply_load_event(app, event, loader.locator())?;
            if first_load {
                watcher = watch_local(loader.locator());
            }
        }

        if let Some(watcher) = watcher.as_mut() {
            if watcher.check_for_changes() {
                log::info!("{} changed, reloading", watcher.path().display());
                loader.spawn();
            }
        }

        canvas.draw(app)?;

        if let Some(action) = canvas.next_intent(app.focus().keybinding_mode(), POLL_INTERVAL)? {
            app.apply(action);
        }

        if app.should_exit() {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::keybindings::{Action, KeybindingMode};
    use crate::parser::{Heading, Section};
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Instant;

    struct NoClipboard;

    impl Clipboard for NoClipboard {
        fn write_all(&mut self, _text: &str) -> std::result::Result<(), String> {
            Ok(())
        }
    }

    /// Answers with `content` on the first `ok_calls` requests, then fails.
    struct CountingResolver {
        content: &'static str,
        ok_calls: usize,
        calls: AtomicUsize,
    }

    impl CountingResolver {
        fn new(content: &'static str, ok_calls: usize) -> Arc<Self> {
            Arc::new(Self {
                content,
                ok_calls,
                calls: AtomicUsize::new(0),
            })
        }
    }

    impl Resolver for CountingResolver {
        fn resolve(&self, _locator: &str) -> crate::Result<Vec<u8>> {
            if self.calls.fetch_add(1, Ordering::SeqCst) < self.ok_calls {
                Ok(self.content.as_bytes().to_vec())
            } else {
                Err(Error::NotApplicable)
            }
        }
    }

    /// Replays a fixed list of intents once a document is on screen, then
    /// exits.
    struct ScriptedCanvas {
        intents: VecDeque<Action>,
        draws: usize,
        loaded: bool,
        modes: Vec<KeybindingMode>,
    }

    impl ScriptedCanvas {
        fn new(intents: &[Action]) -> Self {
            Self {
                intents: intents.iter().copied().collect(),
                draws: 0,
                loaded: false,
                modes: Vec::new(),
            }
        }
    }

    impl Canvas for ScriptedCanvas {
        fn draw(&mut self, app: &App) -> Result<()> {
            self.draws += 1;
            self.loaded = !app.is_loading();
            Ok(())
        }

        fn next_intent(&mut self, mode: KeybindingMode, _timeout: Duration) -> Result<Option<Action>> {
            if !self.loaded {
                thread::sleep(Duration::from_millis(2));
                return Ok(None);
            }
            self.modes.push(mode);
            Ok(Some(self.intents.pop_front().unwrap_or(Action::Exit)))
        }
    }

    fn app() -> App {
        App::new("notes.md", &Config::default(), Box::new(NoClipboard))
    }

    fn wait_for(loader: &Loader) -> LoadEvent {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if let Some(event) = loader.try_recv() {
                return event;
            }
            assert!(Instant::now() < deadline, "load did not finish");
            thread::sleep(Duration::from_millis(2));
        }
    }

    #[test]
    fn test_run_navigates_then_exits() {
        let resolver = CountingResolver::new("# One\nfirst\n# Two\nsecond\n\nthird\n", 1);
        let loader = Loader::new("notes.md", resolver, Transformer::plain());
        let mut canvas = ScriptedCanvas::new(&[Action::MoveDown, Action::Select, Action::MoveDown]);
        let mut app = app();

        run(&mut canvas, &mut app, &loader).unwrap();

        assert!(app.should_exit());
        assert_eq!(app.selected_heading(), 1);
        assert_eq!(app.focus(), FocusMode::Content);
        assert_eq!(app.selected_section(), 1);
        assert!(canvas.draws >= 4);
        assert_eq!(
            canvas.modes,
            vec![
                KeybindingMode::TableOfContents,
                KeybindingMode::TableOfContents,
                KeybindingMode::Content,
                KeybindingMode::Content,
            ]
        );
    }

    #[test]
    fn test_initial_failure_ends_run() {
        let loader = Loader::new("nowhere.md", CountingResolver::new("", 0), Transformer::plain());
        let mut canvas = ScriptedCanvas::new(&[]);
        let mut app = app();

        let err = run(&mut canvas, &mut app, &loader).unwrap_err();
        assert!(format!("{err:#}").contains("nowhere.md"));
        assert!(app.is_loading());
    }

    #[test]
    fn test_reload_failure_keeps_document() {
        let loader = Loader::new("notes.md", CountingResolver::new("# Only\ntext\n", 1), Transformer::plain());
        let mut app = app();

        loader.spawn();
        apply_load_event(&mut app, wait_for(&loader), loader.locator()).unwrap();
        assert_eq!(app.selected_title(), Some("Only"));

        loader.spawn();
        let event = wait_for(&loader);
        assert!(matches!(event, LoadEvent::Failed(Error::NotApplicable)));
        apply_load_event(&mut app, event, loader.locator()).unwrap();

        assert_eq!(app.selected_title(), Some("Only"));
        assert!(app.status_message.as_deref().is_some_and(|m| m.starts_with('✗')));
    }

    #[test]
    fn test_reload_replaces_document() {
        let mut app = app();
        let doc = |title: &str| {
            Document::new(vec![Heading {
                title: title.into(),
                level: 1,
                sections: vec![Section::new("body")],
            }])
        };

        apply_load_event(&mut app, LoadEvent::Loaded(doc("Before")), "notes.md").unwrap();
        apply_load_event(&mut app, LoadEvent::Loaded(doc("After")), "notes.md").unwrap();
        assert_eq!(app.selected_title(), Some("After"));
    }

    #[test]
    fn test_watch_local_only_for_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.md");
        std::fs::write(&path, "# Notes\n").unwrap();

        assert!(watch_local(path.to_str().unwrap()).is_some());
        assert!(watch_local("https://example.com/readme.md").is_none());
        assert!(watch_local("github.com/user/repo").is_none());
        assert!(watch_local(dir.path().to_str().unwrap()).is_none());
    }
}
