//! Theme store - resolves and persists the display preference

use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::{ColorSchemeSignal, ThemeMode};
use crate::infrastructure::storage::KeyValueStore;

/// Storage key of the persisted preference
pub const THEME_SLOT: &str = "utm_theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeSnapshot {
    pub preference: ThemeMode,
    pub is_dark: bool,
}

pub struct ThemeStore {
    storage: Arc<dyn KeyValueStore>,
    signal: ColorSchemeSignal,
    state: Arc<watch::Sender<ThemeSnapshot>>,
    /// Follows the OS signal; present only while the preference is `Auto`.
    watcher: Mutex<Option<JoinHandle<()>>>,
}

impl ThemeStore {
    /// Read the persisted preference. Absent or unrecognised values fall back
    /// to `Light`. Call [`ThemeStore::init`] from inside the runtime afterwards.
    pub fn new(storage: Arc<dyn KeyValueStore>, signal: ColorSchemeSignal) -> Self {
        let preference = match storage.get(THEME_SLOT) {
            Ok(Some(raw)) => raw.parse().unwrap_or_else(|e| {
                warn!(error = %e, "Ignoring persisted theme");
                ThemeMode::default()
            }),
            Ok(None) => ThemeMode::default(),
            Err(e) => {
                warn!(error = %e, "Could not read persisted theme");
                ThemeMode::default()
            }
        };
        let (state, _) = watch::channel(ThemeSnapshot {
            preference,
            is_dark: preference.resolve(signal.prefers_dark()),
        });
        Self {
            storage,
            signal,
            state: Arc::new(state),
            watcher: Mutex::new(None),
        }
    }

    /// Start following the OS signal if the loaded preference is `Auto`.
    pub fn init(&self) {
        let mut watcher = self.lock_watcher();
        self.sync_watcher(&mut watcher, self.preference());
    }

    pub fn snapshot(&self) -> ThemeSnapshot {
        *self.state.borrow()
    }

    pub fn preference(&self) -> ThemeMode {
        self.state.borrow().preference
    }

    pub fn is_dark(&self) -> bool {
        self.state.borrow().is_dark
    }

    pub fn subscribe(&self) -> watch::Receiver<ThemeSnapshot> {
        self.state.subscribe()
    }

    /// Switch preference and persist it. A failed write is logged; the new
    /// preference still applies for this run.
    pub fn set_theme(&self, mode: ThemeMode) {
        let mut watcher = self.lock_watcher();

        if let Err(e) = self.storage.set(THEME_SLOT, mode.as_str()) {
            warn!(error = %e, theme = %mode, "Could not persist theme");
        }

        let is_dark = mode.resolve(self.signal.prefers_dark());
        self.state.send_modify(|s| {
            s.preference = mode;
            s.is_dark = is_dark;
        });
        self.sync_watcher(&mut watcher, mode);
        info!(theme = %mode, is_dark, "Theme changed");
    }

    /// light → dark → auto → light
    pub fn toggle_theme(&self) -> ThemeMode {
        let next = self.preference().next();
        self.set_theme(next);
        next
    }

    /// Stop following the OS signal.
    pub fn dispose(&self) {
        if let Some(task) = self.lock_watcher().take() {
            task.abort();
        }
    }

    pub fn is_following_system(&self) -> bool {
        self.lock_watcher().is_some()
    }

    fn lock_watcher(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.watcher.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn sync_watcher(&self, watcher: &mut Option<JoinHandle<()>>, mode: ThemeMode) {
        match (mode, watcher.is_some()) {
            (ThemeMode::Auto, false) => {
                *watcher = Some(self.spawn_watcher());
                debug!("Following OS colour scheme");
            }
            (ThemeMode::Light | ThemeMode::Dark, true) => {
                if let Some(task) = watcher.take() {
                    task.abort();
                }
                debug!("Stopped following OS colour scheme");
            }
            _ => {}
        }
    }

    /// Subscribes before reading the current OS value, so no change between
    /// the read and the subscription is lost.
    fn spawn_watcher(&self) -> JoinHandle<()> {
        let mut os = self.signal.subscribe();
        follow_os(&self.state, *os.borrow_and_update());
        let state = self.state.clone();
        tokio::spawn(async move {
            while os.changed().await.is_ok() {
                let prefers_dark = *os.borrow_and_update();
                follow_os(&state, prefers_dark);
                debug!(prefers_dark, "OS colour scheme changed");
            }
        })
    }
}

/// Apply the OS preference while the theme is `Auto`.
fn follow_os(state: &watch::Sender<ThemeSnapshot>, prefers_dark: bool) {
    state.send_if_modified(|s| {
        if s.preference != ThemeMode::Auto || s.is_dark == prefers_dark {
            return false;
        }
        s.is_dark = prefers_dark;
        true
    });
}

impl Drop for ThemeStore {
    fn drop(&mut self) {
        self.dispose();
    }
}
