//! Operating-system colour-scheme signal

use std::sync::Arc;

use tokio::sync::watch;

/// Boolean "OS prefers dark" value that can be observed for changes.
///
/// Whatever talks to the platform holds a clone and calls
/// [`ColorSchemeSignal::set_prefers_dark`]; the theme store subscribes.
#[derive(Clone)]
pub struct ColorSchemeSignal {
    sender: Arc<watch::Sender<bool>>,
}

impl ColorSchemeSignal {
    pub fn new(prefers_dark: bool) -> Self {
        let (sender, _) = watch::channel(prefers_dark);
        Self {
            sender: Arc::new(sender),
        }
    }

    pub fn prefers_dark(&self) -> bool {
        *self.sender.borrow()
    }

    /// Publish a new value; observers are only woken on an actual change.
    pub fn set_prefers_dark(&self, prefers_dark: bool) {
        self.sender.send_if_modified(|current| {
            if *current == prefers_dark {
                false
            } else {
                *current = prefers_dark;
                true
            }
        });
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.sender.subscribe()
    }
}

impl Default for ColorSchemeSignal {
    fn default() -> Self {
        Self::new(false)
    }
}
