//! Application wiring
//!
//! [`AppContext`] owns every store the views depend on. Lifecycle is explicit:
//! [`AppContext::create`] builds the graph, [`AppContext::init`] restores the
//! session and starts the theme watcher, [`AppContext::dispose`] tears down
//! every timer and background task.

use std::sync::Arc;

use tracing::info;

use crate::auth::MockAuthBackend;
use crate::config::{AppConfig, StorageBackend, StorageConfig};
use crate::domain::{RepositoryProvider, WeatherProvider};
use crate::infrastructure::repositories::MockRepositoryProvider;
use crate::infrastructure::storage::{FileKeyValueStore, InMemoryKeyValueStore, KeyValueStore};
use crate::infrastructure::weather::OpenWeatherClient;
use crate::notifications::NotificationQueue;
use crate::routing::{Navigation, Router};
use crate::session::SessionStore;
use crate::shared::StorageError;
use crate::theme::{ColorSchemeSignal, ThemeStore};

pub struct AppContext {
    /// The configuration the context was built from.
    pub config: AppConfig,
    pub storage: Arc<dyn KeyValueStore>,
    pub session: Arc<SessionStore>,
    pub notifications: Arc<NotificationQueue>,
    pub theme: Arc<ThemeStore>,
    /// OS dark-mode preference; the host pushes changes into it.
    pub color_scheme: ColorSchemeSignal,
    pub repos: Arc<dyn RepositoryProvider>,
    pub weather: Arc<dyn WeatherProvider>,
    pub router: Router,
}

impl AppContext {
    /// Build the context, opening the configured storage backend.
    pub fn create(config: AppConfig) -> Result<Self, StorageError> {
        let storage = open_storage(&config.storage)?;
        Ok(Self::with_storage(config, storage, ColorSchemeSignal::default()))
    }

    /// Build the context over an existing store and colour-scheme signal.
    pub fn with_storage(
        config: AppConfig,
        storage: Arc<dyn KeyValueStore>,
        color_scheme: ColorSchemeSignal,
    ) -> Self {
        let backend = Arc::new(MockAuthBackend::new(config.session.simulated_latency()));
        let session = Arc::new(
            SessionStore::new(storage.clone(), backend)
                .with_request_timeout(config.session.request_timeout()),
        );
        let notifications = Arc::new(NotificationQueue::with_default_duration(
            config.notifications.default_duration(),
        ));
        let theme = Arc::new(ThemeStore::new(storage.clone(), color_scheme.clone()));
        let weather = Arc::new(OpenWeatherClient::new(
            config.weather.base_url.clone(),
            config.weather.api_key.clone(),
            config.weather.lang.clone(),
        ));

        Self {
            config,
            storage,
            session,
            notifications,
            theme,
            color_scheme,
            repos: Arc::new(MockRepositoryProvider::seeded()),
            weather,
            router: Router::new(),
        }
    }

    /// Restore the persisted session and start following the OS theme if
    /// the preference asks for it.
    pub async fn init(&self) {
        self.theme.init();
        self.session.restore().await;
        info!(
            authenticated = self.session.is_authenticated(),
            theme = %self.theme.preference(),
            "Application context ready"
        );
    }

    /// Resolve `path` against the current session.
    pub fn navigate(&self, path: &str) -> Navigation {
        self.router.navigate(path, &self.session.snapshot())
    }

    /// Abort every pending notification timer and the theme watcher.
    pub fn dispose(&self) {
        self.notifications.dispose();
        self.theme.dispose();
        info!("Application context disposed");
    }
}

/// Open the key-value store selected by `storage.backend`.
pub fn open_storage(config: &StorageConfig) -> Result<Arc<dyn KeyValueStore>, StorageError> {
    Ok(match config.backend {
        StorageBackend::File => {
            info!(path = %config.path.display(), "Using file storage");
            Arc::new(FileKeyValueStore::open(&config.path)?)
        }
        StorageBackend::Memory => {
            info!("Using in-memory storage");
            Arc::new(InMemoryKeyValueStore::new())
        }
    })
}

/// Initialize tracing (logging) from the application config.
///
/// `RUST_LOG` takes precedence over `logging.level`. Records emitted through
/// the `log` facade are picked up as well.
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    match config.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}
