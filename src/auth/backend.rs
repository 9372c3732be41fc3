//! Authentication backend port and its mock implementation

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::{CreateUserDto, User, UserRole};
use crate::shared::SessionError;

/// Round trip to whatever answers "who is this?".
#[async_trait]
pub trait AuthBackend: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> Result<User, SessionError>;

    async fn register(&self, dto: CreateUserDto) -> Result<User, SessionError>;
}

/// Default simulated network latency
pub const DEFAULT_SIMULATED_LATENCY: Duration = Duration::from_millis(1000);

/// Backend without a server: waits for the configured latency, then accepts
/// any credentials and answers with a canonical dispatcher identity.
///
/// Registration returns the same identity with the supplied name and email.
/// There is no uniqueness check.
#[derive(Debug, Clone)]
pub struct MockAuthBackend {
    latency: Duration,
}

impl MockAuthBackend {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    pub fn canonical_user() -> User {
        User {
            id: "1".into(),
            name: "Ivan Petrov".into(),
            email: "ivan@example.com".into(),
            role: UserRole::Dispatcher,
            avatar: Some("https://i.pravatar.cc/150?img=3".into()),
        }
    }
}

impl Default for MockAuthBackend {
    fn default() -> Self {
        Self::new(DEFAULT_SIMULATED_LATENCY)
    }
}

#[async_trait]
impl AuthBackend for MockAuthBackend {
    async fn login(&self, email: &str, _password: &str) -> Result<User, SessionError> {
        debug!(email, latency_ms = self.latency.as_millis() as u64, "Mock login round trip");
        tokio::time::sleep(self.latency).await;
        Ok(Self::canonical_user())
    }

    async fn register(&self, dto: CreateUserDto) -> Result<User, SessionError> {
        debug!(email = %dto.email, latency_ms = self.latency.as_millis() as u64, "Mock register round trip");
        tokio::time::sleep(self.latency).await;
        Ok(User {
            name: dto.name,
            email: dto.email,
            ..Self::canonical_user()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_mock_login_waits_for_latency() {
        let backend = MockAuthBackend::new(Duration::from_millis(1000));
        let started = tokio::time::Instant::now();
        let user = backend.login("a@b.com", "pw").await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(1000));
        assert_eq!(user, MockAuthBackend::canonical_user());
    }

    #[tokio::test(start_paused = true)]
    async fn test_mock_register_keeps_name_and_email() {
        let backend = MockAuthBackend::default();
        let user = backend
            .register(CreateUserDto {
                name: "Aigerim".into(),
                email: "aigerim@example.com".into(),
                password: "secret".into(),
            })
            .await
            .unwrap();
        assert_eq!(user.name, "Aigerim");
        assert_eq!(user.email, "aigerim@example.com");
        assert_eq!(user.role, UserRole::Dispatcher);
    }
}
