//! `MazewayBuilder`: from a config to a ready session.

use mazeway_client::{MazeServiceClient, SolverServiceClient};
use mazeway_session::{ChangeNotifier, MazeSession, Subscriber};

use crate::MazewayConfig;

/// A session talking to the real generator and solver services.
pub type MazewaySession = MazeSession<MazeServiceClient, SolverServiceClient>;

/// Builder for configuring a [`MazewaySession`].
///
/// Subscribers can only be added here, before the session exists, so
/// every subscriber sees every event from the first one on.
///
/// # Example
///
/// ```rust,no_run
/// use mazeway::prelude::*;
///
/// # async fn run() -> Result<(), MazewayError> {
/// let session = MazewayBuilder::new()
///     .config(MazewayConfig::default())
///     .subscribe(|event: &SessionEvent| println!("{event:?}"))
///     .build();
///
/// session.generate(MazeDimensions::new(10, 10)?).await?;
/// session.move_player(Direction::Right).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct MazewayBuilder {
    config: MazewayConfig,
    notifier: ChangeNotifier,
}

impl MazewayBuilder {
    /// A builder with default settings and no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the configuration.
    pub fn config(mut self, config: MazewayConfig) -> Self {
        self.config = config;
        self
    }

    /// Adds a subscriber. Subscribers are called in the order added.
    pub fn subscribe(mut self, subscriber: impl Subscriber) -> Self {
        self.notifier.subscribe(subscriber);
        self
    }

    /// Builds the session. No connection is made until the first
    /// generate or solve.
    pub fn build(self) -> MazewaySession {
        let client_config = self.config.client_config();
        let generator = MazeServiceClient::new(self.config.generator_endpoint(), client_config);
        let solver = SolverServiceClient::new(self.config.solver_endpoint(), client_config);

        tracing::info!(
            generator = %generator.endpoint(),
            solver = %solver.endpoint(),
            save_dir = %self.config.save_dir.display(),
            subscribers = self.notifier.len(),
            "mazeway session ready"
        );
        MazeSession::new(generator, solver, self.notifier, self.config.session_config())
    }
}

#[cfg(test)]
mod tests {
    use mazeway_session::{SessionEvent, SessionSnapshot};

    use super::*;

    #[tokio::test]
    async fn test_build_starts_without_maze() {
        let dir = tempfile::tempdir().unwrap();
        let session = MazewayBuilder::new()
            .config(MazewayConfig {
                save_dir: dir.path().to_path_buf(),
                ..MazewayConfig::default()
            })
            .subscribe(|_: &SessionEvent| {})
            .build();

        assert_eq!(session.snapshot().await, SessionSnapshot::default());
        assert_eq!(session.store().dir(), dir.path());
    }
}
