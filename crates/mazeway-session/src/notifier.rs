//! Change notification from the session to its observers.
//!
//! A [`ChangeNotifier`] is filled with subscribers while it is still owned
//! by the caller, then moved into the session. From then on the list is
//! fixed: every subscriber sees every event, in order, before the session
//! call that caused it returns.

use mazeway_protocol::Position;
use tokio::sync::mpsc;

/// Something that changed in the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A new maze was installed, by generating or loading it. The
    /// solution is cleared and the player is on the start cell.
    MazeGenerated {
        /// Row count of the new maze.
        rows: usize,
        /// Column count of the new maze.
        cols: usize,
    },

    /// The player's position changed.
    PlayerMoved {
        /// Where the player is now.
        position: Position,
    },

    /// A solution for the active maze was stored.
    MazeSolved {
        /// Number of positions on the path, start and goal included.
        steps: usize,
    },
}

/// Receives session events.
///
/// Called synchronously while the session holds its state lock, so
/// implementations must not call back into the session. Any
/// `Fn(&SessionEvent)` closure is a subscriber.
pub trait Subscriber: Send + Sync + 'static {
    /// Handles one event.
    fn on_event(&self, event: &SessionEvent);
}

impl<F> Subscriber for F
where
    F: Fn(&SessionEvent) + Send + Sync + 'static,
{
    fn on_event(&self, event: &SessionEvent) {
        self(event)
    }
}

/// Forwards events into an unbounded Tokio channel.
///
/// For async consumers that want to handle events on their own task.
#[derive(Debug, Clone)]
pub struct ChannelSubscriber {
    tx: mpsc::UnboundedSender<SessionEvent>,
}

impl ChannelSubscriber {
    /// A subscriber and the receiving end of its channel.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<SessionEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Subscriber for ChannelSubscriber {
    fn on_event(&self, event: &SessionEvent) {
        if self.tx.send(event.clone()).is_err() {
            tracing::debug!(?event, "event receiver dropped");
        }
    }
}

/// An ordered list of subscribers.
#[derive(Default)]
pub struct ChangeNotifier {
    subscribers: Vec<Box<dyn Subscriber>>,
}

impl ChangeNotifier {
    /// A notifier with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a subscriber. Subscribers are called in registration order.
    pub fn subscribe(&mut self, subscriber: impl Subscriber) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Builder-style [`subscribe`](Self::subscribe).
    pub fn with(mut self, subscriber: impl Subscriber) -> Self {
        self.subscribe(subscriber);
        self
    }

    /// Delivers `event` to every subscriber.
    pub fn publish(&self, event: &SessionEvent) {
        tracing::trace!(?event, subscribers = self.subscribers.len(), "publish");
        for subscriber in &self.subscribers {
            subscriber.on_event(event);
        }
    }

    /// Number of subscribers.
    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    /// `true` if nobody is listening.
    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}

impl std::fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
