/**
 * Event Dispatcher
 *
 * This module bridges synchronous mutation handling to asynchronous
 * multi-client notification. Every successful mutation produces one
 * `TaskEvent`, and dispatching it performs two independent deliveries:
 *
 * 1. **Broadcast**: the event goes to every open connection, identified or
 *    not, via a `tokio::sync::broadcast` channel. Any connected client may
 *    be viewing an unfiltered task list, so the fan-out is deliberately
 *    coarse rather than computing per-client interest sets.
 * 2. **Targeted**: each identity in the task's collaborator set is resolved
 *    against the presence registry; live handles receive a
 *    `newCollaboratorTask` push, offline identities are silently skipped.
 *
 * Delivery is best-effort at-most-once: no retry, no queueing, no ack. A
 * push that fails because the connection closed concurrently is discarded.
 * The only ordering guarantee is per-connection FIFO within each delivery
 * channel, inherited from the channels themselves.
 */

use tokio::sync::broadcast;

use crate::realtime::presence::PresenceRegistry;
use crate::realtime::protocol::ServerEvent;
use crate::tasks::model::Task;

/// Outcome of a successful mutation, handed to the dispatcher.
///
/// Transient: exists only for the duration of the dispatch call. Deletions
/// intentionally have no variant; they are observed on next fetch.
#[derive(Debug, Clone)]
pub enum TaskEvent {
    Created(Task),
    Updated(Task),
}

/// Broadcast capacity. A receiver that falls this many events behind starts
/// dropping (logged, connection kept).
const BROADCAST_CAPACITY: usize = 1000;

/// Decides, per mutation outcome, who hears about it, and pushes the
/// messages. Cloneable; all clones share the same channels.
#[derive(Clone)]
pub struct EventDispatcher {
    broadcast_tx: broadcast::Sender<ServerEvent>,
    presence: PresenceRegistry,
}

impl EventDispatcher {
    pub fn new(presence: PresenceRegistry) -> Self {
        let (broadcast_tx, _) = broadcast::channel(BROADCAST_CAPACITY);
        Self {
            broadcast_tx,
            presence,
        }
    }

    /// Subscribe to the broadcast delivery channel.
    ///
    /// Every open connection holds one of these receivers for its lifetime,
    /// which is what makes broadcast delivery reach unidentified tabs too.
    pub fn subscribe(&self) -> broadcast::Receiver<ServerEvent> {
        self.broadcast_tx.subscribe()
    }

    /// The presence registry this dispatcher resolves collaborators against.
    pub fn presence(&self) -> &PresenceRegistry {
        &self.presence
    }

    /// Deliver one mutation event to all interested connections.
    ///
    /// Both delivery channels are always attempted; the order between the
    /// broadcast and the targeted pushes is unspecified.
    pub fn dispatch(&self, event: TaskEvent) {
        let (broadcast_event, task) = match event {
            TaskEvent::Created(task) => (
                ServerEvent::TaskAdded { task: task.clone() },
                task,
            ),
            TaskEvent::Updated(task) => (
                ServerEvent::TaskUpdated { task: task.clone() },
                task,
            ),
        };

        self.broadcast(broadcast_event);
        self.notify_collaborators(&task);
    }

    /// Broadcast an event to every open connection.
    fn broadcast(&self, event: ServerEvent) {
        let name = event.name();
        match self.broadcast_tx.send(event) {
            Ok(subscriber_count) => {
                tracing::debug!(
                    "[Dispatch] {} broadcast to {} connections",
                    name,
                    subscriber_count
                );
            }
            Err(_) => {
                // No open connections; nothing to deliver.
                tracing::debug!("[Dispatch] {} broadcast with no connections", name);
            }
        }
    }

    /// Push `newCollaboratorTask` to each collaborator with a live handle.
    ///
    /// Offline collaborators are skipped, not errors: they will see the
    /// change on their next fetch. A handle whose connection closed between
    /// lookup and push is likewise discarded.
    fn notify_collaborators(&self, task: &Task) {
        for collaborator in &task.collaborators {
            let Some(handle) = self.presence.lookup(*collaborator) else {
                continue;
            };
            let delivered = handle.push(ServerEvent::NewCollaboratorTask {
                task: task.clone(),
            });
            if delivered {
                tracing::debug!(
                    "[Dispatch] newCollaboratorTask for {} delivered to {}",
                    task.id,
                    collaborator
                );
            } else {
                tracing::debug!(
                    "[Dispatch] Dropped push to {} (connection closed mid-dispatch)",
                    collaborator
                );
            }
        }
    }
}
