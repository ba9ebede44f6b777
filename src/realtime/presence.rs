/**
 * Presence Registry
 *
 * This module maintains the process-wide mapping from user identity to the
 * live connection currently bound to it. The registry is the join point
 * between REST mutations (which know collaborator identities) and the
 * WebSocket layer (which knows connections).
 *
 * # Semantics
 *
 * - At most one live handle per identity: a later `identify` on a new
 *   connection silently supersedes the previous binding (multi-tab /
 *   reconnect takeover).
 * - Entries are purged on disconnect, not lazily on next access.
 * - The registry is best-effort, in-memory only, and rebuilt empty on
 *   process restart. A lookup hit for a connection that closed concurrently
 *   is tolerated: the stale handle's sends fail and are discarded upstream.
 *
 * # Thread Safety
 *
 * All operations take the internal mutex for the duration of a single
 * `put`/`remove`/`remove_by_handle`/`lookup` call, so lifecycle transitions
 * for different connections never interleave inside the map.
 */

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use uuid::Uuid;

use crate::realtime::protocol::ServerEvent;

/// Process-unique identifier for one WebSocket connection.
///
/// Allocated from an atomic counter when the socket is accepted. Used to
/// recognise a connection at close time without knowing whether it ever
/// announced an identity, and to make supersession safe: removal by handle
/// only removes the entry that still points at the closing connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnId(u64);

static NEXT_CONN_ID: AtomicU64 = AtomicU64::new(1);

impl ConnId {
    /// Allocate the next connection id.
    pub fn next() -> Self {
        ConnId(NEXT_CONN_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Handle to one live client connection.
///
/// Cloning is cheap; the sender half pushes targeted events into the
/// connection's writer task. The handle becomes dead (sends fail) the
/// moment the writer task exits.
#[derive(Debug, Clone)]
pub struct ClientHandle {
    /// Identity of the underlying connection.
    pub conn: ConnId,
    /// Targeted-delivery channel into the connection's writer task.
    pub tx: mpsc::UnboundedSender<ServerEvent>,
}

impl ClientHandle {
    pub fn new(conn: ConnId, tx: mpsc::UnboundedSender<ServerEvent>) -> Self {
        Self { conn, tx }
    }

    /// Push an event to this connection, fire-and-forget.
    ///
    /// Returns `false` when the connection's writer task has already gone
    /// away. Callers treat that as "user just went offline" and move on.
    pub fn push(&self, event: ServerEvent) -> bool {
        self.tx.send(event).is_ok()
    }
}

/// The identity → connection mapping.
///
/// Owned, injectable component: tests construct isolated instances, and the
/// server state holds one shared instance. Cloning shares the same map.
#[derive(Clone, Default)]
pub struct PresenceRegistry {
    entries: Arc<Mutex<HashMap<Uuid, ClientHandle>>>,
}

impl PresenceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `identity` to `handle`, unconditionally overwriting any
    /// existing binding. No error conditions.
    pub fn put(&self, identity: Uuid, handle: ClientHandle) {
        let mut entries = self.entries.lock().unwrap();
        if let Some(previous) = entries.insert(identity, handle) {
            tracing::debug!(
                "[Presence] Identity {} re-bound (superseded conn {:?})",
                identity,
                previous.conn
            );
        } else {
            tracing::debug!("[Presence] Identity {} bound", identity);
        }
    }

    /// Remove the binding for `identity`. No-op when absent.
    pub fn remove(&self, identity: Uuid) {
        self.entries.lock().unwrap().remove(&identity);
    }

    /// Remove whichever entry currently maps to `conn`, if any.
    ///
    /// Used on disconnect, where the closing connection may never have
    /// announced an identity. After a takeover the old connection no longer
    /// appears in the map, so its close is a no-op here.
    pub fn remove_by_handle(&self, conn: ConnId) {
        let mut entries = self.entries.lock().unwrap();
        if let Some(identity) = entries
            .iter()
            .find(|(_, handle)| handle.conn == conn)
            .map(|(identity, _)| *identity)
        {
            entries.remove(&identity);
            tracing::debug!("[Presence] Identity {} unbound (conn closed)", identity);
        }
    }

    /// Look up the live handle for `identity`, if one is registered.
    pub fn lookup(&self, identity: Uuid) -> Option<ClientHandle> {
        self.entries.lock().unwrap().get(&identity).cloned()
    }

    /// Number of identities currently registered.
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().unwrap().is_empty()
    }
}
