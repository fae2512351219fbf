//! Live-connection registry and broadcaster.

use std::{
    collections::HashMap,
    net::SocketAddr,
    sync::atomic::{AtomicU64, Ordering},
};

use tokio::sync::{Mutex, mpsc};

/// Identity of one live connection.
///
/// Display names may collide; ids never do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

/// One registered client: its assigned display name, the peer address
/// (diagnostic only) and the channel its pusher task drains.
pub struct ClientHandle {
    pub name: String,
    pub addr: SocketAddr,
    pub sender: mpsc::UnboundedSender<String>,
}

/// Set of live connections.
///
/// Mutated only by register/unregister from the per-connection session
/// loops; iterated by broadcast. The mutex serializes all access.
pub struct ClientRegistry {
    next_id: AtomicU64,
    clients: Mutex<HashMap<ConnectionId, ClientHandle>>,
}

impl ClientRegistry {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(0),
            clients: Mutex::new(HashMap::new()),
        }
    }

    /// Add a connection to the live set under a fresh id.
    pub async fn register(&self, handle: ClientHandle) -> ConnectionId {
        let id = ConnectionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        tracing::info!("{} connects as '{}'", handle.addr, handle.name);

        let mut clients = self.clients.lock().await;
        clients.insert(id, handle);
        id
    }

    /// Remove a connection from the live set.
    ///
    /// The session loop calls this exactly once per connection, whatever
    /// ended the loop.
    pub async fn unregister(&self, id: ConnectionId) {
        let mut clients = self.clients.lock().await;
        if let Some(handle) = clients.remove(&id) {
            tracing::info!("{} disconnects ('{}')", handle.addr, handle.name);
        }
    }

    /// Relay a message to every currently-registered connection.
    ///
    /// Channel sends never block, so one slow peer cannot stall delivery
    /// to the others. A failed send (receiver already gone) is skipped;
    /// the connection's own session loop handles its removal.
    pub async fn broadcast(&self, message: &str) {
        let clients = self.clients.lock().await;
        for (id, handle) in clients.iter() {
            if handle.sender.send(message.to_string()).is_err() {
                tracing::warn!("Failed to push message to '{}' ({:?})", handle.name, id);
            }
        }
    }

    /// Number of live connections
    pub async fn len(&self) -> usize {
        self.clients.lock().await.len()
    }
}

impl Default for ClientRegistry {
    fn default() -> Self {
        Self::new()
    }
}
