//! Server state shared across connection handlers.

use crate::exchange::ExchangeService;

use super::registry::ClientRegistry;

/// Shared application state
pub struct AppState {
    /// Live connections and broadcast fan-out
    pub registry: ClientRegistry,
    /// Exchange pipeline triggered from chat commands
    pub exchange: ExchangeService,
}
