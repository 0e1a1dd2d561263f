//! In-memory broker state: who is connected, which producers and observers
//! exist, and the last sample of every producer.
//!
//! Everything here is synchronous. Callers serialize access (see
//! [`AppState`](crate::state::AppState)); outbound delivery only pushes onto
//! per-connection queues and never waits on the network.

pub mod cache;
pub mod context;
pub mod observers;
pub mod producers;
pub mod router;
pub mod service;

pub use cache::DataCache;
pub use context::{ConnectionContext, ConnectionRole, Outbox};
pub use observers::ObserverRegistry;
pub use producers::ProducerRegistry;
pub use router::{BroadcastRouter, Snapshot};
pub use service::{DataOutcome, HubService};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterOutcome {
    Registered,
    AlreadyRegistered,
}
