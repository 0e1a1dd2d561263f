use std::sync::Arc;
use tokio::sync::mpsc;

use crate::models::{
    connection::{Connection, ConnectionId},
    message::ServerEvent,
};

/// Outbound queue of a connection. Sends never block.
pub type Outbox = mpsc::UnboundedSender<Arc<ServerEvent>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionRole {
    Unestablished,
    Producer,
    Observer,
}

/// What a connection registered, handed back exactly once when it closes.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Ownership {
    pub producers: Vec<String>,
    pub observer: bool,
}

#[derive(Debug)]
pub struct ConnectionContext {
    connection: Connection,
    role: ConnectionRole,
    ownership: Ownership,
    outbox: Outbox,
}

impl ConnectionContext {
    pub fn new(connection: Connection, outbox: Outbox) -> Self {
        Self {
            connection,
            role: ConnectionRole::Unestablished,
            ownership: Ownership::default(),
            outbox,
        }
    }

    pub fn id(&self) -> &ConnectionId {
        &self.connection.id
    }

    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    /// Role is decided by the first accepted registration.
    pub fn role(&self) -> ConnectionRole {
        self.role
    }

    pub fn owns_producer(&self, producer_uid: &str) -> bool {
        self.ownership.producers.iter().any(|uid| uid == producer_uid)
    }

    pub fn owns_observer(&self) -> bool {
        self.ownership.observer
    }

    pub(crate) fn record_producer(&mut self, producer_uid: &str) {
        if self.role == ConnectionRole::Unestablished {
            self.role = ConnectionRole::Producer;
        }
        self.ownership.producers.push(producer_uid.to_string());
    }

    pub(crate) fn record_observer(&mut self) {
        if self.role == ConnectionRole::Unestablished {
            self.role = ConnectionRole::Observer;
        }
        self.ownership.observer = true;
    }

    /// Consumes the context so its ownership can only be released once.
    pub fn release(self) -> Ownership {
        self.ownership
    }

    /// Queue an event for this connection. Returns `false` when the transport
    /// side has already gone away; cleanup happens on its disconnect.
    pub fn send(&self, event: Arc<ServerEvent>) -> bool {
        self.outbox.send(event).is_ok()
    }
}
