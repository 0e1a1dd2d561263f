use chrono::{DateTime, Utc};
use std::sync::Arc;

pub type ConnectionId = Arc<str>;

/// A transport connection as seen by the hub. Immutable once accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub id: ConnectionId,
    pub remote_address: String,
    pub connected_at: DateTime<Utc>,
}

impl Connection {
    pub fn new(id: impl Into<ConnectionId>, remote_address: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            remote_address: remote_address.into(),
            connected_at: Utc::now(),
        }
    }
}
