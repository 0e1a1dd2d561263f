use std::net::SocketAddr;

/// Errors surfaced by the hub binary.
#[derive(Debug, thiserror::Error)]
pub enum HubError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Server(#[from] ServerError),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be a valid value, got {value:?}")]
    InvalidValue { var: &'static str, value: String },

    #[error("split topology needs both {set} and {missing}")]
    IncompleteSplit {
        set: &'static str,
        missing: &'static str,
    },

    #[error("producer and observer endpoints cannot share port {0}")]
    SamePort(u16),
}

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("serve error: {0}")]
    Serve(#[source] std::io::Error),
}

/// A frame that cannot be turned into a [`ClientMessage`](crate::models::message::ClientMessage).
/// Logged and dropped; never closes the connection.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("invalid JSON envelope: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("unknown event {0:?}")]
    UnknownEvent(String),

    #[error("invalid payload for {event}: {source}")]
    InvalidPayload {
        event: &'static str,
        #[source]
        source: serde_json::Error,
    },
}
