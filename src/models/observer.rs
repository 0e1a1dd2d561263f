use serde::{Deserialize, Serialize};

use super::connection::Connection;

/// A registered observer. Keyed by the connection it arrived on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObserverInfo {
    pub observer_id: String,
    pub observer_address: String,
}

impl From<&Connection> for ObserverInfo {
    fn from(connection: &Connection) -> Self {
        Self {
            observer_id: connection.id.to_string(),
            observer_address: connection.remote_address.clone(),
        }
    }
}
