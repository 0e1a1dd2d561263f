use serde::{Deserialize, Serialize};

use super::connection::Connection;

/// Payload of a `registerProducer` message.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterProducer {
    pub producer_uid: String,
    pub producer_name: String,
    pub metrics_list: Vec<String>,
}

/// A registered producer. `producer_uid` is chosen by the producer itself, so
/// a reconnecting producer keeps its identity across connections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProducerInfo {
    pub producer_uid: String,
    pub producer_name: String,
    pub metrics_list: Vec<String>,
    pub owner_connection_id: String,
    pub owner_address: String,
}

impl ProducerInfo {
    pub fn new(registration: RegisterProducer, owner: &Connection) -> Self {
        Self {
            producer_uid: registration.producer_uid,
            producer_name: registration.producer_name,
            metrics_list: registration.metrics_list,
            owner_connection_id: owner.id.to_string(),
            owner_address: owner.remote_address.clone(),
        }
    }
}
