//! Wire format shared by producers, observers and the hub.
//!
//! Every frame is a JSON envelope `{"event": <name>, "data": <payload>}`.
//! Inbound frames are decoded in two steps (envelope first, then the payload
//! for the named event) so a bad frame can be reported precisely.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

use super::{
    observer::ObserverInfo,
    producer::{ProducerInfo, RegisterProducer},
    sample::MetricSample,
};
use crate::error::ProtocolError;

pub const REGISTER_PRODUCER: &str = "registerProducer";
pub const REGISTER_OBSERVER: &str = "registerObserver";
pub const METRIC_DATA: &str = "metricData";

#[derive(Deserialize)]
struct Envelope {
    event: String,
    #[serde(default)]
    data: Value,
}

/// Messages a connection may send to the hub.
#[derive(Debug, Clone, PartialEq)]
pub enum ClientMessage {
    RegisterProducer(RegisterProducer),
    RegisterObserver,
    MetricData(MetricSample),
}

impl ClientMessage {
    pub fn decode(text: &str) -> Result<Self, ProtocolError> {
        let envelope: Envelope = serde_json::from_str(text)?;

        match envelope.event.as_str() {
            REGISTER_PRODUCER => serde_json::from_value(envelope.data)
                .map(Self::RegisterProducer)
                .map_err(|source| ProtocolError::InvalidPayload {
                    event: REGISTER_PRODUCER,
                    source,
                }),
            // The observer payload carries nothing the hub needs.
            REGISTER_OBSERVER => Ok(Self::RegisterObserver),
            METRIC_DATA => serde_json::from_value(envelope.data)
                .map(Self::MetricData)
                .map_err(|source| ProtocolError::InvalidPayload {
                    event: METRIC_DATA,
                    source,
                }),
            other => Err(ProtocolError::UnknownEvent(other.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::RegisterProducer(_) => REGISTER_PRODUCER,
            Self::RegisterObserver => REGISTER_OBSERVER,
            Self::MetricData(_) => METRIC_DATA,
        }
    }
}

/// Events the hub pushes to connections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ServerEvent {
    ProducerRegistered {
        #[serde(rename = "producerInfo")]
        producer_info: Arc<ProducerInfo>,
    },
    ObserverRegistered {
        #[serde(rename = "observerInfo")]
        observer_info: ObserverInfo,
    },
    MetricData(Arc<MetricSample>),
    ProducerUnregistered {
        #[serde(rename = "producerInfo")]
        producer_info: Arc<ProducerInfo>,
    },
}

impl ServerEvent {
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// The producer this event is about, if any.
    pub fn producer_uid(&self) -> Option<&str> {
        match self {
            Self::ProducerRegistered { producer_info }
            | Self::ProducerUnregistered { producer_info } => Some(&producer_info.producer_uid),
            Self::MetricData(sample) => Some(&sample.producer_uid),
            Self::ObserverRegistered { .. } => None,
        }
    }
}
