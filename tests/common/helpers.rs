#![allow(dead_code)]

use serde_json::Value;
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver};

use sensorhub::{
    HubService,
    models::{
        connection::Connection, message::ServerEvent, producer::RegisterProducer,
        sample::MetricSample,
    },
};

pub type Inbox = UnboundedReceiver<Arc<ServerEvent>>;

/// Open a connection on the hub and hand back what it would receive.
pub fn connect(hub: &mut HubService, id: &str) -> Inbox {
    let (tx, rx) = mpsc::unbounded_channel();
    assert!(hub.connect(Connection::new(id, "127.0.0.1"), tx));
    rx
}

pub fn registration(uid: &str) -> RegisterProducer {
    RegisterProducer {
        producer_uid: uid.to_string(),
        producer_name: format!("Sensor {uid}"),
        metrics_list: vec!["cpu".to_string(), "memory".to_string()],
    }
}

pub fn sample(uid: &str, payload: Value) -> MetricSample {
    MetricSample::new(uid, payload)
}

/// Everything queued so far, as short labels such as `registered:p1`.
pub fn drain(inbox: &mut Inbox) -> Vec<String> {
    let mut labels = Vec::new();
    while let Ok(event) = inbox.try_recv() {
        labels.push(label(&event));
    }
    labels
}

pub fn drain_events(inbox: &mut Inbox) -> Vec<ServerEvent> {
    let mut events = Vec::new();
    while let Ok(event) = inbox.try_recv() {
        events.push(event.as_ref().clone());
    }
    events
}

pub fn label(event: &ServerEvent) -> String {
    match event {
        ServerEvent::ProducerRegistered { producer_info } => {
            format!("registered:{}", producer_info.producer_uid)
        }
        ServerEvent::ObserverRegistered { observer_info } => {
            format!("observer:{}", observer_info.observer_id)
        }
        ServerEvent::MetricData(sample) => {
            format!("data:{}:{}", sample.producer_uid, sample.payload)
        }
        ServerEvent::ProducerUnregistered { producer_info } => {
            format!("unregistered:{}", producer_info.producer_uid)
        }
    }
}
