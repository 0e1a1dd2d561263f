use std::{collections::HashMap, sync::Arc};

use tracing::debug;

use super::{
    cache::DataCache, context::ConnectionContext, observers::ObserverRegistry,
    producers::ProducerRegistry,
};
use crate::models::{connection::ConnectionId, message::ServerEvent};

/// Fans hub events out to observers.
pub struct BroadcastRouter;

impl BroadcastRouter {
    /// Delivers `event` once to every observer registered at call time.
    /// Observers whose connection is already gone are skipped.
    pub fn broadcast(
        event: ServerEvent,
        observers: &ObserverRegistry,
        connections: &HashMap<ConnectionId, ConnectionContext>,
    ) -> usize {
        let event = Arc::new(event);
        let mut delivered = 0;

        for observer_id in observers.ids() {
            let Some(context) = connections.get(&observer_id) else {
                debug!(observer_id = %observer_id, "Observer has no open connection, skipping");
                continue;
            };
            if context.send(event.clone()) {
                delivered += 1;
            } else {
                debug!(observer_id = %observer_id, "Observer outbox closed, skipping");
            }
        }

        debug!(producer_uid = ?event.producer_uid(), delivered, "Broadcast event");
        delivered
    }

    /// Captures the state a new observer must see before any live event.
    pub fn snapshot(producers: &ProducerRegistry, cache: &DataCache) -> Snapshot {
        let registrations = producers
            .iter()
            .map(|info| {
                Arc::new(ServerEvent::ProducerRegistered {
                    producer_info: info.clone(),
                })
            })
            .collect();

        let samples = producers
            .iter()
            .filter_map(|info| cache.get(&info.producer_uid))
            .map(|sample| Arc::new(ServerEvent::MetricData(sample.clone())))
            .collect();

        Snapshot {
            registrations,
            samples,
        }
    }
}

/// Two-phase catch-up for a newly registered observer: every producer
/// registration first, then every cached sample.
#[derive(Debug, Default)]
pub struct Snapshot {
    registrations: Vec<Arc<ServerEvent>>,
    samples: Vec<Arc<ServerEvent>>,
}

impl Snapshot {
    pub fn events(&self) -> impl Iterator<Item = &Arc<ServerEvent>> {
        self.registrations.iter().chain(self.samples.iter())
    }

    pub fn len(&self) -> usize {
        self.registrations.len() + self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Queues the whole snapshot on `context`. Must run in the same critical
    /// section that made the observer eligible for live events.
    pub fn deliver(self, context: &ConnectionContext) -> usize {
        let mut delivered = 0;
        for event in self.registrations.into_iter().chain(self.samples) {
            if !context.send(event) {
                break;
            }
            delivered += 1;
        }
        delivered
    }
}
