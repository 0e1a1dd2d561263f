use std::{collections::HashMap, sync::Arc};

use tracing::{debug, info, warn};

use super::{
    RegisterOutcome,
    cache::DataCache,
    context::{ConnectionContext, Outbox},
    observers::ObserverRegistry,
    producers::ProducerRegistry,
    router::BroadcastRouter,
};
use crate::{
    models::{
        connection::{Connection, ConnectionId},
        message::{ClientMessage, ServerEvent},
        observer::ObserverInfo,
        producer::{ProducerInfo, RegisterProducer},
        sample::MetricSample,
        stats::HubStats,
    },
    utils::id_generator::{CONNECTION_ID_LENGTH, mini_id},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataOutcome {
    /// Sample cached and fanned out to this many observers.
    Cached { recipients: usize },
    UnknownProducer,
    /// The uid is registered, but by another connection.
    NotOwner,
}

/// Owns every registry of the hub and applies connection events to them.
///
/// All methods are synchronous and run to completion, so holding `&mut self`
/// for one call is the whole serialization story.
#[derive(Debug, Default)]
pub struct HubService {
    connections: HashMap<ConnectionId, ConnectionContext>,
    producers: ProducerRegistry,
    observers: ObserverRegistry,
    cache: DataCache,
}

impl HubService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts a transport connection under a freshly generated id.
    pub fn open(&mut self, remote_address: impl Into<String>, outbox: Outbox) -> Connection {
        let remote_address = remote_address.into();
        loop {
            let id = mini_id(CONNECTION_ID_LENGTH);
            if self.connections.contains_key(&id) {
                continue;
            }
            let connection = Connection::new(id, remote_address);
            self.connect(connection.clone(), outbox);
            return connection;
        }
    }

    /// Returns `false`, changing nothing, if the id is already open.
    pub fn connect(&mut self, connection: Connection, outbox: Outbox) -> bool {
        if self.connections.contains_key(&connection.id) {
            warn!(connection_id = %connection.id, "Connection id already in use");
            return false;
        }

        info!(
            connection_id = %connection.id,
            address = %connection.remote_address,
            "New connection"
        );
        self.connections.insert(
            connection.id.clone(),
            ConnectionContext::new(connection, outbox),
        );
        true
    }

    pub fn handle(&mut self, connection_id: &str, message: ClientMessage) {
        debug!(connection_id, event = message.name(), "Message received");
        match message {
            ClientMessage::RegisterProducer(registration) => {
                self.register_producer(connection_id, registration);
            }
            ClientMessage::RegisterObserver => {
                self.register_observer(connection_id);
            }
            ClientMessage::MetricData(sample) => {
                self.publish(connection_id, sample);
            }
        }
    }

    /// `None` when the connection is not open.
    pub fn register_producer(
        &mut self,
        connection_id: &str,
        registration: RegisterProducer,
    ) -> Option<RegisterOutcome> {
        let Some(context) = self.connections.get_mut(connection_id) else {
            warn!(connection_id, "registerProducer from unknown connection");
            return None;
        };

        let info = ProducerInfo::new(registration, context.connection());
        let producer_uid = info.producer_uid.clone();
        let outcome = self.producers.register(info, context);

        let Some(producer_info) = self.producers.get(&producer_uid).cloned() else {
            return Some(outcome);
        };

        match outcome {
            RegisterOutcome::Registered => {
                info!(connection_id, producer_uid = %producer_uid, "Producer registered");
                context.send(Arc::new(ServerEvent::ProducerRegistered {
                    producer_info: producer_info.clone(),
                }));

                let recipients = BroadcastRouter::broadcast(
                    ServerEvent::ProducerRegistered { producer_info },
                    &self.observers,
                    &self.connections,
                );
                info!(producer_uid = %producer_uid, recipients, "Sent producer info to observers");
            }
            RegisterOutcome::AlreadyRegistered => {
                info!(
                    connection_id,
                    producer_uid = %producer_uid,
                    owner = %producer_info.owner_connection_id,
                    "Producer already registered, ignoring"
                );
                // Retries from the owner get their acknowledgement again.
                if context.owns_producer(&producer_uid) {
                    context.send(Arc::new(ServerEvent::ProducerRegistered { producer_info }));
                }
            }
        }

        Some(outcome)
    }

    /// `None` when the connection is not open.
    pub fn register_observer(&mut self, connection_id: &str) -> Option<RegisterOutcome> {
        let Some(context) = self.connections.get_mut(connection_id) else {
            warn!(connection_id, "registerObserver from unknown connection");
            return None;
        };

        let outcome = self.observers.register(context);
        let observer_info = ObserverInfo::from(context.connection());
        context.send(Arc::new(ServerEvent::ObserverRegistered { observer_info }));

        match outcome {
            RegisterOutcome::Registered => {
                // Snapshot and eligibility for live events happen in this same
                // call, so nothing live can be queued ahead of the snapshot.
                let snapshot = BroadcastRouter::snapshot(&self.producers, &self.cache);
                let sent = snapshot.deliver(context);
                info!(connection_id, snapshot_events = sent, "Observer registered");
            }
            RegisterOutcome::AlreadyRegistered => {
                info!(connection_id, "Observer already registered, ignoring");
            }
        }

        Some(outcome)
    }

    /// Caches the sample and fans it out. Samples for unknown producers, or
    /// from a connection that does not own the producer, are dropped silently.
    pub fn publish(&mut self, connection_id: &str, sample: MetricSample) -> DataOutcome {
        let Some(owner) = self.producers.get(&sample.producer_uid) else {
            debug!(
                connection_id,
                producer_uid = %sample.producer_uid,
                "Dropping data for unknown producer"
            );
            return DataOutcome::UnknownProducer;
        };
        if owner.owner_connection_id != connection_id {
            debug!(
                connection_id,
                producer_uid = %sample.producer_uid,
                "Dropping data from connection that does not own the producer"
            );
            return DataOutcome::NotOwner;
        }

        let sample = Arc::new(sample);
        self.cache.put(sample.clone());
        let recipients = BroadcastRouter::broadcast(
            ServerEvent::MetricData(sample),
            &self.observers,
            &self.connections,
        );
        DataOutcome::Cached { recipients }
    }

    /// Releases everything the connection owned. Returns `false` if it was
    /// not open, which makes repeated close notifications harmless.
    pub fn disconnect(&mut self, connection_id: &str) -> bool {
        let Some(context) = self.connections.remove(connection_id) else {
            return false;
        };

        info!(
            connection_id,
            address = %context.connection().remote_address,
            connected_at = %context.connection().connected_at,
            role = ?context.role(),
            "Disconnection"
        );
        let ownership = context.release();

        for producer_uid in ownership.producers {
            let Some(producer_info) = self.producers.unregister(&producer_uid, &mut self.cache)
            else {
                continue;
            };
            let recipients = BroadcastRouter::broadcast(
                ServerEvent::ProducerUnregistered { producer_info },
                &self.observers,
                &self.connections,
            );
            info!(producer_uid = %producer_uid, recipients, "Producer disconnected");
        }

        if ownership.observer && self.observers.unregister(connection_id).is_some() {
            info!(observer_id = connection_id, "Observer disconnected");
        }

        true
    }

    pub fn producers(&self) -> &ProducerRegistry {
        &self.producers
    }

    pub fn observers(&self) -> &ObserverRegistry {
        &self.observers
    }

    pub fn cache(&self) -> &DataCache {
        &self.cache
    }

    pub fn connection(&self, connection_id: &str) -> Option<&ConnectionContext> {
        self.connections.get(connection_id)
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    pub fn stats(&self) -> HubStats {
        HubStats {
            producers: self.producers.iter().map(|info| info.as_ref().clone()).collect(),
            observers: self.observers.iter().cloned().collect(),
            cached_samples: self.cache.len(),
            connections: self.connections.len(),
        }
    }
}
