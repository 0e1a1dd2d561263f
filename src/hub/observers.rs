use std::collections::HashMap;

use super::{RegisterOutcome, context::ConnectionContext};
use crate::models::{connection::ConnectionId, observer::ObserverInfo};

/// Active observers keyed by connection id, in registration order.
#[derive(Debug, Default)]
pub struct ObserverRegistry {
    entries: HashMap<ConnectionId, ObserverInfo>,
    order: Vec<ConnectionId>,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, owner: &mut ConnectionContext) -> RegisterOutcome {
        if self.entries.contains_key(owner.id()) {
            return RegisterOutcome::AlreadyRegistered;
        }

        let id = owner.id().clone();
        owner.record_observer();
        self.order.push(id.clone());
        self.entries.insert(id, ObserverInfo::from(owner.connection()));
        RegisterOutcome::Registered
    }

    pub fn unregister(&mut self, connection_id: &str) -> Option<ObserverInfo> {
        let info = self.entries.remove(connection_id)?;
        self.order.retain(|id| id.as_ref() != connection_id);
        Some(info)
    }

    pub fn get(&self, connection_id: &str) -> Option<&ObserverInfo> {
        self.entries.get(connection_id)
    }

    /// Recipient list for one broadcast, detached from the registry.
    pub fn ids(&self) -> Vec<ConnectionId> {
        self.order.clone()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ObserverInfo> {
        self.order.iter().filter_map(|id| self.entries.get(id))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
