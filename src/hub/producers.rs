use std::{collections::HashMap, sync::Arc};

use super::{RegisterOutcome, cache::DataCache, context::ConnectionContext};
use crate::models::producer::ProducerInfo;

/// Active producers keyed by their self-chosen uid.
///
/// Iteration follows registration order, which keeps snapshots stable.
#[derive(Debug, Default)]
pub struct ProducerRegistry {
    entries: HashMap<String, Arc<ProducerInfo>>,
    order: Vec<String>,
}

impl ProducerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `info` and records it on `owner`. A uid that is already active
    /// leaves the registry and the owner untouched.
    pub fn register(
        &mut self,
        info: ProducerInfo,
        owner: &mut ConnectionContext,
    ) -> RegisterOutcome {
        if self.entries.contains_key(&info.producer_uid) {
            return RegisterOutcome::AlreadyRegistered;
        }

        owner.record_producer(&info.producer_uid);
        self.order.push(info.producer_uid.clone());
        self.entries.insert(info.producer_uid.clone(), Arc::new(info));
        RegisterOutcome::Registered
    }

    /// Removes the producer together with its cached sample.
    pub fn unregister(
        &mut self,
        producer_uid: &str,
        cache: &mut DataCache,
    ) -> Option<Arc<ProducerInfo>> {
        let info = self.entries.remove(producer_uid)?;
        self.order.retain(|uid| uid != producer_uid);
        cache.remove(producer_uid);
        Some(info)
    }

    pub fn get(&self, producer_uid: &str) -> Option<&Arc<ProducerInfo>> {
        self.entries.get(producer_uid)
    }

    pub fn contains(&self, producer_uid: &str) -> bool {
        self.entries.contains_key(producer_uid)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<ProducerInfo>> {
        self.order.iter().filter_map(|uid| self.entries.get(uid))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
