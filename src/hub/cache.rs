use std::{collections::HashMap, sync::Arc};

use crate::models::sample::MetricSample;

/// Last-value-wins store: one sample per producer, no history.
#[derive(Debug, Default)]
pub struct DataCache {
    samples: HashMap<String, Arc<MetricSample>>,
}

impl DataCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrites unconditionally. Callers check that the producer is registered.
    pub fn put(&mut self, sample: Arc<MetricSample>) -> Option<Arc<MetricSample>> {
        self.samples.insert(sample.producer_uid.clone(), sample)
    }

    pub fn get(&self, producer_uid: &str) -> Option<&Arc<MetricSample>> {
        self.samples.get(producer_uid)
    }

    pub fn remove(&mut self, producer_uid: &str) -> Option<Arc<MetricSample>> {
        self.samples.remove(producer_uid)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample(uid: &str, value: i64) -> Arc<MetricSample> {
        Arc::new(MetricSample::new(uid, json!({ "v": value })))
    }

    #[test]
    fn last_value_wins() {
        let mut cache = DataCache::new();
        assert!(cache.put(sample("p1", 1)).is_none());
        let previous = cache.put(sample("p1", 2)).unwrap();

        assert_eq!(previous.payload, json!({ "v": 1 }));
        assert_eq!(cache.get("p1").unwrap().payload, json!({ "v": 2 }));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn remove_discards_sample() {
        let mut cache = DataCache::new();
        cache.put(sample("p1", 1));
        cache.put(sample("p2", 1));

        assert!(cache.remove("p1").is_some());
        assert!(cache.remove("p1").is_none());
        assert!(cache.get("p1").is_none());
        assert!(cache.get("p2").is_some());
    }
}
