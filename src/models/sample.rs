use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Latest value reported by a producer. The payload is passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricSample {
    pub producer_uid: String,
    pub payload: Value,
}

impl MetricSample {
    pub fn new(producer_uid: impl Into<String>, payload: Value) -> Self {
        Self {
            producer_uid: producer_uid.into(),
            payload,
        }
    }
}
