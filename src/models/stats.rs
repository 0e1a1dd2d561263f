use serde::Serialize;

use super::{observer::ObserverInfo, producer::ProducerInfo};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HubStats {
    pub producers: Vec<ProducerInfo>,
    pub observers: Vec<ObserverInfo>,
    pub cached_samples: usize,
    pub connections: usize,
}
