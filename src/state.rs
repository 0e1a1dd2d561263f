use tokio::sync::Mutex;

use crate::hub::HubService;

/// Process-wide state shared by every connection task.
///
/// The mutex is the hub's single serialization point: each connect, message
/// and disconnect takes it, runs one synchronous [`HubService`] call and lets
/// go. Nothing awaits the network while holding it.
#[derive(Debug, Default)]
pub struct AppState {
    pub hub: Mutex<HubService>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}
