//! Real-time fan-out hub for metric producers and observers.

pub mod api;
pub mod config;
pub mod error;
pub mod hub;
pub mod models;
pub mod server;
pub mod state;
pub mod utils;
pub mod websocket;

pub use config::HubConfig;
pub use error::{ConfigError, HubError, ProtocolError, ServerError};
pub use hub::HubService;
pub use server::Server;
