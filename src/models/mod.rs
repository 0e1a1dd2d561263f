pub mod connection;
pub mod message;
pub mod observer;
pub mod producer;
pub mod sample;
pub mod stats;
