use std::{
    env,
    net::{IpAddr, Ipv4Addr, SocketAddr},
};

use crate::error::ConfigError;

pub const HOST_VAR: &str = "SENSORHUB_HOST";
pub const PORT_VAR: &str = "SENSORHUB_PORT";
pub const PRODUCER_PORT_VAR: &str = "SENSORHUB_PRODUCER_PORT";
pub const OBSERVER_PORT_VAR: &str = "SENSORHUB_OBSERVER_PORT";

pub const DEFAULT_PORT: u16 = 8082;

/// Which endpoints the hub listens on. Message semantics do not depend on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
    Shared { port: u16 },
    Split { producer_port: u16, observer_port: u16 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HubConfig {
    pub host: IpAddr,
    pub topology: Topology,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            topology: Topology::Shared { port: DEFAULT_PORT },
        }
    }
}

impl HubConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = match lookup(HOST_VAR) {
            Some(value) => parse(HOST_VAR, value)?,
            None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        };

        let producer_port = lookup(PRODUCER_PORT_VAR)
            .map(|value| parse::<u16>(PRODUCER_PORT_VAR, value))
            .transpose()?;
        let observer_port = lookup(OBSERVER_PORT_VAR)
            .map(|value| parse::<u16>(OBSERVER_PORT_VAR, value))
            .transpose()?;

        let topology = match (producer_port, observer_port) {
            (Some(producer_port), Some(observer_port)) if producer_port == observer_port => {
                return Err(ConfigError::SamePort(producer_port));
            }
            (Some(producer_port), Some(observer_port)) => Topology::Split {
                producer_port,
                observer_port,
            },
            (Some(_), None) => {
                return Err(ConfigError::IncompleteSplit {
                    set: PRODUCER_PORT_VAR,
                    missing: OBSERVER_PORT_VAR,
                });
            }
            (None, Some(_)) => {
                return Err(ConfigError::IncompleteSplit {
                    set: OBSERVER_PORT_VAR,
                    missing: PRODUCER_PORT_VAR,
                });
            }
            (None, None) => Topology::Shared {
                port: match lookup(PORT_VAR) {
                    Some(value) => parse(PORT_VAR, value)?,
                    None => DEFAULT_PORT,
                },
            },
        };

        Ok(Self { host, topology })
    }

    pub fn listen_addrs(&self) -> Vec<SocketAddr> {
        match self.topology {
            Topology::Shared { port } => vec![SocketAddr::new(self.host, port)],
            Topology::Split {
                producer_port,
                observer_port,
            } => vec![
                SocketAddr::new(self.host, producer_port),
                SocketAddr::new(self.host, observer_port),
            ],
        }
    }
}

fn parse<T: std::str::FromStr>(var: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue { var, value })
}
