// src/config/models.rs
use crate::address::{AddressError, AddressSpec};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// `host`, `host:port` or `host:min-max`.
    pub address: String,

    #[serde(default)]
    pub tls: Option<TlsConfig>,
}

impl Config {
    pub fn validate(&self) -> Result<(), AddressError> {
        AddressSpec::parse(&self.address).map(|_| ())
    }
}

/// Server identity used for secured listening.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum TlsConfig {
    Pkcs12 {
        pkcs12: PathBuf,
        #[serde(default)]
        password: String,
    },
    Pem {
        certificate: PathBuf,
        private_key: PathBuf,
    },
}
