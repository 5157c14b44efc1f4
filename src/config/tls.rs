// src/config/tls.rs
use super::models::TlsConfig;
use anyhow::{Context, Result};
use native_tls::Identity;
use std::path::Path;
use tokio_native_tls::TlsAcceptor;

impl TlsConfig {
    /// Reads the identity files and builds an acceptor for secured listening.
    pub async fn acceptor(&self) -> Result<TlsAcceptor> {
        let identity = match self {
            TlsConfig::Pkcs12 { pkcs12, password } => {
                let der = read(pkcs12).await?;
                Identity::from_pkcs12(&der, password).context("Failed to parse PKCS#12 identity")?
            }
            TlsConfig::Pem {
                certificate,
                private_key,
            } => {
                let cert = read(certificate).await?;
                let key = read(private_key).await?;
                Identity::from_pkcs8(&cert, &key).context("Failed to parse PEM identity")?
            }
        };

        let acceptor = native_tls::TlsAcceptor::new(identity).context("Failed to build TLS acceptor")?;
        Ok(TlsAcceptor::from(acceptor))
    }
}

async fn read(path: &Path) -> Result<Vec<u8>> {
    tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))
}
