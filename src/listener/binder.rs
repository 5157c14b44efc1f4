// ────────────────────────────────
// src/listener/binder.rs
// Public entry points: parse the address, then bind one port or scan a range.
// ────────────────────────────────
use super::acceptor::{AnyPort, TlsListener};
use super::bind::{bind_one, bind_range, BindPrimitive, Plain, Secure};
use super::error::BindError;
use super::provider::{BindProvider, TokioBindProvider};
use crate::address::{AddressSpec, PortMode};
use tokio::net::TcpListener;
use tokio_native_tls::TlsAcceptor;
use tracing::info;

/// Binds listen addresses through an injected [`BindProvider`].
///
/// Accepted address forms:
///
/// * `myhost.mydomain:1234` binds port 1234.
/// * `myhost.mydomain` binds a random ephemeral port, exactly like
///   `myhost.mydomain:0`.
/// * `myhost.mydomain:123-456` binds the first available port in `[123, 456]`.
#[derive(Debug, Clone, Default)]
pub struct Binder<P = TokioBindProvider> {
    provider: P,
}

impl<P: BindProvider> Binder<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Binds a plain TCP listener.
    pub async fn listen_insecure(&self, addr: &str) -> Result<AnyPort<P::Plain>, BindError> {
        dispatch(addr, &Plain(&self.provider)).await
    }

    /// Binds a TLS listener using `config`.
    pub async fn listen_secure(
        &self,
        addr: &str,
        config: &P::Config,
    ) -> Result<AnyPort<P::Secure>, BindError> {
        dispatch(addr, &Secure(&self.provider, config)).await
    }
}

async fn dispatch<B: BindPrimitive>(
    addr: &str,
    primitive: &B,
) -> Result<AnyPort<B::Acceptor>, BindError> {
    let spec = AddressSpec::parse(addr)?;

    let bound = match spec.port() {
        PortMode::None => bind_one(&format!("{}:0", spec.host()), primitive).await?,
        PortMode::Single(port) => {
            bind_one(&format!("{}:{}", spec.host(), port), primitive).await?
        }
        PortMode::Range { min, max } => {
            return bind_range(spec.host(), *min, *max, primitive).await;
        }
    };

    info!("Bound {} on port {}", addr, bound.port());
    Ok(bound)
}

/// Binds a plain TCP listener with the tokio provider.
pub async fn listen_insecure(addr: &str) -> Result<AnyPort<TcpListener>, BindError> {
    Binder::<TokioBindProvider>::default().listen_insecure(addr).await
}

/// Binds a TLS listener with the tokio provider.
pub async fn listen_secure(
    addr: &str,
    config: &TlsAcceptor,
) -> Result<AnyPort<TlsListener>, BindError> {
    Binder::<TokioBindProvider>::default().listen_secure(addr, config).await
}
