// ────────────────────────────────
// src/listener/provider.rs
// Encapsulates low‑level TCP / TLS bind so tests can swap it out.
// ────────────────────────────────
use super::acceptor::{Acceptor, TlsListener};
use async_trait::async_trait;
use std::borrow::Cow;
use std::io;
use tokio::net::TcpListener;
use tokio_native_tls::TlsAcceptor;

/// Transport identifier handed to every provider call.
pub const TCP: &str = "tcp";

/// Supplies the two concrete bind operations.
#[async_trait]
pub trait BindProvider: Send + Sync {
    type Plain: Acceptor;
    type Secure: Acceptor;
    /// Encryption settings passed through to `bind_secure` untouched.
    type Config: Send + Sync;

    async fn bind_plain(&self, network: &str, address: &str) -> io::Result<Self::Plain>;

    async fn bind_secure(
        &self,
        network: &str,
        address: &str,
        config: &Self::Config,
    ) -> io::Result<Self::Secure>;
}

/// Binds real sockets through tokio. No extra logic over the standard
/// primitives is introduced.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioBindProvider;

#[async_trait]
impl BindProvider for TokioBindProvider {
    type Plain = TcpListener;
    type Secure = TlsListener;
    type Config = TlsAcceptor;

    async fn bind_plain(&self, network: &str, address: &str) -> io::Result<TcpListener> {
        ensure_tcp(network)?;
        TcpListener::bind(&*socket_address(address)).await
    }

    async fn bind_secure(
        &self,
        network: &str,
        address: &str,
        config: &TlsAcceptor,
    ) -> io::Result<TlsListener> {
        ensure_tcp(network)?;
        let listener = TcpListener::bind(&*socket_address(address)).await?;
        Ok(TlsListener::new(listener, config.clone()))
    }
}

fn ensure_tcp(network: &str) -> io::Result<()> {
    if network == TCP {
        Ok(())
    } else {
        Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("unsupported network: {network}"),
        ))
    }
}

/// An empty port (`"host:"`) means any port, which the socket resolver
/// only understands as `"host:0"`.
fn socket_address(address: &str) -> Cow<'_, str> {
    if address.ends_with(':') {
        Cow::Owned(format!("{address}0"))
    } else {
        Cow::Borrowed(address)
    }
}
