// ────────────────────────────────
// src/listener/acceptor.rs
// Listening socket handles produced by a bind provider.
// ────────────────────────────────
use std::fmt;
use std::io;
use std::net::SocketAddr;
use tokio::net::{TcpListener, TcpStream};
use tokio_native_tls::{TlsAcceptor, TlsStream};

/// An open listening socket.
///
/// The binder only ever reads the local address; accepting and closing are
/// left to whoever receives the handle.
pub trait Acceptor: Send {
    fn local_addr(&self) -> io::Result<SocketAddr>;
}

impl Acceptor for TcpListener {
    fn local_addr(&self) -> io::Result<SocketAddr> {
        TcpListener::local_addr(self)
    }
}

/// TCP listener whose accepted connections are secured with TLS.
///
/// `accept` only takes the TCP connection off the queue; the handshake runs
/// when the returned [`TlsHandshake`] is finished, so one slow peer cannot
/// hold up the accept loop.
pub struct TlsListener {
    listener: TcpListener,
    acceptor: TlsAcceptor,
}

impl TlsListener {
    pub fn new(listener: TcpListener, acceptor: TlsAcceptor) -> Self {
        Self { listener, acceptor }
    }

    pub async fn accept(&self) -> io::Result<(TlsHandshake, SocketAddr)> {
        let (stream, peer) = self.listener.accept().await?;
        let handshake = TlsHandshake {
            stream,
            acceptor: self.acceptor.clone(),
        };
        Ok((handshake, peer))
    }

    pub fn get_ref(&self) -> &TcpListener {
        &self.listener
    }
}

/// An accepted TCP connection whose TLS handshake has not run yet.
pub struct TlsHandshake {
    stream: TcpStream,
    acceptor: TlsAcceptor,
}

impl TlsHandshake {
    pub async fn finish(self) -> io::Result<TlsStream<TcpStream>> {
        self.acceptor
            .accept(self.stream)
            .await
            .map_err(|err| io::Error::new(io::ErrorKind::Other, err))
    }
}

impl fmt::Debug for TlsListener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TlsListener")
            .field("listener", &self.listener)
            .finish_non_exhaustive()
    }
}

impl Acceptor for TlsListener {
    fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}

/// A successfully bound acceptor together with the port it landed on.
///
/// `port` is always the port of the acceptor's local address.
#[derive(Debug)]
pub struct AnyPort<A> {
    listener: A,
    port: u16,
}

impl<A: Acceptor> AnyPort<A> {
    /// Reads the port back from the acceptor.
    ///
    /// # Panics
    ///
    /// Panics when the local address cannot be read. Bind providers must
    /// return TCP acceptors; anything else is a broken provider, not a bind
    /// failure.
    pub(crate) fn from_listener(listener: A) -> Self {
        let port = match listener.local_addr() {
            Ok(addr) => addr.port(),
            Err(err) => panic!(
                "bind provider contract violated: acceptor has no TCP local address: {err}"
            ),
        };
        Self { listener, port }
    }
}

impl<A> AnyPort<A> {
    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn listener(&self) -> &A {
        &self.listener
    }

    pub fn into_listener(self) -> A {
        self.listener
    }

    pub fn into_parts(self) -> (A, u16) {
        (self.listener, self.port)
    }
}
