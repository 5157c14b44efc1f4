// src/lib.rs
//! Bind a TCP port for listening from a flexible address.
//!
//! * `myhost.mydomain:1234` binds port 1234 if available.
//! * `myhost.mydomain` binds a random port.
//! * `myhost.mydomain:123-456` binds the first available port in `[123, 456]`.
//!
//! When the requested port is not available, or no port in the range could
//! be bound, an error is returned. Plain and TLS listeners are supported; the
//! socket calls themselves go through a [`BindProvider`] so the binding
//! policy can be exercised without touching the network.
pub mod address;
pub mod config;
pub mod listener;

pub use address::{AddressError, AddressSpec, PortMode, RangeSide};
pub use listener::{
    listen_insecure, listen_secure, Acceptor, AnyPort, BindError, BindProvider, Binder,
    TlsHandshake, TlsListener, TokioBindProvider, TCP,
};
