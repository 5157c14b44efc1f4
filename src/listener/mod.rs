pub mod acceptor;
pub mod binder;
pub mod error;
pub mod provider;

mod bind;

pub use acceptor::{Acceptor, AnyPort, TlsHandshake, TlsListener};
pub use binder::{listen_insecure, listen_secure, Binder};
pub use error::BindError;
pub use provider::{BindProvider, TokioBindProvider, TCP};
