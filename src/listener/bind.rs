// src/listener/bind.rs
use super::acceptor::{Acceptor, AnyPort};
use super::error::BindError;
use super::provider::{BindProvider, TCP};
use async_trait::async_trait;
use std::io;
use tracing::{debug, info, warn};

/// One way of opening an acceptor for a `host:port` string.
#[async_trait]
pub(crate) trait BindPrimitive: Send + Sync {
    type Acceptor: Acceptor;

    async fn bind(&self, address: &str) -> io::Result<Self::Acceptor>;
}

pub(crate) struct Plain<'a, P>(pub &'a P);

#[async_trait]
impl<'a, P: BindProvider> BindPrimitive for Plain<'a, P> {
    type Acceptor = P::Plain;

    async fn bind(&self, address: &str) -> io::Result<P::Plain> {
        self.0.bind_plain(TCP, address).await
    }
}

pub(crate) struct Secure<'a, P: BindProvider>(pub &'a P, pub &'a P::Config);

#[async_trait]
impl<'a, P: BindProvider> BindPrimitive for Secure<'a, P> {
    type Acceptor = P::Secure;

    async fn bind(&self, address: &str) -> io::Result<P::Secure> {
        self.0.bind_secure(TCP, address, self.1).await
    }
}

/// Binds exactly `address`, surfacing the provider's error unchanged.
pub(crate) async fn bind_one<B>(
    address: &str,
    primitive: &B,
) -> Result<AnyPort<B::Acceptor>, BindError>
where
    B: BindPrimitive + ?Sized,
{
    let listener = primitive.bind(address).await?;
    Ok(AnyPort::from_listener(listener))
}

/// Tries `host:min` through `host:max` in ascending order, one at a time,
/// and returns the first acceptor that binds.
pub(crate) async fn bind_range<B>(
    host: &str,
    min: u16,
    max: u16,
    primitive: &B,
) -> Result<AnyPort<B::Acceptor>, BindError>
where
    B: BindPrimitive + ?Sized,
{
    for port in min..=max {
        let address = format!("{host}:{port}");
        match bind_one(&address, primitive).await {
            Ok(bound) => {
                info!(%address, "bound port {} from range [{}:{}]", bound.port(), min, max);
                return Ok(bound);
            }
            Err(err) => debug!(%address, %err, "port unavailable, trying next"),
        }
    }

    warn!("No port available for '{}' within [{}:{}]", host, min, max);
    Err(BindError::RangeExhausted {
        host: host.to_string(),
        min,
        max,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::net::SocketAddr;
    use std::sync::Mutex;

    #[derive(Debug)]
    struct FakeListener(u16);

    impl Acceptor for FakeListener {
        fn local_addr(&self) -> io::Result<SocketAddr> {
            Ok(SocketAddr::from(([127, 0, 0, 1], self.0)))
        }
    }

    /// Succeeds only for addresses ending in one of `open` ports.
    struct Scripted {
        open: Vec<u16>,
        attempts: Mutex<Vec<String>>,
    }

    impl Scripted {
        fn new(open: &[u16]) -> Self {
            Self {
                open: open.to_vec(),
                attempts: Mutex::new(Vec::new()),
            }
        }

        fn attempts(&self) -> Vec<String> {
            self.attempts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl BindPrimitive for Scripted {
        type Acceptor = FakeListener;

        async fn bind(&self, address: &str) -> io::Result<FakeListener> {
            self.attempts.lock().unwrap().push(address.to_string());
            let port: u16 = address.rsplit(':').next().unwrap().parse().unwrap();
            if self.open.contains(&port) {
                Ok(FakeListener(port))
            } else {
                Err(io::Error::new(io::ErrorKind::AddrInUse, "port already in use"))
            }
        }
    }

    #[tokio::test]
    async fn test_bind_one_reports_port() {
        let primitive = Scripted::new(&[8080]);
        let bound = bind_one("h:8080", &primitive).await.unwrap();
        assert_eq!(bound.port(), 8080);
    }

    #[tokio::test]
    async fn test_bind_one_passes_error_through() {
        let primitive = Scripted::new(&[]);
        match bind_one("h:8080", &primitive).await {
            Err(BindError::Underlying(err)) => {
                assert_eq!(err.kind(), io::ErrorKind::AddrInUse);
                assert_eq!(err.to_string(), "port already in use");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_range_stops_at_first_success() {
        let primitive = Scripted::new(&[102, 103]);
        let bound = bind_range("h", 100, 200, &primitive).await.unwrap();

        assert_eq!(bound.port(), 102);
        assert_eq!(primitive.attempts(), vec!["h:100", "h:101", "h:102"]);
    }

    #[tokio::test]
    async fn test_range_succeeds_on_last_port() {
        let primitive = Scripted::new(&[110]);
        let bound = bind_range("h", 100, 110, &primitive).await.unwrap();

        assert_eq!(bound.port(), 110);
        let expected: Vec<String> = (100..=110).map(|p| format!("h:{p}")).collect();
        assert_eq!(primitive.attempts(), expected);
    }

    #[tokio::test]
    async fn test_range_exhausted_after_every_port() {
        let primitive = Scripted::new(&[99, 201]);
        match bind_range("h", 100, 200, &primitive).await {
            Err(BindError::RangeExhausted { host, min, max }) => {
                assert_eq!((host.as_str(), min, max), ("h", 100, 200));
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert_eq!(primitive.attempts().len(), 101);
    }

    #[tokio::test]
    async fn test_single_port_range_binds_that_port() {
        let primitive = Scripted::new(&[443]);
        let bound = bind_range("h", 443, 443, &primitive).await.unwrap();

        assert_eq!(bound.port(), 443);
        assert_eq!(primitive.attempts(), vec!["h:443"]);
    }

    #[tokio::test]
    async fn test_range_reaches_highest_port() {
        let primitive = Scripted::new(&[]);
        let result = bind_range("h", 65534, 65535, &primitive).await;

        assert!(matches!(result, Err(BindError::RangeExhausted { .. })));
        assert_eq!(primitive.attempts(), vec!["h:65534", "h:65535"]);
    }

    proptest! {
        #[test]
        fn prop_range_scan_is_ascending_and_bounded(
            min in 0u16..=65000,
            len in 0u16..40,
            failing in 0u16..50,
        ) {
            let max = min + len;
            let open = if failing <= len { vec![min + failing] } else { Vec::new() };
            let primitive = Scripted::new(&open);

            let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
            let result = runtime.block_on(bind_range("h", min, max, &primitive));

            let attempted = primitive.attempts();
            let expected_len = failing.min(len + 1) as usize + usize::from(failing <= len);
            let expected: Vec<String> = (min..=max)
                .take(expected_len)
                .map(|port| format!("h:{port}"))
                .collect();
            prop_assert_eq!(attempted, expected);

            match result {
                Ok(bound) => {
                    prop_assert!(failing <= len);
                    prop_assert_eq!(bound.port(), min + failing);
                }
                Err(BindError::RangeExhausted { min: lo, max: hi, .. }) => {
                    prop_assert!(failing > len);
                    prop_assert_eq!((lo, hi), (min, max));
                }
                Err(err) => prop_assert!(false, "unexpected error: {}", err),
            }
        }
    }
}
