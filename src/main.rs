// src/main.rs
use anyhow::Result;
use anyport::{config, listen_insecure, listen_secure, AnyPort, TlsListener};
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("anyport=debug".parse()?),
        )
        .init();

    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "anyport.yaml".to_string());

    info!("Loading configuration from: {}", config_path);
    let mut config = config::load_config(&config_path).await?;

    if let Ok(address) = std::env::var("ANYPORT_ADDRESS") {
        info!("Address overridden from environment: {}", address);
        config.address = address;
        config.validate()?;
    }

    match &config.tls {
        Some(tls) => {
            let acceptor = tls.acceptor().await?;
            let bound = listen_secure(&config.address, &acceptor).await?;
            info!("Listening (TLS) on port {}", bound.port());
            tokio::select! {
                _ = accept_tls(bound) => {},
                _ = shutdown_signal() => {},
            }
        }
        None => {
            let bound = listen_insecure(&config.address).await?;
            info!("Listening on port {}", bound.port());
            tokio::select! {
                _ = accept_plain(bound) => {},
                _ = shutdown_signal() => {},
            }
        }
    }

    Ok(())
}

// Connections are accepted and dropped; no protocol is spoken.
async fn accept_plain(bound: AnyPort<TcpListener>) {
    let listener = bound.into_listener();
    loop {
        match listener.accept().await {
            Ok((_stream, peer)) => info!(%peer, "connection accepted"),
            Err(err) => warn!(%err, "accept error"),
        }
    }
}

async fn accept_tls(bound: AnyPort<TlsListener>) {
    let listener = bound.into_listener();
    loop {
        let (handshake, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(err) => {
                warn!(%err, "TLS accept error");
                continue;
            }
        };

        // One task per connection so a stalled handshake never blocks accept.
        tokio::spawn(async move {
            match handshake.finish().await {
                Ok(_stream) => info!(%peer, "TLS connection accepted"),
                Err(err) => warn!(%peer, %err, "TLS handshake failed"),
            }
        });
    }
}

// Graceful shutdown handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!(%err, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(err) => {
                warn!(%err, "Failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
