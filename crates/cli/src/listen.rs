use anyhow::{Context as AnyhowContext, Result};
use std::net::SocketAddr;
use tokio::net::TcpListener;

/// Socket `serve` listens on, already checked against `--public`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ListenAddr {
    addr: SocketAddr,
    public: bool,
}

impl ListenAddr {
    /// Resolve `--bind` to a single address (IPv4 preferred) and check it may be exposed.
    ///
    /// Each classified request spends annotation quota on the configured API key, so
    /// anything other than a loopback address needs an explicit `--public`.
    pub(crate) async fn resolve(bind: &str, public: bool) -> Result<Self> {
        let candidates: Vec<SocketAddr> = tokio::net::lookup_host(bind)
            .await
            .with_context(|| format!("Failed to resolve bind address: {bind}"))?
            .collect();
        let addr = candidates
            .iter()
            .copied()
            .find(SocketAddr::is_ipv4)
            .or_else(|| candidates.first().copied())
            .with_context(|| format!("Bind address {bind} resolved to nothing"))?;

        Self::checked(addr, public)
    }

    fn checked(addr: SocketAddr, public: bool) -> Result<Self> {
        if !public && !addr.ip().is_loopback() {
            anyhow::bail!(
                "Refusing to bind {addr} without --public: other hosts could classify requests on your annotation API key"
            );
        }
        Ok(Self { addr, public })
    }

    pub(crate) fn is_public(&self) -> bool {
        self.public
    }

    /// Listen on exactly the address that passed the check.
    pub(crate) async fn bind(&self) -> Result<TcpListener> {
        TcpListener::bind(self.addr)
            .await
            .with_context(|| format!("Failed to bind {}", self.addr))
    }
}
