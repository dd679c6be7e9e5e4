//! Internet reachability probing.

use std::net::SocketAddr;
use std::time::Duration;

use async_trait::async_trait;
use tokio::net::TcpStream;
use tracing::debug;

use super::connectivity::{ConnectivityConfig, NetworkId};

/// Reachability check run against a candidate network.
#[async_trait]
pub trait ReachabilityProbe: Send + Sync {
    /// Returns true when the probe target was reachable.
    async fn check(&self, network: NetworkId) -> bool;
}

/// Probe that opens a TCP connection to a fixed address.
///
/// Any connect error or timeout counts as unreachable. The socket closes as
/// soon as the connect succeeds; no bytes are exchanged.
#[derive(Debug, Clone)]
pub struct TcpProbe {
    addr: SocketAddr,
    timeout: Duration,
}

impl TcpProbe {
    /// Probe against the default resolver with the default timeout.
    pub fn new() -> Self {
        Self::with_config(&ConnectivityConfig::default())
    }

    /// Probe against the configured target.
    pub fn with_config(config: &ConnectivityConfig) -> Self {
        Self {
            addr: config.probe_addr,
            timeout: config.probe_timeout,
        }
    }
}

impl Default for TcpProbe {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReachabilityProbe for TcpProbe {
    async fn check(&self, network: NetworkId) -> bool {
        match tokio::time::timeout(self.timeout, TcpStream::connect(self.addr)).await {
            Ok(Ok(_stream)) => {
                debug!("Probe for network {} reached {}", network, self.addr);
                true
            }
            Ok(Err(e)) => {
                debug!("Probe for network {} failed: {}", network, e);
                false
            }
            Err(_) => {
                debug!(
                    "Probe for network {} timed out after {:?}",
                    network, self.timeout
                );
                false
            }
        }
    }
}
