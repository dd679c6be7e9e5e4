//! Live internet connectivity tracking.
//!
//! The platform boundary reports candidate networks coming and going. A
//! reported network is not necessarily online (captive portals, dead
//! uplinks), so each candidate is verified with a reachability probe before
//! it counts. The monitor folds those signals into a single watchable bool:
//! "does at least one currently known network have verified internet access".

use std::collections::HashSet;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::probe::ReachabilityProbe;

/// Default probe target: a public resolver that accepts TCP on port 53.
pub const PROBE_ADDR: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::new(8, 8, 8, 8)), 53);

/// Default probe timeout in milliseconds.
pub const PROBE_TIMEOUT_MS: u64 = 2000;

/// Opaque handle for a platform network interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NetworkId(pub u64);

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Network lifecycle events pushed in by the platform boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkEvent {
    /// The network became available and should be probed.
    Available(NetworkId),
    /// The network went away and no longer counts toward connectivity.
    Lost(NetworkId),
}

/// Configuration for connectivity verification.
#[derive(Debug, Clone)]
pub struct ConnectivityConfig {
    /// Address the reachability probe connects to.
    pub probe_addr: SocketAddr,
    /// How long a probe may take before the network counts as unreachable.
    pub probe_timeout: Duration,
}

impl Default for ConnectivityConfig {
    fn default() -> Self {
        Self {
            probe_addr: PROBE_ADDR,
            probe_timeout: Duration::from_millis(PROBE_TIMEOUT_MS),
        }
    }
}

/// Tracks which known networks have verified internet access.
///
/// The signal starts false and flips true once any known network passes the
/// probe. All set bookkeeping happens on one monitor task; platform events
/// and probe results funnel into it over channels, so a slow probe can never
/// resurrect a network that was lost while the probe ran.
pub struct ConnectivityMonitor {
    /// Sender half handed to the platform boundary via `notifier`
    event_tx: mpsc::Sender<NetworkEvent>,
    /// Watch receiver for the connectivity signal
    state_rx: watch::Receiver<bool>,
    /// Handle for the monitor task
    handle: JoinHandle<()>,
}

impl ConnectivityMonitor {
    /// Spawn the monitor task around the given probe.
    pub fn start(probe: Arc<dyn ReachabilityProbe>) -> Self {
        let (event_tx, event_rx) = mpsc::channel::<NetworkEvent>(16);
        let (state_tx, state_rx) = watch::channel(false);

        let handle = tokio::spawn(async move {
            run_monitor_loop(probe, event_rx, state_tx).await;
        });

        Self {
            event_tx,
            state_rx,
            handle,
        }
    }

    /// Sender for the platform boundary to push network events into.
    pub fn notifier(&self) -> mpsc::Sender<NetworkEvent> {
        self.event_tx.clone()
    }

    /// Current connectivity value.
    pub fn is_connected(&self) -> bool {
        *self.state_rx.borrow()
    }

    /// Subscribe to connectivity changes.
    ///
    /// Only actual transitions are published; re-verifying an already online
    /// state is silent.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.state_rx.clone()
    }

    /// Stop the monitor task. Further events are ignored.
    pub fn shutdown(&self) {
        debug!("Shutting down connectivity monitor");
        self.handle.abort();
    }
}

impl Drop for ConnectivityMonitor {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Fold platform events and probe results into the connectivity signal.
async fn run_monitor_loop(
    probe: Arc<dyn ReachabilityProbe>,
    mut event_rx: mpsc::Receiver<NetworkEvent>,
    state_tx: watch::Sender<bool>,
) {
    // Networks the platform currently reports, and the subset that passed
    // the probe. Only this task mutates either set.
    let mut known: HashSet<NetworkId> = HashSet::new();
    let mut verified: HashSet<NetworkId> = HashSet::new();
    let (result_tx, mut result_rx) = mpsc::channel::<(NetworkId, bool)>(16);

    let mut live = false;

    loop {
        tokio::select! {
            event = event_rx.recv() => {
                match event {
                    Some(NetworkEvent::Available(id)) => {
                        debug!("Network {} reported available, probing", id);
                        known.insert(id);
                        let probe = probe.clone();
                        let result_tx = result_tx.clone();
                        tokio::spawn(async move {
                            let reachable = probe.check(id).await;
                            let _ = result_tx.send((id, reachable)).await;
                        });
                    }
                    Some(NetworkEvent::Lost(id)) => {
                        info!("Network {} lost", id);
                        known.remove(&id);
                        verified.remove(&id);
                    }
                    None => {
                        debug!("Network event channel closed, stopping monitor");
                        break;
                    }
                }
            }
            result = result_rx.recv() => {
                if let Some((id, reachable)) = result {
                    if !known.contains(&id) {
                        // The network went away while its probe was in flight
                        debug!("Discarding stale probe result for network {}", id);
                    } else if reachable {
                        info!("Network {} verified online", id);
                        verified.insert(id);
                    } else {
                        warn!("Network {} failed the reachability probe", id);
                    }
                }
            }
        }

        let now_live = !verified.is_empty();
        if now_live != live {
            live = now_live;
            info!("Connectivity changed: online={}", live);
            let _ = state_tx.send(live);
        }
    }
}
