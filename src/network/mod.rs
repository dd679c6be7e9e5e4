//! Network layer for the picture service.
//!
//! This module contains everything that touches the wire: the image API
//! client, credential hashing for its `authorization` header, and the
//! connectivity verification stack.
//!
//! ## Components
//!
//! - [`ImageApiClient`] - HTTP client for the image download endpoint
//! - [`Sha1PasswordEncoder`] - Hashes passwords into their wire form
//! - [`ConnectivityMonitor`] - Folds network events into a live online signal
//! - [`TcpProbe`] - Reachability check backing the monitor

pub mod api;
pub mod connectivity;
pub mod encoder;
pub mod probe;

pub use api::{ApiConfig, ApiOutcome, ImageApiClient, ImageResponse};
pub use connectivity::{ConnectivityConfig, ConnectivityMonitor, NetworkEvent, NetworkId};
pub use encoder::{PasswordEncoder, Sha1PasswordEncoder};
pub use probe::{ReachabilityProbe, TcpProbe};
