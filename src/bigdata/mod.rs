//! Data warehouse resource model.
//!
//! Read-side records ([`DataCluster`], [`DataClusterProduct`],
//! [`DataClusterVersion`], [`DataClusterParameterGroup`]) describe what a
//! provider reports. [`DataClusterCreateOptions`] describes what a caller wants
//! created. All of them are plain values; withers consume and return `self`.

pub mod cluster;
pub mod create_options;
pub mod parameter_group;
pub mod product;
pub mod state;

pub use cluster::{DataCluster, DataClusterAttributes};
pub use create_options::{CreateAttributes, DataClusterCreateOptions};
pub use parameter_group::{DataClusterParameterGroup, ParameterValue};
pub use product::{DataClusterProduct, DataClusterVersion};
pub use state::{ClusterQueryProtocol, DataClusterState};
