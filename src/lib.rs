//! Cloud data warehouse abstraction
//!
//! This library models data warehouse resources (clusters, products, versions
//! and parameter groups) independently of any cloud provider, and defines the
//! normalized error every provider call reports on failure.

pub mod bigdata;
pub mod config;
pub mod credentials;
pub mod error;
pub mod logging;
pub mod support;

pub use bigdata::{
    ClusterQueryProtocol, CreateAttributes, DataCluster, DataClusterAttributes,
    DataClusterCreateOptions, DataClusterParameterGroup, DataClusterProduct, DataClusterState,
    DataClusterVersion, ParameterValue,
};
pub use error::{CloudErrorType, CloudResponseError, CloudResult};
pub use support::DataWarehouseSupport;
