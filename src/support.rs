//! Provider-call seam for data warehouse operations
//!
//! Provider crates implement [`DataWarehouseSupport`] on top of their own HTTP
//! client and classify failures into [`CloudResponseError`] values. Every call
//! ends in exactly one of two states: the record, or the classified error.

use async_trait::async_trait;

use crate::bigdata::{
    DataCluster, DataClusterCreateOptions, DataClusterParameterGroup, DataClusterProduct,
    DataClusterVersion,
};
use crate::error::{CloudResponseError, CloudResult};

/// Data warehouse operations offered by a cloud provider.
#[async_trait]
pub trait DataWarehouseSupport: Send + Sync {
    /// Short provider identifier (e.g. "aws").
    fn provider_name(&self) -> &str;

    /// Provisions a cluster from fully defaulted create options.
    async fn create_cluster(&self, options: &DataClusterCreateOptions) -> CloudResult<DataCluster>;

    /// Looks up a cluster; `Ok(None)` if the provider does not know it.
    async fn get_cluster(&self, cluster_id: &str) -> CloudResult<Option<DataCluster>>;

    async fn list_clusters(&self) -> CloudResult<Vec<DataCluster>>;

    async fn list_cluster_products(&self) -> CloudResult<Vec<DataClusterProduct>>;

    async fn list_cluster_versions(&self) -> CloudResult<Vec<DataClusterVersion>>;

    async fn list_cluster_parameter_groups(&self) -> CloudResult<Vec<DataClusterParameterGroup>>;

    /// Starts deleting a cluster.
    async fn remove_cluster(&self, cluster_id: &str) -> CloudResult<()>;

    /// Looks up a cluster, failing with a `General`/404 error if it is unknown.
    async fn require_cluster(&self, cluster_id: &str) -> CloudResult<DataCluster> {
        self.get_cluster(cluster_id).await?.ok_or_else(|| {
            CloudResponseError::general(
                404,
                "ClusterNotFound",
                format!("{}: no data cluster {}", self.provider_name(), cluster_id),
            )
        })
    }
}
