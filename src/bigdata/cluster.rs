//! Data cluster records.

use std::fmt;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::state::{ClusterQueryProtocol, DataClusterState};

/// Node count assumed when the provider reports none.
pub const DEFAULT_NODE_COUNT: u32 = 1;
/// Cluster version assumed when the provider reports none.
pub const DEFAULT_CLUSTER_VERSION: &str = "0";

/// Optional attributes of a [`DataCluster`].
///
/// Every field left as `None` receives its own default when the cluster is
/// built; no field is inferred from another.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataClusterAttributes {
    pub data_center_id: Option<String>,
    pub vlan_id: Option<String>,
    pub admin_user_name: Option<String>,
    pub admin_password: Option<String>,
    /// Defaults to [`DEFAULT_NODE_COUNT`].
    pub node_count: Option<u32>,
    /// Defaults to [`DEFAULT_CLUSTER_VERSION`].
    pub cluster_version: Option<String>,
    /// Defaults to `false`: encryption is unknown on read.
    pub encrypted: Option<bool>,
    /// Epoch millis; defaults to `0` (unknown).
    pub creation_timestamp: Option<i64>,
    /// Defaults to an empty list.
    pub protocols: Option<Vec<ClusterQueryProtocol>>,
    pub parameter_group_id: Option<String>,
}

/// A provisioned data warehouse cluster.
///
/// Two clusters are equal only if every field matches, including the order of
/// the protocol list.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataCluster {
    provider_owner_id: String,
    provider_region_id: String,
    provider_data_center_id: Option<String>,
    provider_data_cluster_id: String,
    current_state: DataClusterState,
    name: String,
    description: String,
    provider_product_id: String,
    cluster_version: String,
    database_name: String,
    database_port: u16,
    provider_vlan_id: Option<String>,
    admin_user_name: Option<String>,
    #[serde(skip_serializing, default)]
    admin_password: Option<String>,
    node_count: u32,
    encrypted: bool,
    creation_timestamp: i64,
    provider_parameter_group_id: Option<String>,
    #[serde(default)]
    protocols: Vec<ClusterQueryProtocol>,
}

impl DataCluster {
    /// Builds a cluster from its required fields and optional attributes.
    ///
    /// # Examples
    ///
    /// ```
    /// use cloud_warehouse::bigdata::{DataCluster, DataClusterAttributes, DataClusterState};
    ///
    /// let cluster = DataCluster::get_instance(
    ///     "me", "regionId", "clusterId", DataClusterState::Available,
    ///     "name", "description", "productId", "dbName", 17,
    ///     DataClusterAttributes::default(),
    /// );
    /// assert_eq!(cluster.node_count(), 1);
    /// assert_eq!(cluster.cluster_version(), "0");
    /// ```
    #[allow(clippy::too_many_arguments)]
    pub fn get_instance(
        owner_id: impl Into<String>,
        region_id: impl Into<String>,
        cluster_id: impl Into<String>,
        state: DataClusterState,
        name: impl Into<String>,
        description: impl Into<String>,
        product_id: impl Into<String>,
        database_name: impl Into<String>,
        database_port: u16,
        attributes: DataClusterAttributes,
    ) -> Self {
        let cluster = Self {
            provider_owner_id: owner_id.into(),
            provider_region_id: region_id.into(),
            provider_data_center_id: attributes.data_center_id,
            provider_data_cluster_id: cluster_id.into(),
            current_state: state,
            name: name.into(),
            description: description.into(),
            provider_product_id: product_id.into(),
            cluster_version: attributes
                .cluster_version
                .unwrap_or_else(|| DEFAULT_CLUSTER_VERSION.to_string()),
            database_name: database_name.into(),
            database_port,
            provider_vlan_id: attributes.vlan_id,
            admin_user_name: attributes.admin_user_name,
            admin_password: attributes.admin_password,
            node_count: attributes.node_count.unwrap_or(DEFAULT_NODE_COUNT),
            encrypted: attributes.encrypted.unwrap_or(false),
            creation_timestamp: attributes.creation_timestamp.unwrap_or(0),
            provider_parameter_group_id: attributes.parameter_group_id,
            protocols: attributes.protocols.unwrap_or_default(),
        };
        debug!(
            cluster_id = %cluster.provider_data_cluster_id,
            region = %cluster.provider_region_id,
            state = %cluster.current_state,
            "built data cluster record"
        );
        cluster
    }

    pub fn provider_owner_id(&self) -> &str {
        &self.provider_owner_id
    }

    pub fn provider_region_id(&self) -> &str {
        &self.provider_region_id
    }

    pub fn provider_data_center_id(&self) -> Option<&str> {
        self.provider_data_center_id.as_deref()
    }

    pub fn provider_data_cluster_id(&self) -> &str {
        &self.provider_data_cluster_id
    }

    pub fn current_state(&self) -> DataClusterState {
        self.current_state
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn provider_product_id(&self) -> &str {
        &self.provider_product_id
    }

    /// Provider-defined version string; never parsed.
    pub fn cluster_version(&self) -> &str {
        &self.cluster_version
    }

    pub fn database_name(&self) -> &str {
        &self.database_name
    }

    pub fn database_port(&self) -> u16 {
        self.database_port
    }

    pub fn provider_vlan_id(&self) -> Option<&str> {
        self.provider_vlan_id.as_deref()
    }

    pub fn admin_user_name(&self) -> Option<&str> {
        self.admin_user_name.as_deref()
    }

    pub fn admin_password(&self) -> Option<&str> {
        self.admin_password.as_deref()
    }

    pub fn node_count(&self) -> u32 {
        self.node_count
    }

    pub fn is_encrypted(&self) -> bool {
        self.encrypted
    }

    /// Creation time in epoch millis, `0` when unknown.
    pub fn creation_timestamp(&self) -> i64 {
        self.creation_timestamp
    }

    /// Creation time, or `None` when unknown or out of range.
    pub fn creation_time(&self) -> Option<DateTime<Utc>> {
        if self.creation_timestamp == 0 {
            return None;
        }
        Utc.timestamp_millis_opt(self.creation_timestamp).single()
    }

    pub fn provider_parameter_group_id(&self) -> Option<&str> {
        self.provider_parameter_group_id.as_deref()
    }

    pub fn protocols(&self) -> &[ClusterQueryProtocol] {
        &self.protocols
    }

    /// Sets the admin credentials.
    #[must_use]
    pub fn having_admin_credentials(
        mut self,
        user_name: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.admin_user_name = Some(user_name.into());
        self.admin_password = Some(password.into());
        self
    }

    /// Sets the node count. Limits are enforced by the provider.
    #[must_use]
    pub fn having_node_count(mut self, node_count: u32) -> Self {
        self.node_count = node_count;
        self
    }

    #[must_use]
    pub fn with_parameter_group(mut self, parameter_group_id: impl Into<String>) -> Self {
        self.provider_parameter_group_id = Some(parameter_group_id.into());
        self
    }

    #[must_use]
    pub fn with_encryption(mut self) -> Self {
        self.encrypted = true;
        self
    }

    #[must_use]
    pub fn without_encryption(mut self) -> Self {
        self.encrypted = false;
        self
    }

    #[must_use]
    pub fn using_version(mut self, version: impl Into<String>) -> Self {
        self.cluster_version = version.into();
        self
    }

    #[must_use]
    pub fn in_vlan(mut self, vlan_id: impl Into<String>) -> Self {
        self.provider_vlan_id = Some(vlan_id.into());
        self
    }

    /// Replaces the protocol list.
    #[must_use]
    pub fn with_protocols(
        mut self,
        protocols: impl IntoIterator<Item = ClusterQueryProtocol>,
    ) -> Self {
        self.protocols = protocols.into_iter().collect();
        self
    }

    /// Appends protocols that are not yet listed, keeping existing order.
    #[must_use]
    pub fn supporting_protocols(
        mut self,
        protocols: impl IntoIterator<Item = ClusterQueryProtocol>,
    ) -> Self {
        for protocol in protocols {
            if !self.protocols.contains(&protocol) {
                self.protocols.push(protocol);
            }
        }
        self
    }

    /// Sets the creation time in epoch millis.
    #[must_use]
    pub fn created_at(mut self, timestamp: i64) -> Self {
        self.creation_timestamp = timestamp;
        self
    }

    #[must_use]
    pub fn in_state(mut self, state: DataClusterState) -> Self {
        self.current_state = state;
        self
    }
}

impl fmt::Debug for DataCluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataCluster")
            .field("provider_owner_id", &self.provider_owner_id)
            .field("provider_region_id", &self.provider_region_id)
            .field("provider_data_center_id", &self.provider_data_center_id)
            .field("provider_data_cluster_id", &self.provider_data_cluster_id)
            .field("current_state", &self.current_state)
            .field("name", &self.name)
            .field("description", &self.description)
            .field("provider_product_id", &self.provider_product_id)
            .field("cluster_version", &self.cluster_version)
            .field("database_name", &self.database_name)
            .field("database_port", &self.database_port)
            .field("provider_vlan_id", &self.provider_vlan_id)
            .field("admin_user_name", &self.admin_user_name)
            .field(
                "admin_password",
                &self.admin_password.as_ref().map(|_| "<redacted>"),
            )
            .field("node_count", &self.node_count)
            .field("encrypted", &self.encrypted)
            .field("creation_timestamp", &self.creation_timestamp)
            .field("provider_parameter_group_id", &self.provider_parameter_group_id)
            .field("protocols", &self.protocols)
            .finish()
    }
}
