//! Options describing a data cluster to be created.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::credentials::CredentialPolicy;

/// Optional attributes of a [`DataClusterCreateOptions`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateAttributes {
    pub data_center_id: Option<String>,
    /// `None` lets the provider choose its current version.
    pub cluster_version: Option<String>,
    /// Defaults to `0`, meaning the provider's default port.
    pub database_port: Option<u16>,
    /// Synthesized from the credential policy when absent.
    pub admin_user_name: Option<String>,
    /// Generated when absent.
    pub admin_password: Option<String>,
    /// Defaults to `1`.
    pub node_count: Option<u32>,
    /// Defaults to `true`.
    pub encrypted: Option<bool>,
    pub parameter_group_id: Option<String>,
    /// Defaults to an empty list.
    pub firewall_ids: Option<Vec<String>>,
}

/// A request to create a data cluster.
///
/// Admin credentials are always present: whatever the caller leaves out is
/// filled in at construction time, so providers never see an empty credential.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataClusterCreateOptions {
    provider_product_id: String,
    provider_data_center_id: Option<String>,
    name: String,
    description: String,
    cluster_version: Option<String>,
    database_name: String,
    database_port: u16,
    admin_user_name: String,
    admin_password: String,
    node_count: u32,
    encrypted: bool,
    provider_parameter_group_id: Option<String>,
    #[serde(default)]
    provider_firewall_ids: Vec<String>,
}

impl DataClusterCreateOptions {
    /// Builds create options, synthesizing credentials with the default policy.
    pub fn get_instance(
        product_id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        database_name: impl Into<String>,
        attributes: CreateAttributes,
    ) -> Self {
        Self::get_instance_with_policy(
            product_id,
            name,
            description,
            database_name,
            attributes,
            &CredentialPolicy::default(),
        )
    }

    /// Builds create options, synthesizing missing credentials with `policy`.
    pub fn get_instance_with_policy(
        product_id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        database_name: impl Into<String>,
        attributes: CreateAttributes,
        policy: &CredentialPolicy,
    ) -> Self {
        let generated_user = attributes.admin_user_name.is_none();
        let generated_password = attributes.admin_password.is_none();

        let options = Self {
            provider_product_id: product_id.into(),
            provider_data_center_id: attributes.data_center_id,
            name: name.into(),
            description: description.into(),
            cluster_version: attributes.cluster_version,
            database_name: database_name.into(),
            database_port: attributes.database_port.unwrap_or(0),
            admin_user_name: attributes
                .admin_user_name
                .unwrap_or_else(|| policy.user_name()),
            admin_password: attributes
                .admin_password
                .unwrap_or_else(|| policy.password()),
            node_count: attributes.node_count.unwrap_or(1),
            encrypted: attributes.encrypted.unwrap_or(true),
            provider_parameter_group_id: attributes.parameter_group_id,
            provider_firewall_ids: attributes.firewall_ids.unwrap_or_default(),
        };

        debug!(
            product = %options.provider_product_id,
            name = %options.name,
            generated_user,
            generated_password,
            "built data cluster create options"
        );
        options
    }

    pub fn provider_product_id(&self) -> &str {
        &self.provider_product_id
    }

    pub fn provider_data_center_id(&self) -> Option<&str> {
        self.provider_data_center_id.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn cluster_version(&self) -> Option<&str> {
        self.cluster_version.as_deref()
    }

    pub fn database_name(&self) -> &str {
        &self.database_name
    }

    /// Requested port, `0` for the provider default.
    pub fn database_port(&self) -> u16 {
        self.database_port
    }

    pub fn admin_user_name(&self) -> &str {
        &self.admin_user_name
    }

    pub fn admin_password(&self) -> &str {
        &self.admin_password
    }

    pub fn node_count(&self) -> u32 {
        self.node_count
    }

    pub fn is_encrypted(&self) -> bool {
        self.encrypted
    }

    pub fn provider_parameter_group_id(&self) -> Option<&str> {
        self.provider_parameter_group_id.as_deref()
    }

    pub fn provider_firewall_ids(&self) -> &[String] {
        &self.provider_firewall_ids
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

    /// Replaces the firewall list.
    #[must_use]
    pub fn behind_firewalls<I, S>(mut self, firewall_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.provider_firewall_ids = firewall_ids.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_parameter_group(mut self, parameter_group_id: impl Into<String>) -> Self {
        self.provider_parameter_group_id = Some(parameter_group_id.into());
        self
    }

    #[must_use]
    pub fn having_admin_credentials(
        mut self,
        user_name: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.admin_user_name = user_name.into();
        self.admin_password = password.into();
        self
    }

    #[must_use]
    pub fn having_node_count(mut self, node_count: u32) -> Self {
        self.node_count = node_count;
        self
    }

    #[must_use]
    pub fn in_data_center(mut self, data_center_id: impl Into<String>) -> Self {
        self.provider_data_center_id = Some(data_center_id.into());
        self
    }

    #[must_use]
    pub fn using_version(mut self, version: impl Into<String>) -> Self {
        self.cluster_version = Some(version.into());
        self
    }

    #[must_use]
    pub fn on_port(mut self, port: u16) -> Self {
        self.database_port = port;
        self
    }
}

impl fmt::Debug for DataClusterCreateOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataClusterCreateOptions")
            .field("provider_product_id", &self.provider_product_id)
            .field("provider_data_center_id", &self.provider_data_center_id)
            .field("name", &self.name)
            .field("description", &self.description)
            .field("cluster_version", &self.cluster_version)
            .field("database_name", &self.database_name)
            .field("database_port", &self.database_port)
            .field("admin_user_name", &self.admin_user_name)
            .field("admin_password", &"<redacted>")
            .field("node_count", &self.node_count)
            .field("encrypted", &self.encrypted)
            .field("provider_parameter_group_id", &self.provider_parameter_group_id)
            .field("provider_firewall_ids", &self.provider_firewall_ids)
            .finish()
    }
}
