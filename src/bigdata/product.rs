//! Product and version descriptors offered by a provider.

use serde::{Deserialize, Serialize};

/// A cluster product (node type or service tier).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataClusterProduct {
    provider_product_id: String,
    name: String,
    description: String,
    #[serde(default)]
    hourly_rate: Option<f64>,
    #[serde(default)]
    storage_rate_per_gb: Option<f64>,
}

impl DataClusterProduct {
    pub fn get_instance(
        product_id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            provider_product_id: product_id.into(),
            name: name.into(),
            description: description.into(),
            hourly_rate: None,
            storage_rate_per_gb: None,
        }
    }

    pub fn provider_product_id(&self) -> &str {
        &self.provider_product_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Price per node-hour, in the provider's billing currency.
    pub fn hourly_rate(&self) -> Option<f64> {
        self.hourly_rate
    }

    pub fn storage_rate_per_gb(&self) -> Option<f64> {
        self.storage_rate_per_gb
    }

    #[must_use]
    pub fn with_pricing(mut self, hourly_rate: f64, storage_rate_per_gb: Option<f64>) -> Self {
        self.hourly_rate = Some(hourly_rate);
        self.storage_rate_per_gb = storage_rate_per_gb;
        self
    }
}

/// A cluster engine version and the parameter family its groups belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataClusterVersion {
    version_number: String,
    parameter_family: String,
    name: String,
    description: String,
    #[serde(default)]
    provider_product_id: Option<String>,
}

impl DataClusterVersion {
    pub fn get_instance(
        version_number: impl Into<String>,
        parameter_family: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            version_number: version_number.into(),
            parameter_family: parameter_family.into(),
            name: name.into(),
            description: description.into(),
            provider_product_id: None,
        }
    }

    pub fn version_number(&self) -> &str {
        &self.version_number
    }

    pub fn parameter_family(&self) -> &str {
        &self.parameter_family
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Product this version is restricted to, if any.
    pub fn provider_product_id(&self) -> Option<&str> {
        self.provider_product_id.as_deref()
    }

    #[must_use]
    pub fn for_product(mut self, product_id: impl Into<String>) -> Self {
        self.provider_product_id = Some(product_id.into());
        self
    }
}
