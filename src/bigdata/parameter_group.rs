//! Parameter groups: named sets of engine settings.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A parameter value as reported by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterValue::Bool(v) => write!(f, "{}", v),
            ParameterValue::Integer(v) => write!(f, "{}", v),
            ParameterValue::Float(v) => write!(f, "{}", v),
            ParameterValue::Text(v) => f.write_str(v),
        }
    }
}

impl From<&str> for ParameterValue {
    fn from(value: &str) -> Self {
        ParameterValue::Text(value.to_string())
    }
}

impl From<String> for ParameterValue {
    fn from(value: String) -> Self {
        ParameterValue::Text(value)
    }
}

impl From<i64> for ParameterValue {
    fn from(value: i64) -> Self {
        ParameterValue::Integer(value)
    }
}

impl From<f64> for ParameterValue {
    fn from(value: f64) -> Self {
        ParameterValue::Float(value)
    }
}

impl From<bool> for ParameterValue {
    fn from(value: bool) -> Self {
        ParameterValue::Bool(value)
    }
}

/// A named set of engine parameters within a parameter family.
///
/// Equality compares parameters as a map: key sets must match exactly and
/// insertion order is irrelevant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataClusterParameterGroup {
    provider_group_id: String,
    family: String,
    name: String,
    description: String,
    #[serde(default)]
    parameters: HashMap<String, ParameterValue>,
}

impl DataClusterParameterGroup {
    pub fn get_instance(
        group_id: impl Into<String>,
        family: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: HashMap<String, ParameterValue>,
    ) -> Self {
        Self {
            provider_group_id: group_id.into(),
            family: family.into(),
            name: name.into(),
            description: description.into(),
            parameters,
        }
    }

    pub fn provider_group_id(&self) -> &str {
        &self.provider_group_id
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn parameters(&self) -> &HashMap<String, ParameterValue> {
        &self.parameters
    }

    pub fn parameter(&self, key: &str) -> Option<&ParameterValue> {
        self.parameters.get(key)
    }
}
