//! Integration tests for the provider-call seam and response classification.
//!
//! An in-memory provider stands in for a real cloud backend: it turns canned
//! HTTP responses into records or classified failures the way a provider
//! crate would.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use cloud_warehouse::bigdata::{
    CreateAttributes, DataCluster, DataClusterAttributes, DataClusterCreateOptions,
    DataClusterParameterGroup, DataClusterProduct, DataClusterState, DataClusterVersion,
};
use cloud_warehouse::config::WarehouseConfig;
use cloud_warehouse::error::{
    CloudErrorType, CloudResponseError, CloudResult, HttpResponse, RecoveryHint,
    ResponseClassifier, StatusClassifier,
};
use cloud_warehouse::DataWarehouseSupport;

struct InMemoryWarehouse {
    classifier: StatusClassifier,
    clusters: Mutex<HashMap<String, DataCluster>>,
    next_response: Mutex<Option<HttpResponse>>,
    max_clusters: usize,
}

impl InMemoryWarehouse {
    fn new(max_clusters: usize) -> Self {
        Self {
            classifier: StatusClassifier::new(),
            clusters: Mutex::new(HashMap::new()),
            next_response: Mutex::new(None),
            max_clusters,
        }
    }

    fn fail_next(&self, response: HttpResponse) {
        *self.next_response.lock().unwrap() = Some(response);
    }

    fn check_response(&self) -> CloudResult<()> {
        match self.next_response.lock().unwrap().take() {
            Some(response) => self.classifier.classify(&response),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl DataWarehouseSupport for InMemoryWarehouse {
    fn provider_name(&self) -> &str {
        "memory"
    }

    async fn create_cluster(&self, options: &DataClusterCreateOptions) -> CloudResult<DataCluster> {
        self.check_response()?;

        let mut clusters = self.clusters.lock().unwrap();
        if clusters.len() >= self.max_clusters {
            return Err(self.classifier.classify_failure(&HttpResponse::new(
                400,
                "memory",
                r#"{"code":"ClusterQuotaExceeded","message":"cluster limit reached"}"#,
            )));
        }

        let id = format!("dc-{}", clusters.len() + 1);
        let mut cluster = DataCluster::get_instance(
            "owner",
            "region",
            id.clone(),
            DataClusterState::Pending,
            options.name(),
            options.description(),
            options.provider_product_id(),
            options.database_name(),
            if options.database_port() == 0 { 5439 } else { options.database_port() },
            DataClusterAttributes {
                data_center_id: options.provider_data_center_id().map(str::to_string),
                cluster_version: options.cluster_version().map(str::to_string),
                node_count: Some(options.node_count()),
                parameter_group_id: options.provider_parameter_group_id().map(str::to_string),
                ..DataClusterAttributes::default()
            },
        )
        .having_admin_credentials(options.admin_user_name(), options.admin_password());
        if options.is_encrypted() {
            cluster = cluster.with_encryption();
        }

        clusters.insert(id, cluster.clone());
        Ok(cluster)
    }

    async fn get_cluster(&self, cluster_id: &str) -> CloudResult<Option<DataCluster>> {
        self.check_response()?;
        Ok(self.clusters.lock().unwrap().get(cluster_id).cloned())
    }

    async fn list_clusters(&self) -> CloudResult<Vec<DataCluster>> {
        self.check_response()?;
        Ok(self.clusters.lock().unwrap().values().cloned().collect())
    }

    async fn list_cluster_products(&self) -> CloudResult<Vec<DataClusterProduct>> {
        Ok(vec![DataClusterProduct::get_instance(
            "dc1.large",
            "Dense compute",
            "SSD-backed nodes",
        )])
    }

    async fn list_cluster_versions(&self) -> CloudResult<Vec<DataClusterVersion>> {
        Ok(vec![DataClusterVersion::get_instance(
            "1.0",
            "warehouse-1.0",
            "1.0",
            "Initial engine",
        )])
    }

    async fn list_cluster_parameter_groups(&self) -> CloudResult<Vec<DataClusterParameterGroup>> {
        Ok(vec![])
    }

    async fn remove_cluster(&self, cluster_id: &str) -> CloudResult<()> {
        self.check_response()?;
        self.clusters
            .lock()
            .unwrap()
            .remove(cluster_id)
            .map(|_| ())
            .ok_or_else(|| CloudResponseError::general(404, "ClusterNotFound", cluster_id))
    }
}

fn options() -> DataClusterCreateOptions {
    DataClusterCreateOptions::get_instance(
        "dc1.large",
        "analytics",
        "reporting warehouse",
        "reports",
        CreateAttributes::default(),
    )
}

#[test]
fn test_authentication_classification_fields() {
    let error = CloudResponseError::new(CloudErrorType::Authentication, 401, "AuthFailure", "bad token");

    assert_eq!(error.error_type(), CloudErrorType::Authentication);
    assert_eq!(error.http_code(), 401);
    assert_eq!(error.provider_code(), "AuthFailure");
    assert_eq!(error.message(), "bad token");
    assert_eq!(error.recovery_hint(), RecoveryHint::WaitForUser);
}

#[tokio::test]
async fn test_create_cluster_success() {
    let warehouse = InMemoryWarehouse::new(5);
    let opts = options();

    let cluster = warehouse.create_cluster(&opts).await.unwrap();

    assert_eq!(cluster.name(), "analytics");
    assert_eq!(cluster.database_port(), 5439);
    assert!(cluster.is_encrypted());
    assert_eq!(cluster.admin_user_name(), Some(opts.admin_user_name()));
    assert_eq!(cluster.current_state(), DataClusterState::Pending);

    let fetched = warehouse
        .require_cluster(cluster.provider_data_cluster_id())
        .await
        .unwrap();
    assert_eq!(fetched, cluster);
}

#[tokio::test]
async fn test_quota_failure_is_not_retryable() {
    let warehouse = InMemoryWarehouse::new(1);
    warehouse.create_cluster(&options()).await.unwrap();

    let error = warehouse.create_cluster(&options()).await.unwrap_err();

    assert_eq!(error.error_type(), CloudErrorType::Quota);
    assert_eq!(error.http_code(), 400);
    assert_eq!(error.provider_code(), "ClusterQuotaExceeded");
    assert_eq!(error.message(), "cluster limit reached");
    assert!(!error.is_retryable());
}

#[tokio::test]
async fn test_throttled_response_surfaces_as_retryable() {
    let warehouse = InMemoryWarehouse::new(5);
    warehouse.fail_next(HttpResponse::new(
        400,
        "memory",
        "<Error><Code>Throttling</Code><Message>Rate exceeded</Message></Error>",
    ));

    let error = warehouse.list_clusters().await.unwrap_err();
    assert_eq!(error.error_type(), CloudErrorType::Throttling);
    assert!(error.is_retryable());

    // the failure is consumed; the next call succeeds
    assert!(warehouse.list_clusters().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_cluster() {
    let warehouse = InMemoryWarehouse::new(5);

    assert!(warehouse.get_cluster("nope").await.unwrap().is_none());

    let error = warehouse.require_cluster("nope").await.unwrap_err();
    assert_eq!(error.error_type(), CloudErrorType::General);
    assert_eq!(error.http_code(), 404);
    assert_eq!(error.provider_code(), "ClusterNotFound");

    let error = warehouse.remove_cluster("nope").await.unwrap_err();
    assert_eq!(error.http_code(), 404);
}

#[tokio::test]
async fn test_remove_cluster() {
    let warehouse = InMemoryWarehouse::new(5);
    let cluster = warehouse.create_cluster(&options()).await.unwrap();

    warehouse
        .remove_cluster(cluster.provider_data_cluster_id())
        .await
        .unwrap();
    assert!(warehouse.list_clusters().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_descriptor_listings() {
    let warehouse = InMemoryWarehouse::new(5);

    assert_eq!(warehouse.list_cluster_products().await.unwrap().len(), 1);
    assert_eq!(
        warehouse.list_cluster_versions().await.unwrap()[0].parameter_family(),
        "warehouse-1.0"
    );
    assert!(warehouse
        .list_cluster_parameter_groups()
        .await
        .unwrap()
        .is_empty());
}

#[test]
fn test_configured_classifier_and_credentials() {
    let config = WarehouseConfig::from_toml_str(
        r#"
[credentials]
admin_user_name = "ops"
password_length = 12

[[classifier.rules]]
pattern = "^NodeBusy$"
error_type = "CAPACITY"
"#,
    )
    .unwrap();

    let classifier = StatusClassifier::from_settings(&config.classifier).unwrap();
    let error = classifier
        .classify(&HttpResponse::new(409, "memory", r#"{"code":"NodeBusy"}"#))
        .unwrap_err();
    assert_eq!(error.error_type(), CloudErrorType::Capacity);
    assert!(error.is_retryable());

    let opts = DataClusterCreateOptions::get_instance_with_policy(
        "dc1.large",
        "analytics",
        "reporting warehouse",
        "reports",
        CreateAttributes::default(),
        &config.credentials,
    );
    assert_eq!(opts.admin_user_name(), "ops");
    assert_eq!(opts.admin_password().len(), 12);
}
