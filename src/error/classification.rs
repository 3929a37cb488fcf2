//! Normalized classification of failed provider responses.
//!
//! A [`CloudResponseError`] is the single failure signal produced when a
//! provider response is judged unsuccessful. It always carries a category, the
//! HTTP status, the provider's own error code and a message, so callers can
//! decide between retrying and aborting without parsing provider payloads.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Provider-agnostic category of a failed request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CloudErrorType {
    /// Credentials were rejected or lack the required permission.
    Authentication,
    /// The provider has no capacity to satisfy the request right now.
    Capacity,
    /// The request never completed at the transport level.
    Communication,
    /// Any provider error that fits no narrower category.
    #[default]
    General,
    /// An account quota or hard limit was reached.
    Quota,
    /// The provider is rate limiting the caller.
    Throttling,
}

impl CloudErrorType {
    /// All categories, in declaration order.
    pub const ALL: [CloudErrorType; 6] = [
        CloudErrorType::Authentication,
        CloudErrorType::Capacity,
        CloudErrorType::Communication,
        CloudErrorType::General,
        CloudErrorType::Quota,
        CloudErrorType::Throttling,
    ];

    /// Upper-case wire name of the category.
    pub fn as_str(&self) -> &'static str {
        match self {
            CloudErrorType::Authentication => "AUTHENTICATION",
            CloudErrorType::Capacity => "CAPACITY",
            CloudErrorType::Communication => "COMMUNICATION",
            CloudErrorType::General => "GENERAL",
            CloudErrorType::Quota => "QUOTA",
            CloudErrorType::Throttling => "THROTTLING",
        }
    }
}

impl fmt::Display for CloudErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CloudErrorType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CloudErrorType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseEnumError::new("cloud error type", s))
    }
}

/// Error returned when parsing an enum from a provider or config string fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind}: {value}")]
pub struct ParseEnumError {
    kind: &'static str,
    value: String,
}

impl ParseEnumError {
    pub(crate) fn new(kind: &'static str, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}

/// Hints for how a caller may react to a failure.
///
/// This is a signal only; backoff and retry loops belong to the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecoveryHint {
    /// Retry immediately with the same parameters.
    RetryNow,
    /// Retry after a specified duration.
    RetryAfter(Duration),
    /// Some outside intervention is needed first (new credentials, raised quota).
    WaitForUser,
    /// The request will not succeed as issued.
    StopExecution,
}

/// Delay suggested for throttled requests.
pub const THROTTLING_DELAY: Duration = Duration::from_secs(30);
/// Delay suggested when the provider reports missing capacity.
pub const CAPACITY_DELAY: Duration = Duration::from_secs(60);
/// Delay suggested for unclassified 5xx responses.
pub const SERVER_ERROR_DELAY: Duration = Duration::from_secs(10);

/// A provider response that did not succeed, normalized into four fields.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{error_type} error (HTTP {http_code}, provider code {provider_code}): {message}")]
#[serde(rename_all = "camelCase")]
pub struct CloudResponseError {
    error_type: CloudErrorType,
    http_code: u16,
    provider_code: String,
    message: String,
}

impl CloudResponseError {
    /// Creates a new classified response error.
    pub fn new(
        error_type: CloudErrorType,
        http_code: u16,
        provider_code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error_type,
            http_code,
            provider_code: provider_code.into(),
            message: message.into(),
        }
    }

    /// Creates an error in the fallback [`CloudErrorType::General`] category.
    pub fn general(
        http_code: u16,
        provider_code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(CloudErrorType::General, http_code, provider_code, message)
    }

    /// Returns the normalized category.
    pub fn error_type(&self) -> CloudErrorType {
        self.error_type
    }

    /// Returns the HTTP status of the response, `0` when no response arrived.
    pub fn http_code(&self) -> u16 {
        self.http_code
    }

    /// Returns the raw provider-specific error code.
    pub fn provider_code(&self) -> &str {
        &self.provider_code
    }

    /// Returns the human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns true for 5xx responses.
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.http_code)
    }

    /// Returns true for 4xx responses.
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.http_code)
    }

    /// Derives the recovery hint from category and status.
    pub fn recovery_hint(&self) -> RecoveryHint {
        match self.error_type {
            CloudErrorType::Communication => RecoveryHint::RetryNow,
            CloudErrorType::Throttling => RecoveryHint::RetryAfter(THROTTLING_DELAY),
            CloudErrorType::Capacity => RecoveryHint::RetryAfter(CAPACITY_DELAY),
            CloudErrorType::Authentication | CloudErrorType::Quota => RecoveryHint::WaitForUser,
            CloudErrorType::General if self.is_server_error() => {
                RecoveryHint::RetryAfter(SERVER_ERROR_DELAY)
            }
            CloudErrorType::General => RecoveryHint::StopExecution,
        }
    }

    /// Returns true if the recovery hint suggests retrying.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.recovery_hint(),
            RecoveryHint::RetryNow | RecoveryHint::RetryAfter(_)
        )
    }
}

/// Result type for operations that talk to a cloud provider.
pub type CloudResult<T> = Result<T, CloudResponseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors_return_constructor_values() {
        let error = CloudResponseError::new(
            CloudErrorType::Authentication,
            401,
            "AuthFailure",
            "bad token",
        );

        assert_eq!(error.error_type(), CloudErrorType::Authentication);
        assert_eq!(error.http_code(), 401);
        assert_eq!(error.provider_code(), "AuthFailure");
        assert_eq!(error.message(), "bad token");
    }

    #[test]
    fn test_default_category_is_general() {
        assert_eq!(CloudErrorType::default(), CloudErrorType::General);
        let error = CloudResponseError::general(418, "Teapot", "short and stout");
        assert_eq!(error.error_type(), CloudErrorType::General);
    }

    #[test]
    fn test_error_type_from_str() {
        assert_eq!(
            "throttling".parse::<CloudErrorType>().unwrap(),
            CloudErrorType::Throttling
        );
        assert_eq!(
            " QUOTA ".parse::<CloudErrorType>().unwrap(),
            CloudErrorType::Quota
        );
        let err = "bogus".parse::<CloudErrorType>().unwrap_err();
        assert_eq!(err, ParseEnumError::new("cloud error type", "bogus"));
        assert_eq!(err.to_string(), "unknown cloud error type: bogus");
    }

    #[test]
    fn test_error_type_display_matches_as_str() {
        for t in CloudErrorType::ALL {
            assert_eq!(t.to_string(), t.as_str());
        }
    }

    #[test]
    fn test_recovery_hints() {
        let cases = vec![
            (CloudErrorType::Communication, 0, RecoveryHint::RetryNow),
            (
                CloudErrorType::Throttling,
                429,
                RecoveryHint::RetryAfter(THROTTLING_DELAY),
            ),
            (
                CloudErrorType::Capacity,
                503,
                RecoveryHint::RetryAfter(CAPACITY_DELAY),
            ),
            (CloudErrorType::Authentication, 401, RecoveryHint::WaitForUser),
            (CloudErrorType::Quota, 400, RecoveryHint::WaitForUser),
            (
                CloudErrorType::General,
                500,
                RecoveryHint::RetryAfter(SERVER_ERROR_DELAY),
            ),
            (CloudErrorType::General, 400, RecoveryHint::StopExecution),
        ];

        for (error_type, status, expected) in cases {
            let error = CloudResponseError::new(error_type, status, "Code", "msg");
            assert_eq!(error.recovery_hint(), expected, "{:?}/{}", error_type, status);
        }
    }

    #[test]
    fn test_is_retryable() {
        assert!(CloudResponseError::new(CloudErrorType::Throttling, 429, "x", "y").is_retryable());
        assert!(CloudResponseError::general(502, "x", "y").is_retryable());
        assert!(!CloudResponseError::general(404, "x", "y").is_retryable());
        assert!(
            !CloudResponseError::new(CloudErrorType::Authentication, 403, "x", "y").is_retryable()
        );
    }

    #[test]
    fn test_status_families() {
        let server = CloudResponseError::general(503, "x", "y");
        let client = CloudResponseError::general(404, "x", "y");
        assert!(server.is_server_error());
        assert!(!server.is_client_error());
        assert!(client.is_client_error());
        assert!(!client.is_server_error());
    }

    #[test]
    fn test_display_includes_all_fields() {
        let error = CloudResponseError::new(
            CloudErrorType::Quota,
            400,
            "ClusterQuotaExceeded",
            "too many clusters",
        );
        let rendered = error.to_string();

        assert!(rendered.contains("QUOTA"));
        assert!(rendered.contains("400"));
        assert!(rendered.contains("ClusterQuotaExceeded"));
        assert!(rendered.contains("too many clusters"));
    }

    #[test]
    fn test_serializes_camel_case() {
        let error = CloudResponseError::new(CloudErrorType::Throttling, 429, "Throttled", "slow");
        let json = serde_json::to_value(&error).unwrap();

        assert_eq!(json["errorType"], "THROTTLING");
        assert_eq!(json["httpCode"], 429);
        assert_eq!(json["providerCode"], "Throttled");
    }
}
