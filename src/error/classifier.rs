//! Response classifier for provider HTTP responses
//!
//! This module turns a completed provider response into either success or a
//! fully populated [`CloudResponseError`]. Provider codes are matched against
//! an ordered list of regex rules; when no rule matches, the HTTP status
//! decides the category, and [`CloudErrorType::General`] is the final fallback.
//!
//! JSON bodies are decoded with `serde_json` so escaped characters survive;
//! the body patterns cover XML, plain text and JSON without a known key.

use regex::Regex;
use serde_json::Value;
use tracing::{debug, warn};

use super::{CloudErrorType, CloudResponseError, CloudResult};
use crate::config::ClassifierSettings;

/// Default pattern locating a provider error code in a body that is not decodable JSON.
pub const DEFAULT_CODE_PATTERN: &str =
    r#""(?:code|Code|errorCode|__type)"\s*:\s*"([^"]+)"|<Code>([^<]+)</Code>"#;

/// Default pattern locating a provider error message in a body that is not decodable JSON.
pub const DEFAULT_MESSAGE_PATTERN: &str =
    r#""(?:message|Message|errorMessage)"\s*:\s*"([^"]*)"|<Message>([^<]*)</Message>"#;

/// Provider code reported for failures that never produced a response.
pub const TRANSPORT_ERROR_CODE: &str = "TransportError";

/// Longest raw body echoed back as a message when the body has no message field.
const MAX_BODY_MESSAGE_LEN: usize = 512;

const JSON_CODE_KEYS: [&str; 4] = ["code", "Code", "errorCode", "__type"];
const JSON_MESSAGE_KEYS: [&str; 3] = ["message", "Message", "errorMessage"];
/// Envelope keys some providers wrap their error object in.
const JSON_ERROR_KEYS: [&str; 2] = ["error", "Error"];

/// A completed HTTP response handed over by the transport layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Identifier of the provider that answered (e.g. "aws", "azure").
    pub provider: String,
    /// Raw response body.
    pub body: String,
}

impl HttpResponse {
    /// Creates a new response value.
    pub fn new(status: u16, provider: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            status,
            provider: provider.into(),
            body: body.into(),
        }
    }

    /// Returns true for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Decides whether a response succeeded and, if not, how the failure is categorized.
pub trait ResponseClassifier: Send + Sync {
    /// Returns `Ok(())` for a successful response, or the classified failure.
    fn classify(&self, response: &HttpResponse) -> CloudResult<()>;
}

/// Maps provider error codes matching a regex onto a category.
#[derive(Debug, Clone)]
pub struct ProviderCodeRule {
    regex: Regex,
    error_type: CloudErrorType,
    description: String,
}

impl ProviderCodeRule {
    /// Compiles a new rule.
    ///
    /// # Errors
    /// Returns the regex compile error if `pattern` is invalid.
    pub fn new(
        pattern: &str,
        error_type: CloudErrorType,
        description: impl Into<String>,
    ) -> Result<Self, regex::Error> {
        Ok(Self::with_regex(Regex::new(pattern)?, error_type, description))
    }

    /// Creates a rule from a pre-compiled regex.
    pub fn with_regex(
        regex: Regex,
        error_type: CloudErrorType,
        description: impl Into<String>,
    ) -> Self {
        Self {
            regex,
            error_type,
            description: description.into(),
        }
    }

    /// Returns the category assigned on match.
    pub fn error_type(&self) -> CloudErrorType {
        self.error_type
    }

    /// Returns the description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Checks if this rule matches the provider code.
    pub fn matches(&self, provider_code: &str) -> bool {
        self.regex.is_match(provider_code)
    }
}

/// Provider-agnostic classifier driven by provider-code rules and HTTP status.
#[derive(Debug, Clone)]
pub struct StatusClassifier {
    rules: Vec<ProviderCodeRule>,
    code_pattern: Regex,
    message_pattern: Regex,
}

impl Default for StatusClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusClassifier {
    /// Creates a classifier with the built-in rules and body patterns.
    ///
    /// # Panics
    /// Panics if a built-in body pattern fails to compile.
    pub fn new() -> Self {
        Self {
            rules: Self::default_rules(),
            code_pattern: Regex::new(DEFAULT_CODE_PATTERN).expect("Invalid default code pattern"),
            message_pattern: Regex::new(DEFAULT_MESSAGE_PATTERN)
                .expect("Invalid default message pattern"),
        }
    }

    /// Creates a classifier with custom rules and the default body patterns.
    pub fn with_rules(rules: Vec<ProviderCodeRule>) -> Self {
        Self {
            rules,
            ..Self::new()
        }
    }

    /// Builds a classifier from configuration.
    ///
    /// Configured rules are consulted before the built-in ones.
    ///
    /// # Errors
    /// Returns the first regex compile error found in the settings.
    pub fn from_settings(settings: &ClassifierSettings) -> Result<Self, regex::Error> {
        let mut classifier = Self::new();

        if let Some(pattern) = &settings.code_pattern {
            classifier.code_pattern = Regex::new(pattern)?;
        }
        if let Some(pattern) = &settings.message_pattern {
            classifier.message_pattern = Regex::new(pattern)?;
        }

        let mut rules = settings
            .rules
            .iter()
            .map(|rule| {
                ProviderCodeRule::new(
                    &rule.pattern,
                    rule.error_type,
                    format!("configured: {}", rule.pattern),
                )
            })
            .collect::<Result<Vec<_>, _>>()?;
        rules.append(&mut classifier.rules);
        classifier.rules = rules;

        debug!(rules = classifier.rules.len(), "built response classifier from settings");
        Ok(classifier)
    }

    fn default_rules() -> Vec<ProviderCodeRule> {
        [
            (
                r"(?i)auth|credential|signature|unauthori[sz]ed|forbidden|accessdenied|expiredtoken|invalidtoken",
                CloudErrorType::Authentication,
                "Credential or permission failure",
            ),
            (
                r"(?i)throttl|rate.?exceeded|toomanyrequests|slowdown|requestlimitexceeded",
                CloudErrorType::Throttling,
                "Request throttled",
            ),
            (
                r"(?i)quota|limitexceeded",
                CloudErrorType::Quota,
                "Quota or account limit reached",
            ),
            (
                r"(?i)insufficient\w*capacity|capacity|unavailable",
                CloudErrorType::Capacity,
                "Provider capacity exhausted",
            ),
        ]
        .into_iter()
        .filter_map(|(pattern, error_type, description)| {
            ProviderCodeRule::new(pattern, error_type, description).ok()
        })
        .collect()
    }

    /// Adds a rule after the existing ones.
    pub fn add_rule(&mut self, rule: ProviderCodeRule) {
        self.rules.push(rule);
    }

    /// Returns the configured rules in priority order.
    pub fn rules(&self) -> &[ProviderCodeRule] {
        &self.rules
    }

    /// Category implied by the HTTP status alone.
    pub fn category_for_status(status: u16) -> CloudErrorType {
        match status {
            0 | 408 | 502 | 504 => CloudErrorType::Communication,
            401 | 403 => CloudErrorType::Authentication,
            429 => CloudErrorType::Throttling,
            402 | 413 => CloudErrorType::Quota,
            503 | 507 => CloudErrorType::Capacity,
            _ => CloudErrorType::General,
        }
    }

    /// Extracts the provider error code from a response body.
    pub fn extract_code(&self, body: &str) -> Option<String> {
        self.code_in(&ResponseBody::parse(body))
    }

    /// Extracts the provider error message from a response body.
    pub fn extract_message(&self, body: &str) -> Option<String> {
        self.message_in(&ResponseBody::parse(body))
    }

    fn code_in(&self, body: &ResponseBody<'_>) -> Option<String> {
        body.field(&JSON_CODE_KEYS, &self.code_pattern)
            .filter(|code| !code.is_empty())
    }

    fn message_in(&self, body: &ResponseBody<'_>) -> Option<String> {
        body.field(&JSON_MESSAGE_KEYS, &self.message_pattern)
    }

    /// Builds the failure for an unsuccessful response.
    pub fn classify_failure(&self, response: &HttpResponse) -> CloudResponseError {
        let body = ResponseBody::parse(&response.body);
        let provider_code = self
            .code_in(&body)
            .unwrap_or_else(|| response.status.to_string());

        let error_type = self
            .rules
            .iter()
            .find(|rule| rule.matches(&provider_code))
            .map(ProviderCodeRule::error_type)
            .unwrap_or_else(|| Self::category_for_status(response.status));

        let message = self
            .message_in(&body)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| fallback_message(response));

        warn!(
            provider = %response.provider,
            status = response.status,
            provider_code = %provider_code,
            error_type = %error_type,
            "provider request failed"
        );

        CloudResponseError::new(error_type, response.status, provider_code, message)
    }
}

impl ResponseClassifier for StatusClassifier {
    fn classify(&self, response: &HttpResponse) -> CloudResult<()> {
        if response.is_success() {
            return Ok(());
        }
        Err(self.classify_failure(response))
    }
}

/// Builds the failure reported when a request produced no response at all.
pub fn from_transport_error(provider: &str, message: impl Into<String>) -> CloudResponseError {
    let message = message.into();
    warn!(provider = %provider, error = %message, "provider transport failure");
    CloudResponseError::new(
        CloudErrorType::Communication,
        0,
        TRANSPORT_ERROR_CODE,
        message,
    )
}

/// A response body, decoded once as JSON when possible.
struct ResponseBody<'a> {
    raw: &'a str,
    json: Option<Value>,
}

impl<'a> ResponseBody<'a> {
    fn parse(raw: &'a str) -> Self {
        Self {
            raw,
            json: serde_json::from_str(raw).ok(),
        }
    }

    /// Looks `keys` up in the decoded JSON, then falls back to `pattern` on the raw text.
    fn field(&self, keys: &[&str], pattern: &Regex) -> Option<String> {
        self.json
            .as_ref()
            .and_then(|json| json_field(json, keys))
            .or_else(|| first_capture(pattern, self.raw))
    }
}

fn json_field(value: &Value, keys: &[&str]) -> Option<String> {
    let object = value.as_object()?;
    keys.iter()
        .filter_map(|key| object.get(*key))
        .find_map(json_scalar)
        .or_else(|| {
            JSON_ERROR_KEYS
                .iter()
                .filter_map(|key| object.get(*key))
                .find_map(|nested| json_field(nested, keys))
        })
}

fn json_scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.trim().to_string()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn first_capture(regex: &Regex, text: &str) -> Option<String> {
    let caps = regex.captures(text)?;
    caps.iter()
        .skip(1)
        .flatten()
        .next()
        .map(|m| m.as_str().trim().to_string())
}

fn fallback_message(response: &HttpResponse) -> String {
    let body = response.body.trim();
    if !body.is_empty() {
        return body.chars().take(MAX_BODY_MESSAGE_LEN).collect();
    }
    match canonical_reason(response.status) {
        Some(reason) => format!("HTTP {} {}", response.status, reason),
        None => format!("HTTP {}", response.status),
    }
}

fn canonical_reason(status: u16) -> Option<&'static str> {
    Some(match status {
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        408 => "Request Timeout",
        409 => "Conflict",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        504 => "Gateway Timeout",
        _ => return None,
    })
}
