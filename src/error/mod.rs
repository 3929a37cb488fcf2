//! Error handling and classification module
//!
//! This module defines the normalized failure signal for provider calls and the
//! classifier that produces it from raw HTTP responses. Callers inspect the
//! category and status to decide whether to retry; no retry happens here.

pub mod classification;
pub mod classifier;

// Re-export main types for convenient access
pub use classification::{
    CloudErrorType, CloudResponseError, CloudResult, ParseEnumError, RecoveryHint,
};
pub use classifier::{
    from_transport_error, HttpResponse, ProviderCodeRule, ResponseClassifier, StatusClassifier,
};
