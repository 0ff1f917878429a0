//! Classification of service responses into success or a typed failure.
//!
//! The service has answered with three different envelope shapes over its
//! API revisions. They are told apart by key presence, checked in order:
//!
//! | Shape  | Detected by                  | Example                                        |
//! |--------|------------------------------|------------------------------------------------|
//! | Google | `error` is present           | `{"error": {"errors": [{"reason": "keyInvalid"}]}}` |
//! | Coded  | `code` plus `errors` array   | `{"code": 503, "errors": [{"reason": "backendError"}]}` |
//! | Status | anything else                | `{"status": "noStreetSegmentFound"}`           |

use serde_json::Value;
use thiserror::Error;

use super::FailureKind;

/// A failure reported by the service itself.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiFailure {
    #[error("API key rejected by the service")]
    InvalidApiKey { message: Option<String> },

    #[error("service backend error")]
    BackendError { message: Option<String> },

    #[error("unrecognized API error (reason: {})", .reason.as_deref().unwrap_or("none"))]
    UnknownApiError {
        reason: Option<String>,
        envelope: Value,
    },

    #[error("no address parameter supplied")]
    NoAddressParameter,

    #[error("no street segment found for address")]
    NoStreetSegmentFound,

    #[error("address could not be parsed")]
    AddressUnparseable,

    #[error("address matched multiple street segments")]
    MultipleStreetSegmentsFound,

    #[error("service internal lookup failure")]
    InternalLookupFailure,

    #[error("unrecognized API status: {}", .status.as_deref().unwrap_or("<missing>"))]
    UnknownApiStatus {
        status: Option<String>,
        document: Value,
    },
}

impl ApiFailure {
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::InvalidApiKey { .. } => FailureKind::InvalidApiKey,
            Self::BackendError { .. } => FailureKind::BackendError,
            Self::UnknownApiError { .. } => FailureKind::UnknownApiError,
            Self::NoAddressParameter => FailureKind::NoAddressParameter,
            Self::NoStreetSegmentFound => FailureKind::NoStreetSegmentFound,
            Self::AddressUnparseable => FailureKind::AddressUnparseable,
            Self::MultipleStreetSegmentsFound => FailureKind::MultipleStreetSegmentsFound,
            Self::InternalLookupFailure => FailureKind::InternalLookupFailure,
            Self::UnknownApiStatus { .. } => FailureKind::UnknownApiStatus,
        }
    }
}

/// Result of classifying a response document.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Success,
    Failure(ApiFailure),
}

impl Outcome {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

enum Envelope<'a> {
    Google(&'a [Value]),
    Coded(&'a [Value]),
    Status(Option<&'a Value>),
}

impl<'a> Envelope<'a> {
    fn detect(doc: &'a Value) -> Self {
        if let Some(error) = doc.get("error").filter(|e| !e.is_null()) {
            let errors = error
                .get("errors")
                .and_then(Value::as_array)
                .map_or(&[][..], Vec::as_slice);
            return Self::Google(errors);
        }

        if doc.get("code").is_some() {
            if let Some(errors) = doc.get("errors").and_then(Value::as_array) {
                return Self::Coded(errors);
            }
        }

        Self::Status(doc.get("status"))
    }
}

fn first_error(errors: &[Value]) -> (Option<&str>, Option<String>) {
    let first = errors.first();
    let reason = first.and_then(|e| e.get("reason")).and_then(Value::as_str);
    let message = first
        .and_then(|e| e.get("message"))
        .and_then(Value::as_str)
        .map(str::to_string);
    (reason, message)
}

/// Decide whether `doc` is a successful response or which failure it reports.
///
/// Every document maps to exactly one outcome; documents of unfamiliar shape
/// become `UnknownApiError`/`UnknownApiStatus` carrying the raw JSON.
#[must_use]
pub fn classify(doc: &Value) -> Outcome {
    let failure = match Envelope::detect(doc) {
        Envelope::Google(errors) => match first_error(errors) {
            (Some("keyInvalid"), message) => ApiFailure::InvalidApiKey { message },
            (reason, _) => ApiFailure::UnknownApiError {
                reason: reason.map(str::to_string),
                envelope: doc.clone(),
            },
        },
        Envelope::Coded(errors) => match first_error(errors) {
            (Some("backendError"), message) => ApiFailure::BackendError { message },
            (reason, _) => ApiFailure::UnknownApiError {
                reason: reason.map(str::to_string),
                envelope: doc.clone(),
            },
        },
        Envelope::Status(status) => match status.and_then(Value::as_str) {
            Some("success") => return Outcome::Success,
            Some("noAddressParameter") => ApiFailure::NoAddressParameter,
            Some("noStreetSegmentFound") => ApiFailure::NoStreetSegmentFound,
            Some("addressUnparseable") => ApiFailure::AddressUnparseable,
            Some("multipleStreetSegmentsFound") => ApiFailure::MultipleStreetSegmentsFound,
            Some("internalLookupFailure") => ApiFailure::InternalLookupFailure,
            _ => ApiFailure::UnknownApiStatus {
                status: status.map(|s| s.as_str().map_or_else(|| s.to_string(), str::to_string)),
                document: doc.clone(),
            },
        },
    };

    tracing::debug!(kind = ?failure.kind(), "service reported failure");
    Outcome::Failure(failure)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    proptest! {
        /// Any status outside the known table is reported as unknown, never success
        #[test]
        fn unknown_status_never_succeeds(status in "[a-zA-Z]{1,24}") {
            let known = [
                "success",
                "noAddressParameter",
                "noStreetSegmentFound",
                "addressUnparseable",
                "multipleStreetSegmentsFound",
                "internalLookupFailure",
            ];
            prop_assume!(!known.contains(&status.as_str()));
            let outcome = classify(&json!({ "status": status }));
            prop_assert!(
                matches!(outcome, Outcome::Failure(ApiFailure::UnknownApiStatus { .. })),
                "unexpected outcome {:?}",
                outcome
            );
        }
    }
}
