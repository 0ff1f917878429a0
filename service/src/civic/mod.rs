//! Civic information lookup module.
//!
//! Turns the representative lookup service's denormalized JSON into a
//! navigable division → office → official graph, and sorts its many failure
//! shapes into typed outcomes.
//!
//! # Architecture
//!
//! - [`classify()`] - Decides success vs. which failure a document reports
//! - [`decode()`] - Classifies, then rebuilds the object graph
//! - [`CivicInfoClient`] - Trait for fetching raw documents
//! - [`HttpCivicInfoClient`] - Real HTTP implementation using reqwest
//! - [`mock::MockCivicInfoClient`] - Mock for unit tests (behind `test-utils` feature)
//!
//! # Testing Patterns
//!
//! Decoding is a pure function of a `serde_json::Value`, so most tests feed
//! documents straight to [`decode()`]:
//!
//! ```ignore
//! use civicinfo::civic::decode;
//! use serde_json::json;
//!
//! let response = decode(&json!({
//!     "status": "success",
//!     "divisions": {"ocd-division/country:us": {"name": "United States"}}
//! }))?;
//! assert_eq!(response.divisions.len(), 1);
//! ```
//!
//! Use `MockHttpServer` (wiremock) to test `HttpCivicInfoClient` end to end.

mod classify;
mod client;
mod decode;
mod types;

pub use classify::{classify, ApiFailure, Outcome};
pub use client::{CivicInfoClient, HttpCivicInfoClient, LookupError, TransportError};
pub use decode::{decode, DecodeError, MalformedResponse};
pub use types::RepresentativeInfoResponse;

#[cfg(any(test, feature = "test-utils"))]
pub use client::mock;

/// Every way a lookup can fail once a document is in hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    InvalidApiKey,
    BackendError,
    UnknownApiError,
    NoAddressParameter,
    NoStreetSegmentFound,
    AddressUnparseable,
    MultipleStreetSegmentsFound,
    InternalLookupFailure,
    UnknownApiStatus,
    MalformedResponse,
    InvalidValueObject,
}

impl FailureKind {
    /// Failures the caller can fix by correcting the address.
    #[must_use]
    pub const fn is_address_problem(self) -> bool {
        matches!(
            self,
            Self::NoAddressParameter
                | Self::NoStreetSegmentFound
                | Self::AddressUnparseable
                | Self::MultipleStreetSegmentsFound
        )
    }
}
