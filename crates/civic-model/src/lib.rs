//! Value types for civic representative lookups.
//!
//! These are passive records built once per decoded response. Construction
//! enforces each type's own invariants (known channel types, absolute URLs);
//! cross-record wiring (which officials hold which office) is left to the
//! response decoder.

mod address;
mod channel;
mod division;
mod official;
mod party;
mod phone;

pub use address::Address;
pub use channel::{Channel, ChannelType};
pub use division::{Division, Office};
pub use official::{Official, OfficialDraft};
pub use party::{Party, PARTY_ALIASES};
pub use phone::PhoneNumber;

/// Errors raised when a value type's invariant is violated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    #[error("channel type '{value}' is unsupported; must be one of {}", ChannelType::ALL_NAMES.join(","))]
    UnsupportedChannelType { value: String },

    #[error("invalid URL format '{url}'")]
    InvalidUrl { url: String },

    #[error("{expected} expected at {path}, got {found}")]
    WrongNestedType {
        path: String,
        expected: &'static str,
        found: &'static str,
    },
}
