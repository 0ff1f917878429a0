use std::fmt;

use serde::{Serialize, Serializer};

/// Spellings the service has used for each canonical party.
///
/// Matching is exact. Add new variants here; nothing else needs to change.
pub const PARTY_ALIASES: &[(&str, Party)] = &[
    ("Democrat", Party::Democrat),
    ("Democratic", Party::Democrat),
    ("Democratic Party", Party::Democrat),
    ("D", Party::Democrat),
    ("Democrat/Working Families", Party::Democrat),
    ("Republican", Party::Republican),
    ("Republican Party", Party::Republican),
    ("R", Party::Republican),
    ("Independent", Party::Independent),
    ("I", Party::Independent),
    ("Nonpartisan", Party::Nonpartisan),
    ("Unknown", Party::Unknown),
];

/// Party affiliation of an official.
///
/// Unrecognized spellings are kept verbatim in [`Party::Other`] since the
/// upstream vocabulary is open-ended.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Party {
    Democrat,
    Republican,
    Independent,
    Nonpartisan,
    Unknown,
    Other(String),
}

impl Party {
    /// Map a raw party string onto its canonical form, falling back to the
    /// input unchanged.
    #[must_use]
    pub fn normalize(raw: &str) -> Self {
        PARTY_ALIASES
            .iter()
            .find(|(alias, _)| *alias == raw)
            .map_or_else(|| Self::Other(raw.to_string()), |(_, party)| party.clone())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Democrat => "Democrat",
            Self::Republican => "Republican",
            Self::Independent => "Independent",
            Self::Nonpartisan => "Nonpartisan",
            Self::Unknown => "Unknown",
            Self::Other(raw) => raw,
        }
    }

    /// Whether this is one of the canonical parties.
    #[must_use]
    pub const fn is_recognized(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PartialEq<str> for Party {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for Party {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl Serialize for Party {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Normalizing an already-normalized party changes nothing
        #[test]
        fn normalize_is_idempotent(raw in ".{0,40}") {
            let once = Party::normalize(&raw);
            let twice = Party::normalize(once.as_str());
            prop_assert_eq!(once, twice);
        }

        /// Strings outside the alias table come back unchanged
        #[test]
        fn unknown_strings_round_trip(raw in "[a-z]{2,12}") {
            let normalized = Party::normalize(&raw);
            prop_assert_eq!(normalized.as_str(), raw.as_str());
        }
    }
}
