use serde::Serialize;
use url::Url;

use crate::{Address, Channel, ModelError, Party, PhoneNumber};

/// Unvalidated fields for an [`Official`].
#[derive(Debug, Clone, Default)]
pub struct OfficialDraft {
    pub name: String,
    pub phones: Vec<PhoneNumber>,
    pub emails: Vec<String>,
    pub channels: Vec<Channel>,
    pub photo_url: Option<String>,
    pub urls: Vec<String>,
    pub addresses: Vec<Address>,
    pub party: Option<String>,
}

/// A person holding an office.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Official {
    name: String,
    phones: Vec<PhoneNumber>,
    emails: Vec<String>,
    channels: Vec<Channel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    photo_url: Option<String>,
    urls: Vec<String>,
    addresses: Vec<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    party: Option<Party>,
}

impl Official {
    /// Validate a draft and normalize its party.
    ///
    /// An unrecognized party is kept as given and only logged.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::InvalidUrl` for the first entry of `urls` that is
    /// not an absolute URL.
    pub fn build(draft: OfficialDraft) -> Result<Self, ModelError> {
        if let Some(bad) = draft.urls.iter().find(|url| !is_absolute_url(url)) {
            return Err(ModelError::InvalidUrl { url: bad.clone() });
        }

        let party = draft.party.as_deref().map(Party::normalize);
        if let Some(Party::Other(raw)) = &party {
            tracing::warn!(official = %draft.name, party = %raw, "unknown party, continuing");
        }

        Ok(Self {
            name: draft.name,
            phones: draft.phones,
            emails: draft.emails,
            channels: draft.channels,
            photo_url: draft.photo_url,
            urls: draft.urls,
            addresses: draft.addresses,
            party,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn phones(&self) -> &[PhoneNumber] {
        &self.phones
    }

    #[must_use]
    pub fn emails(&self) -> &[String] {
        &self.emails
    }

    #[must_use]
    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    #[must_use]
    pub fn photo_url(&self) -> Option<&str> {
        self.photo_url.as_deref()
    }

    #[must_use]
    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    #[must_use]
    pub fn addresses(&self) -> &[Address] {
        &self.addresses
    }

    #[must_use]
    pub const fn party(&self) -> Option<&Party> {
        self.party.as_ref()
    }
}

/// `Url::parse` trims surrounding whitespace and percent-encodes inner
/// spaces, so those are rejected up front to keep the stored string exact.
fn is_absolute_url(raw: &str) -> bool {
    !raw.chars().any(|c| c.is_ascii_whitespace() || c.is_control()) && Url::parse(raw).is_ok()
}
