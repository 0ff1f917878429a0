use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ModelError;

/// Social media services an official can be reached on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChannelType {
    Facebook,
    GooglePlus,
    Twitter,
    YouTube,
}

impl ChannelType {
    pub const ALL_NAMES: [&'static str; 4] = ["Facebook", "GooglePlus", "Twitter", "YouTube"];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Facebook => "Facebook",
            Self::GooglePlus => "GooglePlus",
            Self::Twitter => "Twitter",
            Self::YouTube => "YouTube",
        }
    }

    fn profile_url(self, id: &str) -> String {
        match self {
            Self::Twitter => format!("https://twitter.com/{id}"),
            Self::Facebook => format!("https://www.facebook.com/profile.php?id={id}"),
            Self::GooglePlus => format!("https://plus.google.com/{id}"),
            Self::YouTube => format!("http://www.youtube.com/{id}"),
        }
    }
}

impl FromStr for ChannelType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Facebook" => Ok(Self::Facebook),
            "GooglePlus" => Ok(Self::GooglePlus),
            "Twitter" => Ok(Self::Twitter),
            "YouTube" => Ok(Self::YouTube),
            other => Err(ModelError::UnsupportedChannelType {
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for ChannelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A social media handle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub id: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ChannelType>,
}

impl Channel {
    /// Build a channel, rejecting any type outside [`ChannelType`].
    ///
    /// # Errors
    ///
    /// Returns `ModelError::UnsupportedChannelType` if `kind` is present but
    /// names an unknown service.
    pub fn new(id: impl Into<String>, kind: Option<&str>) -> Result<Self, ModelError> {
        let kind = kind.map(str::parse::<ChannelType>).transpose()?;
        Ok(Self {
            id: id.into(),
            kind,
        })
    }

    /// Public profile URL for this handle, if the channel type is known.
    #[must_use]
    pub fn profile_url(&self) -> Option<String> {
        self.kind.map(|kind| kind.profile_url(&self.id))
    }
}
