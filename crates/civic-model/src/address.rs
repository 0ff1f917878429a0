use std::fmt;

use serde::{Deserialize, Serialize};

/// A postal address as reported for an official.
///
/// Every field is optional. Missing fields render as empty tokens, so the
/// single-line form can contain runs of spaces; callers wanting tidy output
/// squeeze whitespace themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line3: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
}

fn token(field: Option<&String>) -> &str {
    field.map_or("", String::as_str)
}

impl Address {
    /// `line1 line2 line3 city state zip`, joined by single spaces.
    #[must_use]
    pub fn single_line(&self) -> String {
        [
            &self.line1,
            &self.line2,
            &self.line3,
            &self.city,
            &self.state,
            &self.zip,
        ]
        .iter()
        .map(|f| token(f.as_ref()))
        .collect::<Vec<_>>()
        .join(" ")
    }

    /// One street line per row, then `city state zip` on the last row.
    #[must_use]
    pub fn multi_line(&self) -> String {
        format!(
            "{}\n{}\n{}\n{} {} {}",
            token(self.line1.as_ref()),
            token(self.line2.as_ref()),
            token(self.line3.as_ref()),
            token(self.city.as_ref()),
            token(self.state.as_ref()),
            token(self.zip.as_ref()),
        )
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.single_line())
    }
}
