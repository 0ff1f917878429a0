//! Decoded result of a representative lookup.

use civic_model::Division;
use indexmap::IndexMap;
use serde::Serialize;

/// Divisions covering an address, each owning its offices and officials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepresentativeInfoResponse {
    /// In the order the service listed them.
    pub divisions: Vec<Division>,
    /// How the service split the input address (e.g. `line1`, `city`, `zip`),
    /// in the order it listed them.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normalized_input: Option<IndexMap<String, String>>,
}

impl RepresentativeInfoResponse {
    /// Find a division by its OCD division id.
    #[must_use]
    pub fn division(&self, ocd_division_id: &str) -> Option<&Division> {
        self.divisions
            .iter()
            .find(|d| d.ocd_division_id == ocd_division_id)
    }
}
