use serde::Serialize;

use crate::Official;

/// A public office and the officials currently holding it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Office {
    pub name: String,
    pub levels: Vec<String>,
    pub roles: Vec<String>,
    officials: Vec<Official>,
}

impl Office {
    pub fn new(name: impl Into<String>, levels: Vec<String>, roles: Vec<String>) -> Self {
        Self {
            name: name.into(),
            levels,
            roles,
            officials: Vec::new(),
        }
    }

    pub fn push_official(&mut self, official: Official) {
        self.officials.push(official);
    }

    #[must_use]
    pub fn officials(&self) -> &[Official] {
        &self.officials
    }
}

/// A geographic or political division, keyed by its OCD division id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Division {
    pub ocd_division_id: String,
    pub name: String,
    offices: Vec<Office>,
}

impl Division {
    pub fn new(ocd_division_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            ocd_division_id: ocd_division_id.into(),
            name: name.into(),
            offices: Vec::new(),
        }
    }

    pub fn push_office(&mut self, office: Office) {
        self.offices.push(office);
    }

    #[must_use]
    pub fn offices(&self) -> &[Office] {
        &self.offices
    }

    /// First office with the given name.
    #[must_use]
    pub fn office(&self, name: &str) -> Option<&Office> {
        self.offices.iter().find(|office| office.name == name)
    }
}
