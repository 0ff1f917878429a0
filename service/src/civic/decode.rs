//! Reconstruction of the division → office → official graph.
//!
//! The service denormalizes its answer: divisions point at offices and
//! offices point at officials through reference lists into top-level
//! containers. Two revisions of that addressing exist:
//!
//! - id-keyed: `officeIds`/`officialIds` look up entries of an object
//! - index-keyed: `officeIndices`/`officialIndices` look up positions in an array
//!
//! Both are handled by [`RecordTable`], chosen per container from the JSON
//! shape, so the graph walk itself is written once.

use civic_model::{
    Address, Channel, Division, ModelError, Office, Official, OfficialDraft, PhoneNumber,
};
use indexmap::IndexMap;
use serde_json::{Map, Value};
use thiserror::Error;

use super::classify::{classify, ApiFailure, Outcome};
use super::types::RepresentativeInfoResponse;
use super::FailureKind;

/// A response that is valid JSON but does not follow the expected schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedResponse {
    #[error("missing required field '{path}'")]
    MissingField { path: String },

    #[error("expected {expected} at '{path}'")]
    WrongType { path: String, expected: &'static str },

    #[error("{collection} has no entry for reference {reference}")]
    DanglingReference {
        collection: &'static str,
        reference: String,
    },

    #[error("reference {reference} does not match the shape of {collection}")]
    ReferenceKindMismatch {
        collection: &'static str,
        reference: String,
    },
}

/// Errors produced by [`decode`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    #[error(transparent)]
    Api(#[from] ApiFailure),

    #[error("malformed response: {0}")]
    Malformed(#[from] MalformedResponse),

    #[error("invalid value in response: {0}")]
    InvalidValueObject(#[from] ModelError),
}

impl DecodeError {
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::Api(failure) => failure.kind(),
            Self::Malformed(_) => FailureKind::MalformedResponse,
            Self::InvalidValueObject(_) => FailureKind::InvalidValueObject,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Reference {
    Index(usize),
    Id(String),
}

impl std::fmt::Display for Reference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Index(i) => write!(f, "{i}"),
            Self::Id(id) => write!(f, "{id:?}"),
        }
    }
}

#[derive(Clone, Copy)]
enum Records<'a> {
    Indexed(&'a [Value]),
    Keyed(&'a Map<String, Value>),
    Absent,
}

/// One top-level container (`offices` or `officials`) that references point into.
struct RecordTable<'a> {
    name: &'static str,
    records: Records<'a>,
}

impl<'a> RecordTable<'a> {
    fn from_doc(doc: &'a Value, name: &'static str) -> Result<Self, MalformedResponse> {
        let records = match doc.get(name) {
            None | Some(Value::Null) => Records::Absent,
            Some(Value::Array(items)) => Records::Indexed(items),
            Some(Value::Object(map)) => Records::Keyed(map),
            Some(_) => {
                return Err(MalformedResponse::WrongType {
                    path: name.to_string(),
                    expected: "array or object",
                })
            }
        };
        Ok(Self { name, records })
    }

    /// Resolve a reference to its record and the path used in error messages.
    fn resolve(&self, reference: &Reference) -> Result<(&'a Value, String), MalformedResponse> {
        let found = match (self.records, reference) {
            (Records::Absent, _) => {
                return Err(MalformedResponse::MissingField {
                    path: self.name.to_string(),
                })
            }
            (Records::Indexed(items), Reference::Index(i)) => items.get(*i),
            (Records::Keyed(map), Reference::Id(id)) => map.get(id),
            _ => {
                return Err(MalformedResponse::ReferenceKindMismatch {
                    collection: self.name,
                    reference: reference.to_string(),
                })
            }
        };

        found
            .map(|record| (record, format!("{}[{reference}]", self.name)))
            .ok_or_else(|| MalformedResponse::DanglingReference {
                collection: self.name,
                reference: reference.to_string(),
            })
    }
}

/// Decode a representative lookup response into its object graph.
///
/// The document is classified first; a failure envelope is returned as
/// [`DecodeError::Api`] without looking at any other field. No partial graph
/// is ever returned.
///
/// # Errors
///
/// - [`DecodeError::Api`] when the service reported a failure
/// - [`DecodeError::Malformed`] for missing fields or dangling references
/// - [`DecodeError::InvalidValueObject`] when a value type rejects its input
pub fn decode(doc: &Value) -> Result<RepresentativeInfoResponse, DecodeError> {
    if let Outcome::Failure(failure) = classify(doc) {
        return Err(failure.into());
    }

    let entries = match doc.get("divisions") {
        None | Some(Value::Null) => {
            return Err(MalformedResponse::MissingField {
                path: "divisions".into(),
            }
            .into())
        }
        Some(value) => value.as_object().ok_or_else(|| MalformedResponse::WrongType {
            path: "divisions".into(),
            expected: "object",
        })?,
    };

    let offices = RecordTable::from_doc(doc, "offices")?;
    let officials = RecordTable::from_doc(doc, "officials")?;

    let mut divisions = Vec::with_capacity(entries.len());
    for (ocd_division_id, entry) in entries {
        let path = format!("divisions[{ocd_division_id:?}]");
        let name = required_str(entry, "name", &path)?;
        let mut division = Division::new(ocd_division_id.clone(), name);

        for reference in references(entry, &path, "officeIndices", "officeIds")? {
            let (record, office_path) = offices.resolve(&reference)?;
            division.push_office(decode_office(record, &office_path, &officials)?);
        }
        divisions.push(division);
    }

    let normalized_input = decode_normalized_input(doc)?;

    let office_count: usize = divisions.iter().map(|d| d.offices().len()).sum();
    let official_count: usize = divisions
        .iter()
        .flat_map(Division::offices)
        .map(|o| o.officials().len())
        .sum();
    tracing::debug!(
        divisions = divisions.len(),
        offices = office_count,
        officials = official_count,
        "decoded representative info"
    );

    Ok(RepresentativeInfoResponse {
        divisions,
        normalized_input,
    })
}

fn decode_office(
    record: &Value,
    path: &str,
    officials: &RecordTable<'_>,
) -> Result<Office, DecodeError> {
    let name = required_str(record, "name", path)?;
    let levels = string_list(record, "levels", path)?;
    let roles = string_list(record, "roles", path)?;
    let mut office = Office::new(name, levels, roles);

    for reference in references(record, path, "officialIndices", "officialIds")? {
        let (official, official_path) = officials.resolve(&reference)?;
        office.push_official(decode_official(official, &official_path)?);
    }
    Ok(office)
}

fn decode_official(record: &Value, path: &str) -> Result<Official, DecodeError> {
    let addresses = optional_array(record, "address", path)?
        .iter()
        .enumerate()
        .map(|(i, item)| decode_address(item, &format!("{path}.address[{i}]")))
        .collect::<Result<Vec<_>, _>>()?;

    let channels = optional_array(record, "channels", path)?
        .iter()
        .enumerate()
        .map(|(i, item)| decode_channel(item, &format!("{path}.channels[{i}]")))
        .collect::<Result<Vec<_>, _>>()?;

    let phones = optional_array(record, "phones", path)?
        .iter()
        .enumerate()
        .map(|(i, item)| decode_phone(item, &format!("{path}.phones[{i}]")))
        .collect::<Result<Vec<_>, _>>()?;

    let draft = OfficialDraft {
        name: required_str(record, "name", path)?,
        phones,
        emails: string_list(record, "emails", path)?,
        channels,
        photo_url: optional_str(record, "photoUrl", path)?,
        urls: string_list(record, "urls", path)?,
        addresses,
        party: optional_str(record, "party", path)?,
    };
    Ok(Official::build(draft)?)
}

fn decode_address(item: &Value, path: &str) -> Result<Address, DecodeError> {
    if !item.is_object() {
        return Err(wrong_nested(item, path, "address object").into());
    }
    Ok(Address {
        location_name: optional_str(item, "locationName", path)?,
        line1: optional_str(item, "line1", path)?,
        line2: optional_str(item, "line2", path)?,
        line3: optional_str(item, "line3", path)?,
        city: optional_str(item, "city", path)?,
        state: optional_str(item, "state", path)?,
        zip: optional_str(item, "zip", path)?,
    })
}

fn decode_channel(item: &Value, path: &str) -> Result<Channel, DecodeError> {
    if !item.is_object() {
        return Err(wrong_nested(item, path, "channel object").into());
    }
    let id = required_str(item, "id", path)?;
    let kind = optional_str(item, "type", path)?;
    Ok(Channel::new(id, kind.as_deref())?)
}

/// Phones arrive as bare strings, or as `{"number": ...}` in the id-keyed revision.
fn decode_phone(item: &Value, path: &str) -> Result<PhoneNumber, DecodeError> {
    match item {
        Value::String(number) => Ok(PhoneNumber::new(number.as_str())),
        Value::Object(_) => Ok(PhoneNumber::new(required_str(item, "number", path)?)),
        other => Err(wrong_nested(other, path, "phone number").into()),
    }
}

fn decode_normalized_input(
    doc: &Value,
) -> Result<Option<IndexMap<String, String>>, MalformedResponse> {
    let map = match doc.get("normalizedInput") {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Object(map)) => map,
        Some(_) => {
            return Err(MalformedResponse::WrongType {
                path: "normalizedInput".into(),
                expected: "object",
            })
        }
    };

    map.iter()
        .map(|(key, value)| {
            value
                .as_str()
                .map(|s| (key.clone(), s.to_string()))
                .ok_or_else(|| MalformedResponse::WrongType {
                    path: format!("normalizedInput.{key}"),
                    expected: "string",
                })
        })
        .collect::<Result<IndexMap<_, _>, _>>()
        .map(Some)
}

// ── Field helpers ───────────────────────────────────────────────────

/// Reference list of a record, preferring positional indices over ids.
fn references(
    record: &Value,
    path: &str,
    indices_key: &str,
    ids_key: &str,
) -> Result<Vec<Reference>, MalformedResponse> {
    if let Some(indices) = present(record, indices_key) {
        return list_of(indices, &format!("{path}.{indices_key}"), "array of indices")?
            .iter()
            .enumerate()
            .map(|(i, v)| {
                v.as_u64()
                    .and_then(|n| usize::try_from(n).ok())
                    .map(Reference::Index)
                    .ok_or_else(|| MalformedResponse::WrongType {
                        path: format!("{path}.{indices_key}[{i}]"),
                        expected: "non-negative integer",
                    })
            })
            .collect();
    }

    if let Some(ids) = present(record, ids_key) {
        return list_of(ids, &format!("{path}.{ids_key}"), "array of ids")?
            .iter()
            .enumerate()
            .map(|(i, v)| {
                v.as_str()
                    .map(|id| Reference::Id(id.to_string()))
                    .ok_or_else(|| MalformedResponse::WrongType {
                        path: format!("{path}.{ids_key}[{i}]"),
                        expected: "string id",
                    })
            })
            .collect();
    }

    Ok(Vec::new())
}

fn present<'a>(record: &'a Value, key: &str) -> Option<&'a Value> {
    record.get(key).filter(|v| !v.is_null())
}

fn list_of<'a>(
    value: &'a Value,
    path: &str,
    expected: &'static str,
) -> Result<&'a [Value], MalformedResponse> {
    value
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| MalformedResponse::WrongType {
            path: path.to_string(),
            expected,
        })
}

fn optional_array<'a>(
    record: &'a Value,
    key: &str,
    path: &str,
) -> Result<&'a [Value], MalformedResponse> {
    match present(record, key) {
        Some(value) => list_of(value, &format!("{path}.{key}"), "array"),
        None => Ok(&[]),
    }
}

fn required_str(record: &Value, key: &str, path: &str) -> Result<String, MalformedResponse> {
    optional_str(record, key, path)?.ok_or_else(|| MalformedResponse::MissingField {
        path: format!("{path}.{key}"),
    })
}

fn optional_str(record: &Value, key: &str, path: &str) -> Result<Option<String>, MalformedResponse> {
    present(record, key)
        .map(|v| {
            v.as_str()
                .map(str::to_string)
                .ok_or_else(|| MalformedResponse::WrongType {
                    path: format!("{path}.{key}"),
                    expected: "string",
                })
        })
        .transpose()
}

fn string_list(record: &Value, key: &str, path: &str) -> Result<Vec<String>, MalformedResponse> {
    optional_array(record, key, path)?
        .iter()
        .enumerate()
        .map(|(i, v)| {
            v.as_str()
                .map(str::to_string)
                .ok_or_else(|| MalformedResponse::WrongType {
                    path: format!("{path}.{key}[{i}]"),
                    expected: "string",
                })
        })
        .collect()
}

const fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn wrong_nested(value: &Value, path: &str, expected: &'static str) -> ModelError {
    ModelError::WrongNestedType {
        path: path.to_string(),
        expected,
        found: json_type(value),
    }
}
