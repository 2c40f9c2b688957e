//! DNS records as the zone API sees them.
//!
//! Record types are free-form strings; they are uppercased before being sent.

use serde_json::Value as JsonValue;

use crate::{Payload, ValidationError};

/// A DNS record to be added to a zone.
///
/// # Examples
///
/// ```
/// use bind9_api::record::Record;
/// use serde_json::Value;
///
/// let record = Record::new("www", "a", "192.0.2.1").ttl(3600);
///
/// assert_eq!(
///     Value::from(&record),
///     serde_json::json!({"name": "www", "type": "A", "ttl": 3600, "rdata": "192.0.2.1"})
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub name: String,
    pub type_: String,
    pub ttl: Option<u32>,
    pub rdata: String,
    pub comment: Option<String>,
}

impl Record {
    pub fn new(name: &str, type_: &str, rdata: &str) -> Self {
        Self {
            name: name.to_string(),
            type_: type_.to_string(),
            ttl: None,
            rdata: rdata.to_string(),
            comment: None,
        }
    }

    /// Sets the TTL of the record.
    pub fn ttl(mut self, ttl: u32) -> Self {
        self.ttl = Some(ttl);
        self
    }

    pub fn comment(mut self, comment: &str) -> Self {
        self.comment = Some(comment.to_string());
        self
    }

    /// The triple that identifies this record on the server.
    pub fn key(&self) -> RecordKey {
        RecordKey::new(&self.name, &self.type_, &self.rdata)
    }
}

impl From<&Record> for JsonValue {
    fn from(value: &Record) -> Self {
        Payload::new()
            .add("name", value.name.as_str())
            .add("type", value.type_.to_uppercase())
            .add_if_some("ttl", value.ttl)
            .add("rdata", value.rdata.as_str())
            .add_if_some("comment", non_empty(&value.comment))
            .into()
    }
}

/// Identifies an existing record by its name, type and data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordKey {
    pub name: String,
    pub type_: String,
    pub rdata: String,
}

impl RecordKey {
    pub fn new(name: &str, type_: &str, rdata: &str) -> Self {
        Self {
            name: name.to_string(),
            type_: type_.to_string(),
            rdata: rdata.to_string(),
        }
    }

    /// Checks that every identifying field is filled in.
    ///
    /// # Errors
    /// - `MissingField` naming the first empty field, checked in the order
    ///   `name`, `type`, `rdata`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.is_empty() {
            return Err(ValidationError::MissingField("name"));
        }
        if self.type_.is_empty() {
            return Err(ValidationError::MissingField("type"));
        }
        if self.rdata.is_empty() {
            return Err(ValidationError::MissingField("rdata"));
        }
        Ok(())
    }

    /// Adds the identifying fields to `payload`, each key prefixed with `prefix`.
    pub(crate) fn add_to(&self, payload: Payload, prefix: &str) -> Payload {
        payload
            .add(&format!("{prefix}name"), self.name.as_str())
            .add(&format!("{prefix}type"), self.type_.to_uppercase())
            .add(&format!("{prefix}rdata"), self.rdata.as_str())
    }
}

impl From<&Record> for RecordKey {
    fn from(value: &Record) -> Self {
        value.key()
    }
}

/// New values for an existing record. Fields left unset keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordUpdate {
    pub name: Option<String>,
    pub ttl: Option<u32>,
    pub rdata: Option<String>,
    pub comment: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl RecordUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn ttl(mut self, ttl: u32) -> Self {
        self.ttl = Some(ttl);
        self
    }

    pub fn rdata(mut self, rdata: &str) -> Self {
        self.rdata = Some(rdata.to_string());
        self
    }

    pub fn comment(mut self, comment: &str) -> Self {
        self.comment = Some(comment.to_string());
        self
    }

    /// Adds the fields that are set and non-empty as `new_*` keys.
    pub(crate) fn add_to(&self, payload: Payload) -> Payload {
        payload
            .add_if_some("new_name", non_empty(&self.name))
            .add_if_some("new_ttl", self.ttl)
            .add_if_some("new_rdata", non_empty(&self.rdata))
            .add_if_some("new_comment", non_empty(&self.comment))
    }
}
