//! Client for the older revision of the API.
//!
//! This revision identifies records by an opaque ID and authenticates with a
//! bearer token obtained from `/login`. Its record endpoints are not
//! compatible with those of [crate::Client].
//!
//! Record bodies are sent as given: only the fields set on a [RecordFields]
//! are included, and the record type is not uppercased.

use log::{debug, warn};
use reqwest::Method;
use serde::Deserialize;
use serde_json::{Map as JsonMap, Value as JsonValue};
use url::Url;

use crate::record::Record;
use crate::transport::Transport;
use crate::{AuthError, ClientBuilderError, ClientError, Payload};

/// Fields of a record to create, or to change on an existing record.
///
/// Fields left unset are not sent, so an update only touches what is set.
///
/// # Examples
///
/// ```
/// use bind9_api::legacy::RecordFields;
/// use serde_json::{Value, json};
///
/// let fields = RecordFields::new().ttl(60);
/// assert_eq!(Value::from(&fields), json!({"ttl": 60}));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordFields {
    pub name: Option<String>,
    pub type_: Option<String>,
    pub ttl: Option<u32>,
    pub rdata: Option<String>,
    pub comment: Option<String>,
    /// Any other fields the server accepts.
    pub extra: JsonMap<String, JsonValue>,
}

impl RecordFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn type_(mut self, type_: &str) -> Self {
        self.type_ = Some(type_.to_string());
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

    /// Adds a field with no dedicated setter. Named fields take precedence.
    pub fn field<T: Into<JsonValue>>(mut self, key: &str, value: T) -> Self {
        self.extra.insert(key.to_string(), value.into());
        self
    }
}

impl From<&RecordFields> for JsonValue {
    fn from(value: &RecordFields) -> Self {
        let payload = value
            .extra
            .iter()
            .fold(Payload::new(), |payload, (k, v)| payload.add(k, v.clone()));

        payload
            .add_if_some("name", value.name.as_deref())
            .add_if_some("type", value.type_.as_deref())
            .add_if_some("ttl", value.ttl)
            .add_if_some("rdata", value.rdata.as_deref())
            .add_if_some("comment", value.comment.as_deref())
            .into()
    }
}

impl From<&Record> for RecordFields {
    fn from(value: &Record) -> Self {
        Self {
            name: Some(value.name.clone()),
            type_: Some(value.type_.clone()),
            ttl: value.ttl,
            rdata: Some(value.rdata.clone()),
            comment: value.comment.clone(),
            extra: JsonMap::new(),
        }
    }
}

/// Turns the login response's `token` into the string sent as bearer.
///
/// Scalars are accepted as-is; `null`, arrays and objects count as missing.
fn token_from(data: JsonValue) -> Option<String> {
    #[derive(Deserialize)]
    struct Response {
        token: Option<JsonValue>,
    }

    match Response::deserialize(data).ok()?.token? {
        JsonValue::String(token) => Some(token),
        JsonValue::Number(token) => Some(token.to_string()),
        JsonValue::Bool(token) => Some(token.to_string()),
        _ => None,
    }
}

/// API client that authenticates with a bearer token.
///
/// Build one with [crate::ClientBuilder::build_legacy].
pub struct Client {
    transport: Transport,
    token: Option<String>,
}

impl Client {
    pub(crate) fn new(transport: Transport) -> Self {
        Self {
            transport,
            token: None,
        }
    }

    /// Shorthand for a client with only a base URL set.
    pub fn with_base_url(base_url: &str) -> Result<Self, ClientBuilderError> {
        crate::Client::builder().base_url(base_url).build_legacy()
    }

    pub fn base_url(&self) -> &Url {
        self.transport.base_url()
    }

    /// The token attached to requests, if any.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Sets the token manually, skipping [Client::login].
    pub fn set_jwt_token(&mut self, token: &str) {
        self.token = Some(token.to_string());
    }

    fn request(
        &self,
        method: Method,
        path: &[&str],
        body: Option<JsonValue>,
    ) -> Result<JsonValue, ClientError> {
        let bearer = self.token.as_deref().filter(|t| !t.is_empty());
        Ok(self.transport.send(method, path, body, bearer)?)
    }

    /// Logs in with the given credentials and keeps the returned token.
    ///
    /// # Errors
    ///
    /// Will return an `Authentication` error if the server rejects the login,
    /// or if its response carries no `token`. The current token is kept in
    /// both cases.
    pub fn login(&mut self, username: &str, password: &str) -> Result<(), ClientError> {
        let payload = Payload::new()
            .add("username", username)
            .add("password", password);

        let data = self
            .transport
            .send(Method::POST, &["login"], Some(payload.into()), None)
            .map_err(|e| {
                warn!("login as {username:?} failed");
                AuthError::from(e)
            })?;

        let token = token_from(data).ok_or_else(|| {
            warn!("login as {username:?} returned no token");
            AuthError::MissingToken
        })?;

        debug!("logged in as {username:?}");
        self.token = Some(token);
        Ok(())
    }

    /// Lists all zones.
    pub fn get_zones(&self) -> Result<JsonValue, ClientError> {
        self.request(Method::GET, &["zones"], None)
    }

    pub fn add_zone(&self, zone: &str) -> Result<JsonValue, ClientError> {
        let payload = Payload::new().add("zone", zone);
        self.request(Method::POST, &["zones"], Some(payload.into()))
    }

    pub fn delete_zone(&self, zone: &str) -> Result<JsonValue, ClientError> {
        self.request(Method::DELETE, &["zones", zone], None)
    }

    /// Lists all records in `zone`.
    pub fn get_records(&self, zone: &str) -> Result<JsonValue, ClientError> {
        self.request(Method::GET, &["zones", zone, "records"], None)
    }

    pub fn add_record(&self, zone: &str, record: &RecordFields) -> Result<JsonValue, ClientError> {
        self.request(
            Method::POST,
            &["zones", zone, "records"],
            Some(record.into()),
        )
    }

    /// Changes the fields set in `record` on the record with the given ID.
    pub fn update_record(
        &self,
        zone: &str,
        record_id: &str,
        record: &RecordFields,
    ) -> Result<JsonValue, ClientError> {
        self.request(
            Method::PUT,
            &["zones", zone, "records", record_id],
            Some(record.into()),
        )
    }

    pub fn delete_record(&self, zone: &str, record_id: &str) -> Result<JsonValue, ClientError> {
        self.request(Method::DELETE, &["zones", zone, "records", record_id], None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    #[test]
    fn fields_only_include_what_is_set() {
        assert_eq!(JsonValue::from(&RecordFields::new()), json!({}));
        assert_eq!(
            JsonValue::from(&RecordFields::new().type_("mx").rdata("10 mail")),
            json!({"type": "mx", "rdata": "10 mail"})
        );
    }

    #[test]
    fn named_fields_override_extra() {
        let fields = RecordFields::new()
            .field("ttl", "ignored")
            .field("disabled", true)
            .ttl(60);

        assert_eq!(
            JsonValue::from(&fields),
            json!({"ttl": 60, "disabled": true})
        );
    }

    #[test]
    fn fields_from_record_keep_type_case() {
        let record = Record::new("www", "a", "192.0.2.1").ttl(300);

        assert_eq!(
            JsonValue::from(&RecordFields::from(&record)),
            json!({"name": "www", "type": "a", "ttl": 300, "rdata": "192.0.2.1"})
        );
    }

    #[test]
    fn scalar_tokens_are_accepted() {
        assert_eq!(token_from(json!({"token": "abc"})), Some("abc".to_string()));
        assert_eq!(token_from(json!({"token": 123})), Some("123".to_string()));
        assert_eq!(token_from(json!({"token": null})), None);
        assert_eq!(token_from(json!({"token": ["abc"]})), None);
        assert_eq!(token_from(json!({"message": "ok"})), None);
        assert_eq!(token_from(json!("abc")), None);
        assert_eq!(token_from(JsonValue::Null), None);
    }

    #[test]
    fn token_is_settable() {
        let mut client = Client::with_base_url("http://localhost:7650").unwrap();
        assert_eq!(client.token(), None);

        client.set_jwt_token("abc");
        assert_eq!(client.token(), Some("abc"));
    }
}
