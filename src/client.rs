use log::{debug, warn};
use reqwest::Method;
use serde_json::Value as JsonValue;
use url::Url;

use crate::record::{Record, RecordKey, RecordUpdate};
use crate::transport::Transport;
use crate::{ApiError, AuthError, ClientBuilderError, ClientError, Payload, legacy};

/// Builder for a [Client] or a [legacy::Client].
#[derive(Default)]
pub struct ClientBuilder {
    base_url: Option<String>,
    debug_mode: bool,
    username: Option<String>,
    password: Option<String>,
}

impl ClientBuilder {
    fn new() -> Self {
        Self::default()
    }

    /// Sets the base URL of the API server, e.g. `http://localhost:9501`.
    ///
    /// A trailing slash is ignored.
    pub fn base_url(mut self, base_url: &str) -> Self {
        self.base_url = Some(base_url.to_string());
        self
    }

    /// Enables debug mode, in which the username and password are sent as
    /// HTTP Basic credentials on every request.
    pub fn debug_mode(mut self, debug_mode: bool) -> Self {
        self.debug_mode = debug_mode;
        self
    }

    pub fn username(mut self, username: &str) -> Self {
        self.username = Some(username.to_string());
        self
    }

    pub fn password(mut self, password: &str) -> Self {
        self.password = Some(password.to_string());
        self
    }

    /// In the case that both are Some, sets the username and password.
    pub fn credentials_if_some(mut self, username: Option<&str>, password: Option<&str>) -> Self {
        if let (Some(username), Some(password)) = (username, password) {
            self.username = Some(username.to_string());
            self.password = Some(password.to_string());
        }
        self
    }

    fn transport(self) -> Result<Transport, ClientBuilderError> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientBuilderError::MissingField("base_url".to_string()))?;

        let basic_auth = match (self.debug_mode, self.username, self.password) {
            (true, Some(username), Some(password))
                if !username.is_empty() && !password.is_empty() =>
            {
                Some((username, password))
            }
            _ => None,
        };

        Transport::new(&base_url, basic_auth)
    }

    /// Builds a [Client] from the builder.
    ///
    /// # Errors
    /// - `MissingField` if no base URL was set.
    /// - `UrlParse` or `CannotBeABase` if the base URL isn't usable.
    /// - `Reqwest` if the HTTP client can't be initialized.
    pub fn build(self) -> Result<Client, ClientBuilderError> {
        Ok(Client {
            transport: self.transport()?,
        })
    }

    /// Builds a [legacy::Client] from the builder.
    ///
    /// Fails in the same cases as [ClientBuilder::build].
    pub fn build_legacy(self) -> Result<legacy::Client, ClientBuilderError> {
        Ok(legacy::Client::new(self.transport()?))
    }
}

/// API client that identifies records by their name, type and data.
pub struct Client {
    transport: Transport,
}

impl Client {
    /// Creates a new Client for the given base URL, without credentials.
    pub fn new(base_url: &str) -> Result<Self, ClientBuilderError> {
        Self::builder().base_url(base_url).build()
    }

    /// Returns a builder for a Client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// The normalized base URL requests are made against.
    pub fn base_url(&self) -> &Url {
        self.transport.base_url()
    }

    fn request(
        &self,
        method: Method,
        path: &[&str],
        body: Option<JsonValue>,
    ) -> Result<JsonValue, ClientError> {
        Ok(self.transport.send(method, path, body, None)?)
    }

    /// Logs in with the given credentials.
    ///
    /// The session is kept by the server; the response body is not used, so a
    /// success response that isn't JSON still counts as logged in.
    pub fn login(&self, username: &str, password: &str) -> Result<(), ClientError> {
        let payload = Payload::new()
            .add("username", username)
            .add("password", password);

        match self
            .transport
            .send(Method::POST, &["login"], Some(payload.into()), None)
        {
            Ok(_) | Err(ApiError::Decode { .. }) => {
                debug!("logged in as {username:?}");
                Ok(())
            }
            Err(e) => {
                warn!("login as {username:?} failed");
                Err(AuthError::from(e).into())
            }
        }
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

    pub fn add_record(&self, zone: &str, record: &Record) -> Result<JsonValue, ClientError> {
        self.request(
            Method::POST,
            &["zones", zone, "records"],
            Some(record.into()),
        )
    }

    /// Updates the record identified by `current` with the values set in `new`.
    ///
    /// # Errors
    ///
    /// Will return a `Validation` error, without contacting the server, in the
    /// case of `current` having an empty name, type or rdata.
    pub fn update_record(
        &self,
        zone: &str,
        current: &RecordKey,
        new: Option<&RecordUpdate>,
    ) -> Result<JsonValue, ClientError> {
        current.validate()?;

        let mut payload = current.add_to(Payload::new(), "current_");
        if let Some(new) = new {
            payload = new.add_to(payload);
        }

        self.request(
            Method::PUT,
            &["zones", zone, "records", "update"],
            Some(payload.into()),
        )
    }

    /// Deletes the record identified by `record`.
    ///
    /// # Errors
    ///
    /// Will return a `Validation` error, without contacting the server, in the
    /// case of `record` having an empty name, type or rdata.
    pub fn delete_record(&self, zone: &str, record: &RecordKey) -> Result<JsonValue, ClientError> {
        record.validate()?;

        let payload = record.add_to(Payload::new(), "");
        self.request(
            Method::DELETE,
            &["zones", zone, "records", "delete"],
            Some(payload.into()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_requires_base_url() {
        assert!(matches!(
            Client::builder().build(),
            Err(ClientBuilderError::MissingField(field)) if field == "base_url"
        ));
    }

    fn basic_auth(builder: ClientBuilder) -> Option<(String, String)> {
        builder
            .base_url("http://localhost:9501")
            .transport()
            .unwrap()
            .basic_auth()
            .map(|(u, p)| (u.to_string(), p.to_string()))
    }

    #[test]
    fn basic_auth_only_in_debug_mode() {
        assert_eq!(
            basic_auth(Client::builder().username("admin").password("secret")),
            None
        );
        assert_eq!(
            basic_auth(
                Client::builder()
                    .debug_mode(true)
                    .credentials_if_some(Some("admin"), None)
            ),
            None
        );
        assert_eq!(
            basic_auth(
                Client::builder()
                    .debug_mode(true)
                    .username("admin")
                    .password("")
            ),
            None
        );
        assert_eq!(
            basic_auth(
                Client::builder()
                    .debug_mode(true)
                    .credentials_if_some(Some("admin"), Some("secret"))
            ),
            Some(("admin".to_string(), "secret".to_string()))
        );
    }

    #[test]
    fn new_normalizes_base_url() {
        let client = Client::new("http://localhost:9501/").unwrap();
        assert_eq!(client.base_url().as_str(), "http://localhost:9501/");

        let client = Client::new("http://localhost:9501/api/").unwrap();
        assert_eq!(client.base_url().as_str(), "http://localhost:9501/api");
    }
}
