use std::time::Duration;

use log::{debug, warn};
use reqwest::Method;
use serde_json::Value as JsonValue;
use url::Url;

use crate::{ApiError, ClientBuilderError};

/// Timeout applied to every request made by a client.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP plumbing shared by both client flavours.
pub(crate) struct Transport {
    base_url: Url,
    basic_auth: Option<(String, String)>,
    client: reqwest::blocking::Client,
}

impl Transport {
    pub(crate) fn new(
        base_url: &str,
        basic_auth: Option<(String, String)>,
    ) -> Result<Self, ClientBuilderError> {
        let base_url: Url = base_url.trim_end_matches('/').parse()?;
        if base_url.cannot_be_a_base() {
            return Err(ClientBuilderError::CannotBeABase(base_url.to_string()));
        }

        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            base_url,
            basic_auth,
            client,
        })
    }

    pub(crate) fn base_url(&self) -> &Url {
        &self.base_url
    }

    #[cfg(test)]
    pub(crate) fn basic_auth(&self) -> Option<(&str, &str)> {
        self.basic_auth
            .as_ref()
            .map(|(u, p)| (u.as_str(), p.as_str()))
    }

    /// Creates a [Url] from the base URL and the path segments.
    ///
    /// Segments are percent-encoded, so a zone name can never introduce extra
    /// path components.
    pub(crate) fn build_url(&self, path: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // `cannot_be_a_base` was ruled out in `new`.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(path);
        }
        url
    }

    /// Sends a request and decodes the JSON response body.
    ///
    /// An empty success body decodes to `null`.
    pub(crate) fn send(
        &self,
        method: Method,
        path: &[&str],
        body: Option<JsonValue>,
        bearer: Option<&str>,
    ) -> Result<JsonValue, ApiError> {
        let url = self.build_url(path);
        debug!("{method} {url}");

        let mut req = self.client.request(method, url);
        if let Some((username, password)) = &self.basic_auth {
            req = req.basic_auth(username, Some(password));
        }
        if let Some(token) = bearer {
            req = req.bearer_auth(token);
        }
        if let Some(body) = body {
            req = req.json(&body);
        }

        let resp = req.send()?;
        let status = resp.status();
        if !status.is_success() {
            let err = ApiError::from_response(resp);
            warn!("request failed: {err}");
            return Err(err);
        }

        let text = resp.text()?;
        debug!("{status}, {} bytes", text.len());
        decode(text)
    }
}

fn decode(body: String) -> Result<JsonValue, ApiError> {
    if body.trim().is_empty() {
        return Ok(JsonValue::Null);
    }
    serde_json::from_str(&body).map_err(|source| ApiError::Decode { body, source })
}
