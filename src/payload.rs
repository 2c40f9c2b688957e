use serde_json::{Map as JsonMap, Value as JsonValue};

/// JSON object body sent to the API.
#[derive(Debug, Default)]
pub(crate) struct Payload {
    payload: JsonMap<String, JsonValue>,
}

impl Payload {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Adds the given key-value pair.
    pub(crate) fn add<T: Into<JsonValue>>(mut self, key: &str, value: T) -> Self {
        self.payload.insert(key.to_string(), value.into());
        self
    }

    /// In the case that `value` is some, adds the key-value pair.
    pub(crate) fn add_if_some<T: Into<JsonValue>>(mut self, key: &str, value: Option<T>) -> Self {
        if let Some(value) = value {
            self.payload.insert(key.to_string(), value.into());
        }
        self
    }
}

impl From<Payload> for JsonValue {
    fn from(value: Payload) -> Self {
        JsonValue::Object(value.payload)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn skips_absent_values() {
        let payload = Payload::new()
            .add("zone", "example.com")
            .add_if_some("ttl", Some(300))
            .add_if_some::<&str>("comment", None);

        assert_eq!(
            JsonValue::from(payload),
            json!({"zone": "example.com", "ttl": 300})
        );
    }

    #[test]
    fn later_values_overwrite() {
        let payload = Payload::new().add("name", "www").add("name", "mail");

        assert_eq!(JsonValue::from(payload), json!({"name": "mail"}));
    }
}
