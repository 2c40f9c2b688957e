//! # Simple blocking client for the BIND9 zone management API.
//!
//! Wraps the HTTP API of a BIND9 management server: logging in, and listing,
//! adding and removing zones and the records inside them. Responses are
//! returned as the JSON the server sent, without interpretation.
//!
//! Two revisions of the API are supported. [Client] talks to the current one,
//! which identifies records by their name, type and data. [legacy::Client]
//! talks to the older one, which identifies records by ID and authenticates
//! with a bearer token.
//!
//! ## Examples
//!
//! ```no_run
//! use bind9_api::Client;
//! use bind9_api::record::{Record, RecordKey, RecordUpdate};
//!
//! let client = Client::new("http://localhost:7650").unwrap();
//! client.login("admin", "password123").unwrap();
//!
//! let zones = client.get_zones().unwrap();
//! println!("{zones:#}");
//!
//! let record = Record::new("www", "A", "192.0.2.1").ttl(3600);
//! client.add_record("example.com", &record).unwrap();
//!
//! let update = RecordUpdate::new().rdata("192.0.2.2");
//! client
//!     .update_record("example.com", &record.key(), Some(&update))
//!     .unwrap();
//!
//! let key = RecordKey::new("www", "A", "192.0.2.2");
//! client.delete_record("example.com", &key).unwrap();
//! ```

mod client;
mod errors;
pub mod legacy;
mod payload;
pub mod record;
mod transport;

pub use client::*;
pub use errors::*;
pub(crate) use payload::*;
pub use transport::REQUEST_TIMEOUT;
