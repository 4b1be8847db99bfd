#![deny(trivial_casts, trivial_numeric_casts, unused_import_braces)]
//! # ip-api Client
//!
//! This library queries the [ip-api.com](https://ip-api.com) geolocation
//! service over its JSON endpoint.
//!
//! ## Features
//!
//! - **`default-tls`** (default: enabled): HTTPS through the platform TLS
//!   library, needed for the pro endpoint
//! - **`rustls-tls`** (default: disabled): HTTPS through rustls instead
//!
//! ## Endpoints
//!
//! A client without an API key talks to the free endpoint over plain HTTP.
//! With a key it talks to the pro endpoint over HTTPS and sends the key as
//! the `apiKey` query parameter.
//!
//! ## Field Selection
//!
//! The API returns only the attributes named in the `fields` parameter.
//! [`Client::set_fields`] accepts field names and encodes them either as a
//! comma list or as the numeric bitmask the API also understands. See
//! [`Field`] for the registry.
//!
//! ## Quick Start
//!
//! ```no_run
//! use ipapi::Client;
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::new(None);
//!     let response = client.query(&CancellationToken::new(), "8.8.8.8").await?;
//!
//!     if response.is_success() {
//!         println!("Country: {}", response.country.as_deref().unwrap_or("Unknown"));
//!     } else {
//!         println!("Lookup failed: {:?}", response.message);
//!     }
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod fields;
mod response;

// Re-export public types
pub use client::{Client, DEFAULT_TIMEOUT};
pub use error::IpApiError;
pub use fields::{encode_names, encode_numeric, field_allowed, Field, DEFAULT_FIELDS};
pub use response::{Response, Status};
