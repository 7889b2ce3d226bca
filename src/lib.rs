//! # Samotpravil Client
//! Asynchronous wrapper around the Samotpravil transactional email REST API: send mail, query delivery status and statistics, pull non-delivery and FBL reports, and manage stop-lists and sender domains through a single [`Client`].
//!
//! ## Runtime requirements
//! Async-only; run inside a Tokio (v1) runtime. HTTP calls use `reqwest`. Building a client performs no network I/O.
//!
//! ## Errors
//! Malformed email addresses fail with [`Error::Validation`] before anything is sent. Non-200 responses and network failures become [`Error::Transport`], a 200 with a body that is not a JSON object becomes [`Error::Decode`], and a 200 whose `status` is not `ok` becomes [`Error::Api`] carrying the service's message. The crate-wide [`Result`] alias wraps these errors.
//!
//! ## Example
//! ```no_run
//! use samotpravil_client::{Client, Pagination, SendEmailOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), samotpravil_client::Error> {
//!     let client = Client::new("secret-key")?;
//!
//!     let options = SendEmailOptions::new()
//!         .name_from("Support")
//!         .x_track_id("order-1234");
//!     let sent = client
//!         .send_email("user@example.com", "Hello", "<p>Hi!</p>", "info@example.com", &options)
//!         .await?;
//!     println!("{:?}", sent.get("issue_id"));
//!
//!     let stats = client
//!         .get_statistics("2025-01-01", "2025-01-31", Pagination::default())
//!         .await?;
//!     println!("{}", serde_json::Value::from(stats));
//!     Ok(())
//! }
//! ```

mod client;
mod email;
mod error;
mod models;
mod request;

pub use client::{Client, ClientBuilder, DEFAULT_HOST};
pub use error::Error;
pub use models::{ApiResponse, Pagination, SendEmailOptions, StatusQuery};

/// Result type alias for Samotpravil operations.
///
/// This is equivalent to `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
