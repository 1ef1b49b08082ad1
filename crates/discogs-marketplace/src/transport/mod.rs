//! Transport seam
//!
//! The marketplace client only builds URLs and decodes payloads; the
//! network round trip goes through a `Transport`. `HttpTransport` is the
//! reqwest implementation. Tests plug in in-memory transports.

pub mod auth;
pub mod rest;

pub use auth::*;
pub use rest::*;

use std::future::Future;

use serde_json::Value;

use crate::error::Result;

/// Performs a GET and returns the JSON body.
///
/// Implementations decide retries, timeouts, and auth; the client passes
/// their errors through untouched.
pub trait Transport: Send + Sync {
    fn get_raw(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> impl Future<Output = Result<Value>> + Send;
}
