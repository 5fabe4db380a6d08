//! GlowApp HTTP module providing the request gateway
//!
//! [`client::GlowClient`] wraps one request/response cycle against the
//! GlowApp REST API: it attaches the persisted bearer credential, sends a
//! JSON body, decodes the response envelope, and reports the server message
//! through the configured notifier. Failures never escape as errors; they
//! come back as an [`ApiResponse`] with `error` set.

pub mod client;
pub mod types;

pub use client::{GlowClient, GlowClientBuilder};
pub use types::{ApiRequest, ApiResponse, Method, TRANSPORT_FAILURE_MESSAGE};
