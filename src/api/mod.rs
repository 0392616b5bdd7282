//! Felt API integration.
//!
//! This module provides the map client and the pieces it is built from:
//! endpoint resolution, wire types, payload staging and the HTTP transport.

mod client;
mod endpoints;
mod models;
mod staging;
mod transport;

pub use client::{MapClient, MapClientBuilder};
pub use endpoints::Endpoints;
pub use models::{MapSession, embed_url_for};
pub use staging::{StagedCsv, StagingMode};
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Transport, UploadRequest};
