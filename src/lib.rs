//! # feltmap - Felt maps from tabular data
//!
//! A small client for the Felt mapping service: create a map, upload a
//! table to it as a layer through a presigned upload, read the map's
//! elements back and embed the result as an iframe.
//!
//! ## Architecture
//!
//! - **API**: `MapClient` and the HTTP transport behind it
//! - **Table**: In-memory rows and their CSV export
//! - **Progress**: Upload progress reporting
//! - **Embed**: Iframe HTML rendering
//! - **Config**: Configuration management

pub mod api;
pub mod config;
pub mod embed;
pub mod error;
pub mod progress;
pub mod table;

pub use api::{MapClient, MapClientBuilder, MapSession};
pub use config::Config;
pub use embed::EmbedHtml;
pub use error::{Error, Result};
pub use progress::{ProgressSink, UploadStage};
pub use table::Table;
