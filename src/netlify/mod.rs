//! Netlify API interaction module
//!
//! This module provides the core functionality for talking to the Netlify
//! REST API: the HTTP client, URL construction, the site listing used as a
//! lookup source, and the process-wide site-id cache.
//!
//! # Module Structure
//!
//! - [`client`] - Main Netlify client for making API requests
//! - [`http`] - HTTP utilities for REST API calls
//! - [`sites`] - Site listing (the external lookup capability)
//! - [`lookup`] - Cached site-id enumeration
//!
//! # Example
//!
//! ```ignore
//! use crate::netlify::client::NetlifyClient;
//!
//! async fn example(client: &NetlifyClient) -> anyhow::Result<()> {
//!     let rows = client.get_rows(&client.site_url("abc123", "builds")).await?;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod http;
pub mod lookup;
pub mod sites;
