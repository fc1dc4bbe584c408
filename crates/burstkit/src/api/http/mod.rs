//! HTTP implementation of [`BurstNodeService`](super::BurstNodeService).
//!
//! Implements the node's single-endpoint protocol over `reqwest`: every
//! operation is `GET`/`POST <base>/burst?requestType=<op>&...`, with the
//! error envelope checked before any entity decoding. Supports an optional
//! request rate limit and an atomically swappable connection.

mod client;
mod connection;
mod decode;
mod envelope;
mod params;

pub use client::HttpNodeService;
