//! WebSocket chat application with an exchange-rate pipeline.
//!
//! This library provides server and client implementations for a
//! WebSocket-based chat application with broadcast functionality. Any
//! connected client can trigger an aggregation pipeline with the
//! `exchange <codes> <days>` chat command; the server fetches rates for
//! the requested date range from an upstream HTTP API, filters them to
//! the requested currencies and broadcasts the formatted result to every
//! connected client.

pub mod client;
pub mod common;
pub mod domain;
pub mod exchange;
pub mod server;
