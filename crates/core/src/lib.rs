//! Ecopuls Core - Shared types library.
//!
//! This crate provides the common types used across the Ecopuls headless
//! client components:
//! - `client` - HTTP client, session store, and resource controllers
//! - `cli` - Command-line admin tools
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. All entities
//! here are server-owned; the client holds disposable copies deserialized
//! from the backend's JSON wire format (camelCase fields, Mongo-style `_id`
//! identifiers).
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, entities, and the session profile

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
