//! Ecopuls Client - Headless API client for the Ecopuls storefront backend.
//!
//! Formalizes the storefront's client-side orchestration pattern:
//! authenticated CRUD against remote resource collections, with a persisted
//! session and a local cache per collection that mirrors confirmed server
//! responses.
//!
//! # Architecture
//!
//! - [`config`] - Environment-based configuration
//! - [`error`] - The error taxonomy shared by all calls
//! - [`session`] - Process-wide session store with persistence and
//!   subscribe/publish change notification
//! - [`http`] - Thin `reqwest` wrapper attaching bearer tokens and decoding
//!   error bodies defensively
//! - [`auth`] - Login/registration state machine
//! - [`resources`] - One controller per backend collection (products,
//!   feedback, custom requests, users)
//!
//! Local collections are caches, never sources of truth: every listing is a
//! fresh fetch, and mutations touch the cache only after the server has
//! confirmed them.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod auth;
pub mod config;
pub mod error;
pub mod http;
pub mod resources;
pub mod session;

pub use auth::{AuthError, AuthFlow, AuthState};
pub use config::{ApiConfig, ConfigError};
pub use error::ApiError;
pub use http::ApiClient;
pub use session::SessionStore;
