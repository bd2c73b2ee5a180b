//! Resource controllers: one per backend collection.
//!
//! Each controller coordinates list/create/update/delete against one
//! collection and keeps an in-memory copy that mirrors confirmed server
//! responses. The copy is a cache, not a source of truth: `list()` always
//! fetches, and mutations only touch the cache after the server acknowledges
//! them. There is no per-id in-flight exclusion - concurrent edits are
//! last-write-wins at the server.
//!
//! Deletion is gated by caller-side confirmation (the CLI prompts); the
//! controller contract starts after the caller has confirmed.

mod collection;
mod custom_requests;
mod feedback;
mod products;
mod users;

pub use collection::HasId;
pub use custom_requests::{CustomRequestController, NewCustomRequest};
pub use feedback::{FeedbackController, NewFeedback};
pub use products::{ImageSource, ProductController, ProductForm};
pub use users::UserController;
