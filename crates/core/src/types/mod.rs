//! Shared domain types for the Ecopuls backend's wire format.

mod custom_request;
mod feedback;
mod id;
mod product;
mod session;
mod user;

pub use custom_request::CustomRequest;
pub use feedback::FeedbackEntry;
pub use id::{CustomRequestId, FeedbackId, ProductId, UserId};
pub use product::{Product, Variant};
pub use session::{Session, UserProfile};
pub use user::User;
