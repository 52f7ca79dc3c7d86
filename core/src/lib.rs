//! Synchronous client core for a REST resource service exposing users,
//! posts, comments, and todos.
//!
//! # Overview
//! Supports CRUD on the users collection and two read-only aggregation
//! workflows: persisting the comments of a user's most recent post, and
//! filtering a user's open todos.
//!
//! # Design
//! - Requests and responses are plain data (`http`); executing the
//!   round-trip is delegated to an injected `Transport`, so the client's
//!   JSON-mapping and status-handling contract is testable without a
//!   network.
//! - The full operation set sits behind the `ResourceApi` trait;
//!   `ApiClient` is the blocking production implementation, explicitly
//!   constructed with a base URL and transport rather than shared global
//!   state.
//! - One success predicate (`http::is_success`, status in [200,300))
//!   drives every outcome branch.
//! - Workflows consume the trait and return values; reporting is left to
//!   the caller.

pub mod client;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;
pub mod workflows;

pub use client::{ApiClient, ResourceApi};
pub use error::ApiError;
pub use http::{is_success, HttpMethod, HttpRequest, HttpResponse};
pub use transport::{Transport, UreqTransport, DEFAULT_TIMEOUT};
pub use types::{Comment, Post, Todo, User};
pub use workflows::{open_todos, save_latest_post_comments, CommentsError, SavedComments};
