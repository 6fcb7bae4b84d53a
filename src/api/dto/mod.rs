//! Data Transfer Objects for API requests and responses.
//!
//! Request parameters arrive as query strings and are checked with
//! validator; responses are serialized with Serde.

pub mod health;
pub mod link;
