//! Helpers shared by services, handlers and the admin CLI.
//!
//! - [`base62`] - reversible id <-> name codec
//! - [`url_validator`] - destination URL checks and canonicalization
//! - [`link_name`] - rules for explicitly chosen names

pub mod base62;
pub mod link_name;
pub mod url_validator;
