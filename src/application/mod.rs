//! Application layer services implementing business logic.
//!
//! Services consume repository traits and the cache, and give handlers and
//! the admin CLI one place where the lookaside rules live.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - name resolution and link mutations

pub mod services;
