//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx with bound
//! parameters and `FromRow` mapping.
//!
//! # Repositories
//!
//! - [`PgLinkRepository`] - Link storage, mutation and hit metrics

pub mod pg_link_repository;

pub use pg_link_repository::PgLinkRepository;
