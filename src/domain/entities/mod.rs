//! Core domain entities.
//!
//! - [`Link`] - a stored `name -> url` mapping with usage metrics

pub mod link;

pub use link::Link;
