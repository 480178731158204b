//! # Quill Core
//!
//! The domain layer of the Quill blogging platform.
//! This crate contains pure business logic with zero infrastructure dependencies:
//! the entities (posts, groups, comments, follows), the error taxonomy, the
//! ports infrastructure must implement, and the services that compose feeds
//! and enforce authorship rules.

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use error::DomainError;
