//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`]: chat completion models and their provider quirks
//! - [`question::Question`]: a validated, non-empty question
//! - [`document::Document`]: a loaded source document
//! - [`error::DomainError`]: domain-level errors

pub mod document;
pub mod error;
pub mod model;
pub mod question;
