//! Core domain concepts shared across all subdomains.
//!
//! - [`error::DomainError`]: validation errors for new decisions

pub mod error;
