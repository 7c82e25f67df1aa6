//! # Blog Core
//!
//! The domain layer of the blog API.
//! Entities, repository ports and errors live here with no infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;

pub use error::RepoError;
