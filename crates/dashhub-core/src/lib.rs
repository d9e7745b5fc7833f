//! # dashhub-core
//!
//! Core crate for the DashHub browse-tree state engine. Contains typed
//! identifiers, the item/collection data model, pagination types,
//! configuration schemas, the unified error system, and the async traits
//! implemented by the backend listing and mutation collaborators.
//!
//! This crate has **no** internal dependencies on other DashHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
