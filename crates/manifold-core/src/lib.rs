//! # manifold-core
//!
//! Core crate for Manifold. Contains the priority type, trait seams,
//! configuration schemas, the module data model, and the unified error
//! system.
//!
//! This crate has **no** internal dependencies on other Manifold crates.

pub mod config;
pub mod error;
pub mod priority;
pub mod result;
pub mod traits;
pub mod types;

pub use error::RuntimeError;
pub use priority::Priority;
pub use result::RuntimeResult;
