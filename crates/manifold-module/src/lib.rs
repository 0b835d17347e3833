//! # manifold-module
//!
//! Module execution pipeline for Manifold. Provides:
//!
//! - The runner driving preprocess → execute → postprocess for one module
//! - Cooperative cancellation threaded through processor return values
//! - Built-in processors (default filling, required-input checking, output
//!   logging)

pub mod body;
pub mod processors;
pub mod runner;

pub use body::FnBody;
pub use processors::{
    CheckInputsPreprocessor, FillDefaultsPreprocessor, LogOutputsPostprocessor,
};
pub use runner::{ModuleRunner, RunReport};
