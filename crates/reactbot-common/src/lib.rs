//! # ReactBot Common
//!
//! Shared types and utilities for the ReactBot workspace.
//!
//! This crate provides the id newtypes, the shared error type and the
//! small string helpers used across all other crates.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod types;
pub mod utils;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use types::*;
pub use utils::*;
