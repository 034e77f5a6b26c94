//! # ReactBot Core
//!
//! The command dispatch pipeline and its parsing helpers.
//!
//! This crate receives inbound gateway messages, matches the configured
//! prefix against the command registry, applies the ownership, permission,
//! cooldown and argument gates, executes the matched command body, and
//! maps failures to user-visible responses. The gateway client itself is
//! reached only through the [`Transport`] and [`EntityCache`] traits.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod chunk;
pub mod client;
pub mod command;
pub mod cooldown;
pub mod dispatch;
pub mod error;
pub mod parser;
pub mod registry;
pub mod tasks;
pub mod transport;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use chunk::*;
pub use client::*;
pub use command::*;
pub use cooldown::*;
pub use dispatch::*;
pub use error::*;
pub use registry::*;
pub use tasks::*;
pub use transport::*;
