//! # ReactBot
//!
//! Discord bot tracking reaction leaderboards, built around a prefix
//! command dispatch pipeline.
//!
//! This is the main binary crate: it wires serenity's gateway client to
//! the dispatcher in `reactbot-core` and owns the application lifecycle.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod adapter;
pub mod bot;
pub mod error;

pub use bot::*;
pub use error::*;
