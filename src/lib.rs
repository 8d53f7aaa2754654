//! A Discord bot that counts the thanks users give each other.
//!
//! The bot runs as an [interactions endpoint]: Discord POSTs every command invocation to it over
//! HTTP, signed with the application's key. The endpoint checks the signature, answers pings and
//! handles three commands:
//!
//! - `/thank <user>`, and the `Thank` entry of the user and message context menus, bump the
//!   counter of the thanked user and announce it publicly.
//! - `/my_thanks` replies with the invoking user's own count.
//!
//! Counters live behind the [`KeyValueStore`] trait, in memory or in a JSON file.
//!
//! The HTTP layer is deliberately thin. Everything from the raw body onwards goes through
//! [`InteractionDispatcher::handle`], which can be driven directly:
//!
//! ```rust,no_run
//! # async fn run() -> thanks_bot::Result<()> {
//! use std::sync::Arc;
//!
//! use thanks_bot::dispatch::InteractionDispatcher;
//! use thanks_bot::interactions_endpoint::Verifier;
//! use thanks_bot::store::MemoryStore;
//! use thanks_bot::thanks::ThanksLedger;
//!
//! let verifier = Verifier::from_hex("67c6bd767ca099e79efac9fcce4d2022a63bf7dea780e7f3d813f694c1597089")?;
//! let dispatcher = InteractionDispatcher::new(verifier, ThanksLedger::new(Arc::new(MemoryStore::new())));
//! thanks_bot::server::InteractionServer::bind("0.0.0.0:8787", dispatcher)?.run().await
//! # }
//! ```
//!
//! [interactions endpoint]: https://discord.com/developers/docs/interactions/receiving-and-responding#receiving-an-interaction
//! [`KeyValueStore`]: crate::store::KeyValueStore
//! [`InteractionDispatcher::handle`]: crate::dispatch::InteractionDispatcher::handle
#![forbid(unsafe_code)]
#![warn(
    unused,
    rust_2018_idioms,
    clippy::unwrap_used,
    clippy::clone_on_ref_ptr,
    clippy::non_ascii_literal,
    clippy::fallible_impl_from,
    clippy::let_underscore_must_use,
    clippy::format_push_string,
    clippy::pedantic
)]
#![allow(
    // Allowed as they are too pedantic
    clippy::module_name_repetitions,
    clippy::wildcard_imports,
    clippy::doc_markdown,
    clippy::missing_panics_doc
)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

#[macro_use]
mod internal;

pub mod builder;
pub mod commands;
pub mod config;
pub mod dispatch;
pub mod interactions_endpoint;
pub mod json;
pub mod model;
pub mod server;
pub mod store;
pub mod thanks;

mod error;

pub use crate::error::{Error, Result};

// Re-exported for implementors of `KeyValueStore`.
pub use async_trait::async_trait;
