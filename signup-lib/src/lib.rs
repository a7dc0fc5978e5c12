//! Sign-up demo built on [`validatable`].
//!
//! A form model whose fields are [`validatable::Validatable`] values, the
//! JSON bodies of the two backend calls, an HTTP client for them, and a small
//! in-memory backend that answers them.

pub mod error;
pub mod form;
pub mod server;
pub mod wire;

mod client;
mod config;

pub use client::*;
pub use config::*;
pub use server::SignupServer;
