//! gh-issues - a command-line client for GitHub issues.
//!
//! The [`api`] module holds the reusable client: an authenticated transport,
//! request building and decoding, and the typed issues service. The other
//! modules are the command-line application around it.

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod editor;
pub mod error;
pub mod logging;
