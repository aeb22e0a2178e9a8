//! GitHub API client and types.
//!
//! This module provides the interface for communicating with the GitHub REST API.

pub mod client;
pub mod error;
pub mod issues;
pub mod transport;
pub mod types;

pub use client::{ApiClient, ApiResponse};
pub use error::{ApiError, ErrorKind};
pub use issues::IssuesService;
pub use transport::{BearerAuth, Transport};
pub use types::{Issue, IssueRequest, User};
