//! HTTP plumbing for the Verify console: a client that protects mutating
//! requests with a CSRF token and answers session-status queries for the
//! navigation guard.

pub mod client;

pub use client::{ConsoleClient, ConsoleClientBuilder, error::ClientError};
