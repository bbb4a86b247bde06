//! codeship-queue - one build per branch at a time on Codeship
//!
//! Codeship runs builds of the same branch concurrently. Invoked from inside
//! a build, this crate finds every running build of the same project and
//! branch, orders them by allocation time and waits until all older ones
//! have finished.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`cli`] - Command-line interface parsing and output formatting
//! - [`core`] - Queue building, ordering and the wait loop (no HTTP)
//! - [`provider`] - Codeship API client
//! - [`config`] - Configuration and constants
//! - [`error`] - Error types and handling

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod provider;

#[cfg(test)]
pub mod test_utils;
