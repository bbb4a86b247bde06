//! Core queue logic
//!
//! Everything here reaches the provider only through the
//! [`directory::BuildDirectory`] trait; HTTP lives in [`crate::provider`].
//!
//! # Submodules
//!
//! - [`build`] - Build snapshots and statuses
//! - [`directory`] - Provider read interface
//! - [`queue`] - Watch-set construction from paginated listings
//! - [`ordering`] - Oldest-allocation-first ordering
//! - [`sequencer`] - Cancellable per-predecessor poll loop
//! - [`turn`] - End-to-end turn coordination

pub mod build;
pub mod directory;
pub mod ordering;
pub mod queue;
pub mod sequencer;
pub mod turn;

pub use build::{Build, BuildStatus};
pub use directory::{BuildDirectory, BuildPage};
pub use sequencer::{WaitEvent, WaitObserver, WaitOutcome, WaitSequencer};
pub use turn::{QueueSnapshot, TurnReport, TurnRequest};
