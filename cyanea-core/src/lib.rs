//! Shared primitives, traits, and utilities for the Cyanea bioinformatics ecosystem.
//!
//! `cyanea-core` provides the foundation that the other Cyanea crates build on:
//!
//! - **Error types**: [`CyaneaError`] and [`Result`] for structured error handling
//! - **Traits**: Core abstractions like [`Sequence`], [`Scored`], [`Summarizable`]
//! - **Bitsets**: [`BitSet`], a fixed-size mutable bitset for visited/used marks
//! - **Run control**: [`CancellationToken`], [`RunControl`] and [`ProgressTracker`]
//!   for long-running operations

pub mod bitvec;
pub mod control;
pub mod error;
pub mod traits;

pub use bitvec::BitSet;
pub use control::{CancellationToken, ProgressTracker, RunControl, CANCEL_CHECK_INTERVAL};
pub use error::{CyaneaError, Result};
pub use traits::*;
