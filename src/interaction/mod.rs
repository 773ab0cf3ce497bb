//! Interaction controller and its supporting state
//!
//! This module contains:
//! - The marked set and click-order log
//! - A cancellable task scheduler on a virtual clock
//! - The click/revert state machine

/// Click/revert state machine
pub mod controller;
/// Marked-cell bitset and click-order log
pub mod marks;
/// Cancellable delayed tasks
pub mod scheduler;

pub use controller::{ClickOutcome, Controller, Phase, RevertEvent, RevertTiming};
