//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! One logical fetch:
//!     → ladder.rs (which strategy/pass is next, when to pause, when to give up)
//!     → timeouts.rs (enforce the per-attempt deadline)
//! ```
//!
//! # Design Decisions
//! - Timeouts are non-negotiable; every attempt has a deadline
//! - Only transport failures are retried; HTTP statuses are final
//! - Alternate relays are tried before repeating the whole ladder

pub mod ladder;
pub mod timeouts;
