//! Day-view layout for overlapping events.
//!
//! # Responsibility
//! - Assign side-by-side columns so overlapping events never collide.
//!
//! # Invariants
//! - Overlap is strict `[start, end)` intersection.
//! - Layout is recomputed per render and never stored.

pub mod overlap;
