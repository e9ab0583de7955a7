//! In-memory trait implementations
//!
//! The [`mock`] module provides desktop implementations of every hardware
//! trait the controller consumes, good enough to run the full boot and
//! tick paths in tests.

pub mod mock;
