//! Type-safe configuration types for umdlint.
//!
//! This module contains newtype wrappers and validation types that enforce
//! constraints on configuration values at deserialization time.

mod positive_usize;

pub use positive_usize::{PositiveUsize, PositiveUsizeError, deserialize_lenient_positive};
