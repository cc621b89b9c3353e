//! Property-based tests for region growth.
//!
//! Checks every pool and seed order against a union-find oracle over the
//! threshold graph, and validates the structural guarantees of the
//! resulting partition on clouds of varied shape.

mod equivalence;
mod strategies;
mod structural;
mod types;
