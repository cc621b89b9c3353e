//! Shared test utilities used across voxclust crates.
//!
//! [`tracing::RecordingLayer`] captures spans and events so suites can assert
//! instrumentation, and [`property::ProptestRunProfile`] lets CI tune the
//! property suites through environment variables.

pub mod property;
pub mod tracing;
