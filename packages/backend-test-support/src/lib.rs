//! Shared test support for the Kung workspace.
//!
//! Integration test binaries call [`logging::init`] from a `ctor` hook so every
//! test shares a single subscriber.

pub mod logging;
