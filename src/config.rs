//! Configuration loader and schema types.
//!
//! This module exposes the settings that tune volume stepping, the progress
//! frame, directory scanning and logging, plus helpers to load them from disk.

mod load;
mod schema;

pub use schema::*;

#[cfg(test)]
mod tests;
