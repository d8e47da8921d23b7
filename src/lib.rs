//! Seedbeat: seed-driven drum pattern generation with sound compatibility scoring.

pub mod compat;
pub mod composition;
pub mod config;
pub mod error;
pub mod export;
pub mod library;
pub mod pattern;
pub mod profile;
pub mod seed;

pub use error::{Error, Result};
