//! Diagnostic types for the front end.
//!
//! This module defines the structured diagnostics raised while parsing:
//!
//! - Error structures with source position information
//! - One variant per kind of parse failure
//! - Canonical message rendering and human-oriented tips

pub mod errors;
