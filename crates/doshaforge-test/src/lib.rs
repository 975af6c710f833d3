//! Shared test fixtures for DoshaForge crates.
//!
//! This crate provides reference rule tables and feature bundles for tests.
//! It does NOT depend on `doshaforge-scoring`, so the scoring crate can use
//! it as a dev-dependency.
//!
//! - [`tables`] - Reference and single-feature rule tables
//! - [`bundles`] - Bundles that land in one band of the reference table
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! doshaforge-test = { workspace = true }
//! ```

pub mod bundles;
pub mod tables;

pub use tables::{tri_band_table, TRI_BAND_JSON};
