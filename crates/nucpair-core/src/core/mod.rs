//! # Core Module
//!
//! Stateless building blocks for nucleic-acid base-pair analysis.
//!
//! ## Overview
//!
//! The core module holds the structure representation the pairing engine reads
//! and the pure numeric and chemical helpers it is computed from. Nothing here
//! carries pairing state; that lives in [`crate::engine`].
//!
//! ## Architecture
//!
//! - **Structure Representation** ([`models`]) - Atoms, residues, chains, base frames and the system container
//! - **Utilities** ([`utils`]) - Base chemistry tables, vector geometry, polygon overlap and step parameters
//!
//! ## Conventions
//!
//! - Coordinates are in angstroms and angles in degrees unless a function says otherwise.
//! - A base frame's z-axis is the base normal; its y-axis points to the base's own backbone.

pub mod models;
pub mod utils;
