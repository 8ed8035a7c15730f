//! # Engine Module
//!
//! The pairing engine: everything between a structure with fitted base frames
//! and an organized list of base pairs.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Distance and angle windows, limits and TOML loading
//! - **Preparation** ([`nucleotide`]) - Read-only nucleotide views extracted from a system
//! - **Tasks** ([`tasks`]) - Hydrogen-bond detection, pair validation, matching and enumeration
//! - **Pairs** ([`pair`]) - The accepted base pair record
//! - **Helix Assembly** ([`helix`]) - Neighbor contexts, segments, strand direction and checks
//! - **Progress Monitoring** ([`progress`]) - Optional progress callbacks
//! - **Error Handling** ([`error`]) - Engine error types
//!
//! Pair validation and matching are pure functions of the prepared nucleotides
//! and the configuration; with the `parallel` feature the per-candidate
//! evaluations run on rayon's thread pool without changing any result.

pub mod config;
pub mod error;
pub mod helix;
pub mod nucleotide;
pub mod pair;
pub mod progress;
pub mod tasks;
