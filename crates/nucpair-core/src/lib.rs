//! # nucpair
//!
//! Base-pair detection, pair geometry classification and helix assembly for
//! nucleic-acid structures.
//!
//! ## Architecture
//!
//! The library keeps a three-layer layout:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`MolecularSystem`,
//!   `ReferenceFrame`), base identity tables, and the vector geometry shared by
//!   every algorithm (plane angles, polygon overlap, step parameters).
//!
//! - **[`engine`]: The Logic Core.** Hydrogen-bond detection with conflict
//!   resolution, pair validation and scoring, mutual best-pair matching, and
//!   helix assembly with strand-direction correction.
//!
//! - **[`workflows`]: The Public API.** [`workflows::find_pairs::run`] takes a
//!   structure whose nucleotides carry fitted base frames and returns the
//!   accepted pairs in helix order, their helix segments, and a summary.
//!
//! Parsing coordinate files and fitting base frames are left to the caller;
//! the library starts from a populated [`core::models::system::MolecularSystem`].

pub mod core;
pub mod engine;
pub mod workflows;

#[cfg(test)]
mod testing;
