//! # Core Models Module
//!
//! Data structures describing a nucleic-acid structure as the pairing engine sees it.
//!
//! ## Overview
//!
//! The models are populated by an external collaborator (a structure parser plus a
//! base-frame fitter) before pair finding runs. Pair finding only reads them.
//!
//! - [`atom`] - Atom names, coordinates and their nucleotide role (base, sugar, phosphate)
//! - [`residue`] - Residues with base code, purine/pyrimidine class and fitted frame
//! - [`chain`] - Chain organization
//! - [`frame`] - Base reference frames (origin plus orthonormal axes)
//! - [`system`] - The complete structure with stable IDs and ordered residues
//! - [`ids`] - Unique identifier types for atoms, residues, and chains
//!
//! ## Usage
//!
//! ```ignore
//! use nucpair::core::models::{atom::Atom, chain::ChainType, system::MolecularSystem};
//!
//! let mut system = MolecularSystem::new();
//! let chain_id = system.add_chain('A', ChainType::DNA);
//! let residue_id = system.add_residue(chain_id, 1, None, "DA").unwrap();
//! system.add_atom_to_residue(residue_id, Atom::new("N1", residue_id, Point3::origin()));
//!
//! let residue = system.residue_mut(residue_id).unwrap();
//! residue.set_nucleotide('A', NucleotideClass::Purine);
//! residue.frame = Some(fitted_frame);
//! ```

pub mod atom;
pub mod chain;
pub mod frame;
pub mod ids;
pub mod residue;
pub mod system;
