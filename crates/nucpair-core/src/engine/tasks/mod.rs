//! Computational units of pair finding.
//!
//! Each task is a plain function over prepared nucleotides: hydrogen-bond
//! detection and pair validation work on two nucleotides, matching and
//! enumeration on the whole set.

pub mod all_pairs;
pub mod best_pair;
pub mod hydrogen_bonds;
pub mod pair_check;
