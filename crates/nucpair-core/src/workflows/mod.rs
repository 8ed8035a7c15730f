//! # Workflows Module
//!
//! End-to-end entry points that take a structure with fitted base frames to
//! organized base pairs.
//!
//! - **Pair Finding** ([`find_pairs`]) - nucleotide preparation, best-pair
//!   matching, optional all-pairs enumeration and helix assembly, with a
//!   summary of the result.

pub mod find_pairs;
