//! Stateless helpers shared by the pairing engine.
//!
//! - [`identifiers`] - Base chemistry tables: donor/acceptor roles, ring atoms, complementary pairs
//! - [`geometry`] - Vector angles, plane projection and polygon overlap
//! - [`step_params`] - Rigid-body step parameters between two reference frames

pub mod geometry;
pub mod identifiers;
pub mod step_params;
