use super::ids::ResidueId;
use nalgebra::Point3;

/// Represents the part of a nucleotide an atom belongs to.
///
/// The pairing algorithms treat base atoms differently from backbone atoms:
/// only base-to-base hydrogen bonds count towards the minimum hydrogen bond
/// requirement of a pair, while phosphate and sugar atoms only take part in
/// strand linkage checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum AtomRole {
    /// Atom of the nitrogenous base (e.g., N1, C2, O6).
    Base,
    /// Sugar atom, conventionally primed (e.g., C1', O4', O2').
    Sugar,
    /// Phosphate group atom (e.g., P, OP1, O1P).
    Phosphate,
    /// Unknown or unclassified atom role.
    #[default]
    Other,
}

const PHOSPHATE_ATOM_NAMES: [&str; 7] = ["P", "OP1", "OP2", "OP3", "O1P", "O2P", "O3P"];

impl AtomRole {
    /// Classifies an atom by its PDB-style name.
    ///
    /// Names containing a prime (`'`, or the legacy `*`) are sugar atoms, the
    /// phosphate group is recognized by name, and anything else starting with a
    /// letter is considered part of the base.
    pub fn from_atom_name(name: &str) -> Self {
        let name = name.trim();
        if name.is_empty() {
            return AtomRole::Other;
        }
        if PHOSPHATE_ATOM_NAMES.contains(&name) {
            AtomRole::Phosphate
        } else if name.contains('\'') || name.contains('*') {
            AtomRole::Sugar
        } else if name.starts_with(|c: char| c.is_ascii_alphabetic()) {
            AtomRole::Base
        } else {
            AtomRole::Other
        }
    }
}

/// An atom of a nucleic-acid structure.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The name of the atom (e.g., "N1", "O3'", "P").
    pub name: String,
    /// The ID of the parent residue this atom belongs to.
    pub residue_id: ResidueId,
    /// The part of the nucleotide the atom belongs to, derived from its name.
    pub role: AtomRole,
    /// The 3D coordinates of the atom in Angstroms.
    pub position: Point3<f64>,
}

impl Atom {
    /// Creates a new `Atom`, deriving its role from the name.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the atom.
    /// * `residue_id` - The ID of the residue this atom belongs to.
    /// * `position` - The 3D coordinates of the atom.
    pub fn new(name: &str, residue_id: ResidueId, position: Point3<f64>) -> Self {
        let name = name.trim();
        Self {
            name: name.to_string(),
            residue_id,
            role: AtomRole::from_atom_name(name),
            position,
        }
    }

    /// Returns the chemical element symbol implied by the atom name.
    ///
    /// Nucleic-acid atom names start with their element letter once any leading
    /// digits are stripped (e.g., "1H2'" is a hydrogen).
    pub fn element(&self) -> Option<char> {
        self.name
            .chars()
            .find(|c| c.is_ascii_alphabetic())
            .map(|c| c.to_ascii_uppercase())
    }
}
