use super::frame::ReferenceFrame;
use super::ids::{AtomId, ChainId};
use std::collections::HashMap;

/// Purine/pyrimidine classification of a nucleotide base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NucleotideClass {
    Purine,     // A, G, I and purine-derived modifications
    Pyrimidine, // C, T, U and pyrimidine-derived modifications
}

impl NucleotideClass {
    /// Name of the ring nitrogen bonded to C1' (N9 for purines, N1 for pyrimidines).
    pub fn glycosidic_atom(&self) -> &'static str {
        match self {
            NucleotideClass::Purine => "N9",
            NucleotideClass::Pyrimidine => "N1",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Residue {
    pub residue_number: isize,                    // Residue sequence number from source file
    pub insertion_code: Option<char>,             // PDB insertion code, if any
    pub name: String,                             // Residue name (e.g., "DA", "G", "PSU")
    pub chain_id: ChainId,                        // ID of the parent chain
    pub base_code: char, // One-letter base code; lowercase marks a modified base
    pub class: Option<NucleotideClass>, // None excludes the residue from pairing
    pub frame: Option<ReferenceFrame>,  // Fitted base reference frame
    pub(crate) atoms: Vec<AtomId>,      // Indices of atoms belonging to this residue
    atom_name_map: HashMap<String, AtomId>, // Map from atom name to its stable ID
}

impl Residue {
    pub(crate) fn new(
        residue_number: isize,
        insertion_code: Option<char>,
        name: &str,
        chain_id: ChainId,
    ) -> Self {
        Self {
            residue_number,
            insertion_code,
            name: name.to_string(),
            chain_id,
            base_code: '?',
            class: None,
            frame: None,
            atoms: Vec::new(),
            atom_name_map: HashMap::new(),
        }
    }

    pub(crate) fn add_atom(&mut self, atom_name: &str, atom_id: AtomId) {
        self.atoms.push(atom_id);
        self.atom_name_map.insert(atom_name.to_string(), atom_id);
    }

    pub fn atoms(&self) -> &[AtomId] {
        &self.atoms
    }

    pub fn get_atom_id_by_name(&self, name: &str) -> Option<AtomId> {
        self.atom_name_map.get(name).copied()
    }

    /// Marks the residue as a nucleotide with the given base code and class.
    pub fn set_nucleotide(&mut self, base_code: char, class: NucleotideClass) {
        self.base_code = base_code;
        self.class = Some(class);
    }

    pub fn is_nucleotide(&self) -> bool {
        self.class.is_some()
    }
}
