use crate::core::models::atom::AtomRole;
use crate::core::models::frame::ReferenceFrame;
use crate::core::models::ids::ResidueId;
use crate::core::models::residue::NucleotideClass;
use crate::core::models::system::MolecularSystem;
use crate::core::utils::identifiers::{PURINE_RING_ATOMS, PYRIMIDINE_RING_ATOMS};
use crate::engine::config::HBondParams;
use nalgebra::Point3;
use std::fmt;
use tracing::{debug, info, instrument};

/// A heavy atom that may take part in a hydrogen bond.
#[derive(Debug, Clone, PartialEq)]
pub struct HBondAtom {
    pub name: String,
    pub position: Point3<f64>,
    pub role: AtomRole,
}

/// Read-only view of one pairable residue, extracted once before matching.
#[derive(Debug, Clone, PartialEq)]
pub struct Nucleotide {
    /// Position in the prepared set; the tie-breaking order of matching.
    pub index: usize,
    pub residue_id: ResidueId,
    pub base_code: char,
    pub class: NucleotideClass,
    pub frame: ReferenceFrame,
    /// N9 for purines, N1 for pyrimidines.
    pub glycosidic: Point3<f64>,
    pub hbond_atoms: Vec<HBondAtom>,
    /// Ring atoms in outline order; used for the overlap check.
    pub ring: Vec<Point3<f64>>,
    pub o3_prime: Option<Point3<f64>>,
    pub phosphorus: Option<Point3<f64>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exclusion {
    NotNucleotide,
    MissingFrame,
    MissingGlycosidicAtom(&'static str),
}

impl fmt::Display for Exclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Exclusion::NotNucleotide => write!(f, "not classified as a nucleotide"),
            Exclusion::MissingFrame => write!(f, "no fitted base frame"),
            Exclusion::MissingGlycosidicAtom(name) => write!(f, "missing glycosidic atom {}", name),
        }
    }
}

/// The nucleotides of a structure in residue order, with input deficiencies filtered out.
#[derive(Debug, Clone, Default)]
pub struct NucleotideSet {
    nucleotides: Vec<Nucleotide>,
    excluded: Vec<(ResidueId, Exclusion)>,
}

impl NucleotideSet {
    #[instrument(skip_all, name = "prepare_nucleotides")]
    pub fn prepare(system: &MolecularSystem, params: &HBondParams) -> Self {
        let mut set = Self::default();

        for (residue_id, _) in system.residues_iter() {
            match prepare_one(system, residue_id, set.nucleotides.len(), params) {
                Ok(nucleotide) => set.nucleotides.push(nucleotide),
                Err(reason) => {
                    debug!(
                        residue = %system.residue_label(residue_id),
                        %reason,
                        "Residue excluded from pairing."
                    );
                    set.excluded.push((residue_id, reason));
                }
            }
        }

        info!(
            nucleotides = set.nucleotides.len(),
            excluded = set.excluded.len(),
            "Prepared nucleotides for pairing."
        );
        set
    }

    pub fn from_nucleotides(nucleotides: Vec<Nucleotide>) -> Self {
        let nucleotides = nucleotides
            .into_iter()
            .enumerate()
            .map(|(index, mut n)| {
                n.index = index;
                n
            })
            .collect();
        Self {
            nucleotides,
            excluded: Vec::new(),
        }
    }

    pub fn as_slice(&self) -> &[Nucleotide] {
        &self.nucleotides
    }

    pub fn len(&self) -> usize {
        self.nucleotides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nucleotides.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Nucleotide> {
        self.nucleotides.get(index)
    }

    pub fn excluded(&self) -> &[(ResidueId, Exclusion)] {
        &self.excluded
    }
}

fn prepare_one(
    system: &MolecularSystem,
    residue_id: ResidueId,
    index: usize,
    params: &HBondParams,
) -> Result<Nucleotide, Exclusion> {
    let residue = system.residue(residue_id).ok_or(Exclusion::NotNucleotide)?;
    let class = residue.class.ok_or(Exclusion::NotNucleotide)?;
    let frame = residue.frame.ok_or(Exclusion::MissingFrame)?;

    let glycosidic_name = class.glycosidic_atom();
    let glycosidic = system
        .atom_position(residue_id, glycosidic_name)
        .ok_or(Exclusion::MissingGlycosidicAtom(glycosidic_name))?;

    let hbond_atoms = residue
        .atoms()
        .iter()
        .filter_map(|&atom_id| system.atom(atom_id))
        .filter(|atom| atom.element().is_some_and(|e| params.is_eligible_element(e)))
        .map(|atom| HBondAtom {
            name: atom.name.clone(),
            position: atom.position,
            role: atom.role,
        })
        .collect();

    let ring_names: &[&str] = match class {
        NucleotideClass::Purine => &PURINE_RING_ATOMS,
        NucleotideClass::Pyrimidine => &PYRIMIDINE_RING_ATOMS,
    };
    let ring = ring_names
        .iter()
        .filter_map(|name| system.atom_position(residue_id, name))
        .collect();

    Ok(Nucleotide {
        index,
        residue_id,
        base_code: residue.base_code,
        class,
        frame,
        glycosidic,
        hbond_atoms,
        ring,
        o3_prime: system.atom_position(residue_id, "O3'"),
        phosphorus: system.atom_position(residue_id, "P"),
    })
}
