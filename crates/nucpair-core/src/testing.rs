//! Ideal-geometry structures shared by unit tests.
//!
//! Base atoms are laid out in base-local coordinates so that two bases placed
//! with [`PairPlacement::ideal`] form a Watson-Crick pair with N1-N3 at 2.9 A
//! and N6-O4 at 2.95 A, and their origins 8.9 A apart.

use crate::core::models::atom::Atom;
use crate::core::models::chain::ChainType;
use crate::core::models::frame::ReferenceFrame;
use crate::core::models::ids::{ChainId, ResidueId};
use crate::core::models::residue::NucleotideClass;
use crate::core::models::system::MolecularSystem;
use crate::engine::config::{HBondParams, PairingConfig};
use crate::engine::nucleotide::{Nucleotide, NucleotideSet};
use crate::engine::pair::BasePair;
use crate::engine::progress::ProgressReporter;
use crate::engine::tasks::best_pair;
use nalgebra::{Matrix3, Point3, Rotation3, Vector3};

const BACKBONE_RADIUS: f64 = 8.9;
const O3P_BOND: f64 = 1.6;

#[rustfmt::skip]
const ADENINE_ATOMS: [(&str, [f64; 2]); 10] = [
    ("N1", [0.0, -3.0]), ("C2", [-1.212, -2.3]), ("N3", [-1.212, -0.9]),
    ("C4", [0.0, -0.2]), ("C5", [1.212, -0.9]), ("C6", [1.212, -2.3]),
    ("N6", [2.381, -2.975]), ("N7", [1.3, 0.5]), ("C8", [0.3, 1.5]), ("N9", [-0.9, 1.0]),
];

#[rustfmt::skip]
const THYMINE_ATOMS: [(&str, [f64; 2]); 8] = [
    ("N1", [-1.212, -0.9]), ("C2", [-1.212, -2.3]), ("O2", [-2.381, -2.975]),
    ("N3", [0.0, -3.0]), ("C4", [1.212, -2.3]), ("O4", [2.381, -2.975]),
    ("C5", [1.212, -0.9]), ("C6", [0.0, -0.2]),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseTemplate {
    Adenine,
    Thymine,
}

impl BaseTemplate {
    pub fn code(&self) -> char {
        match self {
            BaseTemplate::Adenine => 'A',
            BaseTemplate::Thymine => 'T',
        }
    }

    pub fn complement(&self) -> Self {
        match self {
            BaseTemplate::Adenine => BaseTemplate::Thymine,
            BaseTemplate::Thymine => BaseTemplate::Adenine,
        }
    }

    fn class(&self) -> NucleotideClass {
        match self {
            BaseTemplate::Adenine => NucleotideClass::Purine,
            BaseTemplate::Thymine => NucleotideClass::Pyrimidine,
        }
    }

    fn residue_name(&self) -> &'static str {
        match self {
            BaseTemplate::Adenine => "DA",
            BaseTemplate::Thymine => "DT",
        }
    }

    fn local_atoms(&self) -> &'static [(&'static str, [f64; 2])] {
        match self {
            BaseTemplate::Adenine => &ADENINE_ATOMS,
            BaseTemplate::Thymine => &THYMINE_ATOMS,
        }
    }
}

/// Placement of a base pair: the pair frame plus the in-plane offsets of its bases.
#[derive(Debug, Clone, Copy)]
pub struct PairPlacement {
    pub origin: Point3<f64>,
    pub rotation: Rotation3<f64>,
    /// Distance between the two base origins along the pair y-axis.
    pub separation: f64,
    /// Offset of the second base along the pair x-axis relative to the first.
    pub shear: f64,
}

impl PairPlacement {
    pub fn ideal() -> Self {
        Self {
            origin: Point3::origin(),
            rotation: Rotation3::identity(),
            separation: 8.9,
            shear: 0.0,
        }
    }

    /// Frames of the strand I and strand II bases.
    pub fn base_frames(&self) -> (ReferenceFrame, ReferenceFrame) {
        let rotation = *self.rotation.matrix();
        let first = ReferenceFrame::new(
            self.origin + rotation * Vector3::new(-0.5 * self.shear, 0.5 * self.separation, 0.0),
            rotation,
        );
        let reflected = rotation * Matrix3::from_diagonal(&Vector3::new(1.0, -1.0, -1.0));
        let second = ReferenceFrame::new(
            self.origin + rotation * Vector3::new(0.5 * self.shear, -0.5 * self.separation, 0.0),
            reflected,
        );
        (first, second)
    }
}

pub fn add_atom(
    system: &mut MolecularSystem,
    residue: ResidueId,
    name: &str,
    position: Point3<f64>,
) {
    system
        .add_atom_to_residue(residue, Atom::new(name, residue, position))
        .unwrap();
}

/// Adds a residue whose base atoms are placed by `frame` and marks it as a fitted nucleotide.
pub fn add_base(
    system: &mut MolecularSystem,
    chain: ChainId,
    number: isize,
    template: BaseTemplate,
    frame: &ReferenceFrame,
) -> ResidueId {
    let residue = system
        .add_residue(chain, number, None, template.residue_name())
        .unwrap();
    for (name, [x, y]) in template.local_atoms() {
        add_atom(system, residue, name, frame.to_global(&Point3::new(*x, *y, 0.0)));
    }
    let entry = system.residue_mut(residue).unwrap();
    entry.set_nucleotide(template.code(), template.class());
    entry.frame = Some(*frame);
    residue
}

pub fn prepare(system: &MolecularSystem) -> NucleotideSet {
    NucleotideSet::prepare(system, &HBondParams::default())
}

/// Two prepared nucleotides placed as one pair, without backbone atoms.
pub fn nucleotide_pair(
    first: BaseTemplate,
    second: BaseTemplate,
    placement: &PairPlacement,
) -> (Nucleotide, Nucleotide) {
    let mut system = MolecularSystem::new();
    let chain_a = system.add_chain('A', ChainType::DNA);
    let chain_b = system.add_chain('B', ChainType::DNA);
    let (frame_a, frame_b) = placement.base_frames();
    add_base(&mut system, chain_a, 1, first, &frame_a);
    add_base(&mut system, chain_b, 1, second, &frame_b);

    let set = prepare(&system);
    (set.get(0).unwrap().clone(), set.get(1).unwrap().clone())
}

/// Order in which the residues of a [`Duplex`] are added to the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResidueOrder {
    /// Strand I 5'->3', then strand II 5'->3'.
    Canonical,
    /// Strand I 5'->3', then strand II 3'->5'.
    StrandTwoReversed,
    /// Each pair's residues added together, strand II first on every other pair.
    Alternating,
}

/// A regular anti-parallel duplex with covalently linked backbones.
///
/// Strand I runs 5'->3' in the direction of increasing pair index.
#[derive(Debug, Clone, Copy)]
pub struct Duplex {
    pub length: usize,
    /// Rise per step along the helix axis.
    pub rise: f64,
    /// Twist per step in degrees; negative for a left-handed screw.
    pub twist: f64,
    /// Displacement of every pair origin from the helix axis, along the pair x-axis.
    pub offset: f64,
    pub order: ResidueOrder,
}

impl Duplex {
    pub fn b_form(length: usize) -> Self {
        Self {
            length,
            rise: 3.38,
            twist: 36.0,
            offset: 0.0,
            order: ResidueOrder::Canonical,
        }
    }

    pub fn placement(&self, k: usize) -> PairPlacement {
        let rotation = self.rotation(k as f64);
        PairPlacement {
            origin: self.axis_point(k as f64) + rotation * Vector3::new(self.offset, 0.0, 0.0),
            rotation,
            ..PairPlacement::ideal()
        }
    }

    fn axis_point(&self, k: f64) -> Point3<f64> {
        Point3::new(0.0, 0.0, self.rise * k)
    }

    fn rotation(&self, k: f64) -> Rotation3<f64> {
        Rotation3::from_axis_angle(&Vector3::z_axis(), (self.twist * k).to_radians())
    }

    /// Backbone point of pair `k` on strand I (`side = 1`) or strand II (`side = -1`).
    fn backbone_point(&self, k: f64, side: f64) -> Point3<f64> {
        let radial = self.rotation(k) * Vector3::new(self.offset, side * BACKBONE_RADIUS, 0.0);
        self.axis_point(k) + radial
    }

    pub fn template(&self, k: usize) -> BaseTemplate {
        if k % 2 == 0 {
            BaseTemplate::Adenine
        } else {
            BaseTemplate::Thymine
        }
    }

    pub fn build(&self) -> MolecularSystem {
        let mut system = MolecularSystem::new();
        let chain_a = system.add_chain('A', ChainType::DNA);
        let chain_b = system.add_chain('B', ChainType::DNA);
        let n = self.length;

        let strand_two: Vec<usize> = match self.order {
            ResidueOrder::Canonical => (0..n).rev().collect(),
            _ => (0..n).collect(),
        };

        match self.order {
            ResidueOrder::Alternating => {
                for k in 0..n {
                    if k % 2 == 0 {
                        self.add_strand_two(&mut system, chain_b, k);
                        self.add_strand_one(&mut system, chain_a, k);
                    } else {
                        self.add_strand_one(&mut system, chain_a, k);
                        self.add_strand_two(&mut system, chain_b, k);
                    }
                }
            }
            _ => {
                for k in 0..n {
                    self.add_strand_one(&mut system, chain_a, k);
                }
                for k in strand_two {
                    self.add_strand_two(&mut system, chain_b, k);
                }
            }
        }
        system
    }

    fn add_strand_one(&self, system: &mut MolecularSystem, chain: ChainId, k: usize) {
        let (frame, _) = self.placement(k).base_frames();
        let residue = add_base(system, chain, k as isize + 1, self.template(k), &frame);
        let step = Vector3::new(0.0, 0.0, O3P_BOND * self.rise.signum());
        let kf = k as f64;
        add_atom(system, residue, "P", self.backbone_point(kf, 1.0));
        add_atom(system, residue, "O3'", self.backbone_point(kf + 1.0, 1.0) - step);
    }

    fn add_strand_two(&self, system: &mut MolecularSystem, chain: ChainId, k: usize) {
        let (_, frame) = self.placement(k).base_frames();
        let number = (self.length - k) as isize;
        let residue = add_base(system, chain, number, self.template(k).complement(), &frame);
        let step = Vector3::new(0.0, 0.0, O3P_BOND * self.rise.signum());
        let kf = k as f64;
        add_atom(system, residue, "P", self.backbone_point(kf, -1.0));
        add_atom(system, residue, "O3'", self.backbone_point(kf - 1.0, -1.0) + step);
    }
}

/// Builds `duplex`, prepares it and runs best-pair matching with default settings.
pub fn matched_duplex(duplex: &Duplex) -> (MolecularSystem, NucleotideSet, Vec<BasePair>) {
    let system = duplex.build();
    let set = prepare(&system);
    let pairs = best_pair::run(&set, &PairingConfig::default(), &ProgressReporter::new()).unwrap();
    (system, set, pairs)
}
