use crate::engine::nucleotide::NucleotideSet;
use nalgebra::Point3;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct BackboneAtoms {
    o3_prime: Option<Point3<f64>>,
    phosphorus: Option<Point3<f64>>,
}

/// O3' and P positions of every prepared nucleotide, indexed like the set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Backbone {
    atoms: Vec<BackboneAtoms>,
}

impl Backbone {
    pub fn from_nucleotides(nucleotides: &NucleotideSet) -> Self {
        let atoms = nucleotides
            .as_slice()
            .iter()
            .map(|n| BackboneAtoms {
                o3_prime: n.o3_prime,
                phosphorus: n.phosphorus,
            })
            .collect();
        Self { atoms }
    }

    /// Whether the O3' of `from` is within `upper` of the P of `to`, i.e.
    /// `from` precedes `to` 5'->3' on one strand.
    pub fn linked(&self, from: usize, to: usize, upper: f64) -> bool {
        let o3 = self.atoms.get(from).and_then(|a| a.o3_prime);
        let p = self.atoms.get(to).and_then(|a| a.phosphorus);
        match (o3, p) {
            (Some(o3), Some(p)) => (p - o3).norm() <= upper,
            _ => false,
        }
    }

    pub fn o3_distance(&self, a: usize, b: usize) -> Option<f64> {
        let first = self.atoms.get(a)?.o3_prime?;
        let second = self.atoms.get(b)?.o3_prime?;
        Some((second - first).norm())
    }
}

/// A backbone together with the O3'-P bonding cutoff.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Links<'a> {
    pub backbone: &'a Backbone,
    pub upper: f64,
}

impl Links<'_> {
    pub fn forward(&self, from: usize, to: usize) -> bool {
        self.backbone.linked(from, to, self.upper)
    }

    /// Linked in either direction.
    pub fn any(&self, a: usize, b: usize) -> bool {
        self.forward(a, b) || self.forward(b, a)
    }

    pub fn o3_distance(&self, a: usize, b: usize) -> Option<f64> {
        self.backbone.o3_distance(a, b)
    }
}
