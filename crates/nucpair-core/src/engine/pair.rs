use crate::core::models::frame::ReferenceFrame;
use crate::core::models::ids::ResidueId;
use crate::engine::nucleotide::Nucleotide;
use crate::engine::tasks::pair_check::{Classification, PairGeometry};
use nalgebra::{Point3, Vector3};

/// An accepted base pair.
///
/// Index `i` and the first frame belong to strand I. Pairs are committed with
/// `i < j`; helix assembly may later swap the two bases so that strand I runs
/// 5' to 3' along the helix.
#[derive(Debug, Clone, PartialEq)]
pub struct BasePair {
    pub i: usize,
    pub j: usize,
    pub residues: [ResidueId; 2],
    pub frames: [ReferenceFrame; 2],
    /// Middle frame of the pair; its z-axis follows the strand I base normal.
    pub pair_frame: ReferenceFrame,
    /// Geometry as evaluated when the pair was accepted.
    pub geometry: PairGeometry,
    pub swapped: bool,
}

impl BasePair {
    pub fn new(a: &Nucleotide, b: &Nucleotide, geometry: PairGeometry) -> Self {
        Self {
            i: a.index,
            j: b.index,
            residues: [a.residue_id, b.residue_id],
            frames: [a.frame, b.frame],
            pair_frame: geometry.pair_frame,
            geometry,
            swapped: false,
        }
    }

    pub fn origin(&self) -> Point3<f64> {
        self.pair_frame.origin
    }

    pub fn z_axis(&self) -> Vector3<f64> {
        self.pair_frame.z_axis()
    }

    pub fn strand_one_z(&self) -> Vector3<f64> {
        self.frames[0].z_axis()
    }

    pub fn strand_two_z(&self) -> Vector3<f64> {
        self.frames[1].z_axis()
    }

    pub fn is_watson_crick(&self) -> bool {
        self.geometry.classification == Classification::WatsonCrick
    }

    /// Exchanges the two strands of the pair.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.i, &mut self.j);
        self.residues.swap(0, 1);
        self.frames.swap(0, 1);
        self.pair_frame = self.pair_frame.flipped();
        self.swapped = !self.swapped;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::PairingConfig;
    use crate::engine::tasks::pair_check::check_pair;
    use crate::testing::{BaseTemplate, PairPlacement, nucleotide_pair};

    #[test]
    fn swap_exchanges_strands_and_toggles_flag() {
        let (adenine, thymine) =
            nucleotide_pair(BaseTemplate::Adenine, BaseTemplate::Thymine, &PairPlacement::ideal());
        let (geometry, _) = check_pair(&adenine, &thymine, &PairingConfig::default());
        let original = BasePair::new(&adenine, &thymine, geometry);
        assert!(original.is_watson_crick());
        assert!(original.z_axis().dot(&original.strand_one_z()) > 0.99);

        let mut pair = original.clone();
        pair.swap();
        assert_eq!((pair.i, pair.j), (original.j, original.i));
        assert_eq!(pair.residues, [original.residues[1], original.residues[0]]);
        assert_eq!(pair.frames[0], original.frames[1]);
        assert!(pair.swapped);
        assert_eq!(pair.origin(), original.origin());
        assert!(pair.z_axis().dot(&pair.strand_one_z()) > 0.99);

        pair.swap();
        assert_eq!(pair, original);
    }
}
