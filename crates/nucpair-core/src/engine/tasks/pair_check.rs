use super::hydrogen_bonds::{self, HBondType, HydrogenBond};
use crate::core::models::frame::ReferenceFrame;
use crate::core::utils::geometry::{plane_angle_degrees, polygon_overlap_area, project_onto_plane};
use crate::core::utils::identifiers::is_watson_crick_pair;
use crate::core::utils::step_params::{StepParameters, step_parameters};
use crate::engine::config::PairingConfig;
use crate::engine::nucleotide::Nucleotide;
use nalgebra::{Point3, Vector3};
use tracing::trace;

const MAX_PAIR_RISE: f64 = 2.0;
const MAX_PAIR_TWIST: f64 = 60.0;
const WOBBLE_SHEAR_MIN: f64 = 1.8;
const WOBBLE_SHEAR_MAX: f64 = 2.8;
const WATSON_CRICK_SHEAR_MAX: f64 = 1.8;
const WATSON_CRICK_BONUS: f64 = -2.0;
const FULL_HBOND_ADJUSTMENT: f64 = -3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Classification {
    #[default]
    None = 0,
    Wobble = 1,
    WatsonCrick = 2,
}

impl Classification {
    pub fn id(&self) -> u8 {
        *self as u8
    }
}

/// Geometric descriptors and score of a candidate base pair.
///
/// Scores are only meaningful for valid pairs. When a range check fails the
/// overlap and hydrogen-bond fields are left at zero.
#[derive(Debug, Clone, PartialEq)]
pub struct PairGeometry {
    pub dorg: f64,
    pub d_v: f64,
    pub plane_angle: f64,
    pub d_nn: f64,
    pub overlap_area: f64,
    pub dir_x: f64,
    pub dir_y: f64,
    pub dir_z: f64,
    /// Averaged base normal.
    pub z_average: Vector3<f64>,
    /// Middle frame of the pair, oriented along the first base.
    pub pair_frame: ReferenceFrame,
    /// Step parameters from the (possibly reflected) second base to the first.
    pub step: StepParameters,
    pub classification: Classification,
    pub base_score: f64,
    pub hbond_adjustment: f64,
    pub score: f64,
    /// Base-base contacts in the hydrogen-bond distance window, before arbitration.
    pub base_hbonds: usize,
    pub good_hbonds: usize,
    pub hbonds: Vec<HydrogenBond>,
}

/// Evaluates whether two nucleotides form a base pair.
///
/// Returns the pair geometry and whether all range, overlap and hydrogen-bond
/// checks pass.
pub fn check_pair(a: &Nucleotide, b: &Nucleotide, config: &PairingConfig) -> (PairGeometry, bool) {
    let windows = &config.geometry;
    let frame_a = &a.frame;
    let frame_b = &b.frame;

    let dir_x = frame_a.x_axis().dot(&frame_b.x_axis());
    let dir_y = frame_a.y_axis().dot(&frame_b.y_axis());
    let dir_z = frame_a.z_axis().dot(&frame_b.z_axis());

    let z_sum = if dir_z > 0.0 {
        frame_a.z_axis() + frame_b.z_axis()
    } else {
        frame_a.z_axis() - frame_b.z_axis()
    };
    let z_average = z_sum.try_normalize(1.0e-10).unwrap_or_else(|| frame_a.z_axis());

    let second = if dir_z < 0.0 { frame_b.flipped() } else { *frame_b };
    let (step, pair_frame) = step_parameters(&second, frame_a);

    let separation = frame_b.origin - frame_a.origin;
    let dorg = separation.norm();
    let d_v = separation.dot(&z_average).abs();
    let plane_angle = plane_angle_degrees(&frame_a.z_axis(), &frame_b.z_axis());
    let d_nn = (b.glycosidic - a.glycosidic).norm();
    let base_score = dorg + 2.0 * d_v + plane_angle / 20.0;

    let mut geometry = PairGeometry {
        dorg,
        d_v,
        plane_angle,
        d_nn,
        overlap_area: 0.0,
        dir_x,
        dir_y,
        dir_z,
        z_average,
        pair_frame,
        step,
        classification: Classification::None,
        base_score,
        hbond_adjustment: 0.0,
        score: base_score,
        base_hbonds: 0,
        good_hbonds: 0,
        hbonds: Vec::new(),
    };

    let in_range = windows.dorg.contains(dorg)
        && windows.d_v.contains(d_v)
        && windows.plane_angle.contains(plane_angle)
        && windows.d_nn.contains(d_nn);
    if !in_range {
        trace!(dorg, d_v, plane_angle, d_nn, "Pair rejected by range checks.");
        return (geometry, false);
    }

    geometry.overlap_area = ring_overlap(a, b, &pair_frame.origin, &z_average);
    if geometry.overlap_area >= windows.max_overlap {
        trace!(overlap = geometry.overlap_area, "Pair rejected by ring overlap.");
        return (geometry, false);
    }

    geometry.hbonds = hydrogen_bonds::detect(
        a,
        b,
        &config.hbond,
        config.limits.max_hbond_candidates,
    );
    geometry.base_hbonds = hydrogen_bonds::count_base_contacts(&geometry.hbonds);
    if windows.min_base_hbonds > 0 && geometry.base_hbonds < windows.min_base_hbonds {
        trace!(
            base_hbonds = geometry.base_hbonds,
            "Pair rejected by hydrogen-bond count."
        );
        return (geometry, false);
    }

    geometry.classification = classify(&geometry, a.base_code, b.base_code);
    geometry.good_hbonds = count_good_hbonds(&geometry.hbonds, config);
    geometry.hbond_adjustment = if geometry.good_hbonds >= 2 {
        FULL_HBOND_ADJUSTMENT
    } else {
        -(geometry.good_hbonds as f64)
    };
    geometry.score = base_score + geometry.hbond_adjustment;
    if geometry.classification == Classification::WatsonCrick {
        geometry.score += WATSON_CRICK_BONUS;
    }

    (geometry, true)
}

fn count_good_hbonds(hbonds: &[HydrogenBond], config: &PairingConfig) -> usize {
    hbonds
        .iter()
        .filter(|hb| hb.bond_type == HBondType::Standard)
        .filter(|hb| config.hbond.good_bond.contains(hb.distance))
        .count()
}

fn classify(geometry: &PairGeometry, base_a: char, base_b: char) -> Classification {
    let anti_parallel = geometry.dir_x > 0.0 && geometry.dir_y < 0.0 && geometry.dir_z < 0.0;
    let step = &geometry.step;
    if !anti_parallel || step.rise.abs() > MAX_PAIR_RISE || step.twist.abs() > MAX_PAIR_TWIST {
        return Classification::None;
    }

    let shear = step.shear().abs();
    if (WOBBLE_SHEAR_MIN..=WOBBLE_SHEAR_MAX).contains(&shear) {
        Classification::Wobble
    } else if shear <= WATSON_CRICK_SHEAR_MAX && is_watson_crick_pair(base_a, base_b) {
        Classification::WatsonCrick
    } else {
        Classification::None
    }
}

/// Area shared by the two base rings after projection onto the mean base plane.
fn ring_overlap(a: &Nucleotide, b: &Nucleotide, origin: &Point3<f64>, normal: &Vector3<f64>) -> f64 {
    if a.ring.len() < 3 || b.ring.len() < 3 {
        return 0.0;
    }
    let ring_a = project_onto_plane(&a.ring, origin, normal);
    let ring_b = project_onto_plane(&b.ring, origin, normal);
    polygon_overlap_area(&ring_a, &ring_b)
}
