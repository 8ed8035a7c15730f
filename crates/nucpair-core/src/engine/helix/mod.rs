//! Organizes accepted base pairs into helices.
//!
//! Assembly runs in four stages: stacked neighbors are found for every pair
//! ([`context`]), the neighbor graph is walked into segments ([`segments`]),
//! each segment is oriented so that strand I runs 5'->3' ([`direction`]), and
//! finally every segment is checked for negative rises and left-handedness
//! ([`checks`]). None of these stages fails; anomalies become flags and
//! warnings.

pub mod backbone;
pub mod checks;
pub mod context;
pub mod direction;
pub mod segments;

use crate::engine::config::HelixParams;
use crate::engine::pair::BasePair;
use backbone::{Backbone, Links};
use checks::RiseWarning;
use tracing::{info, instrument, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HelixFlags {
    pub broken: bool,
    pub parallel: bool,
    pub reversed: bool,
    /// Left-handed stacking; only set on segments with no other flag.
    pub z_form: bool,
    /// Catch-all segment of pairs no helix walk reached.
    pub leftover: bool,
}

impl HelixFlags {
    pub fn has_anomaly(&self) -> bool {
        self.broken || self.parallel || self.reversed || self.leftover
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HelixSegment {
    /// Positions in [`HelixAssembly::pairs`], in helix order.
    pub pairs: Vec<usize>,
    pub flags: HelixFlags,
}

impl HelixSegment {
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Pairs in helix order together with the segments that partition them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HelixAssembly {
    pub pairs: Vec<BasePair>,
    pub segments: Vec<HelixSegment>,
    pub rise_warnings: Vec<RiseWarning>,
}

/// Assembles `pairs` into oriented helix segments.
///
/// Pairs may have their strands swapped; the returned list holds every input
/// pair exactly once, grouped segment by segment.
#[instrument(skip_all, name = "helix_assembly")]
pub fn organize(
    mut pairs: Vec<BasePair>,
    backbone: &Backbone,
    params: &HelixParams,
) -> HelixAssembly {
    let links = Links {
        backbone,
        upper: params.o3p_upper,
    };
    let contexts = context::build(&pairs, params.helix_break);
    let segmentation = segments::locate(&contexts);

    let mut walks = Vec::with_capacity(segmentation.segments.len() + 1);
    for mut order in segmentation.segments {
        let direction = direction::five_to_three(&mut pairs, &mut order, &links);
        let flags = HelixFlags {
            broken: direction.broken,
            parallel: direction.parallel,
            reversed: direction.reversed,
            ..HelixFlags::default()
        };
        walks.push((order, flags));
    }
    if !segmentation.leftover.is_empty() {
        warn!(
            pairs = segmentation.leftover.len(),
            "Pairs not reached by any helix walk were grouped into a leftover segment."
        );
        let flags = HelixFlags {
            leftover: true,
            ..HelixFlags::default()
        };
        walks.push((segmentation.leftover, flags));
    }

    let mut slots: Vec<Option<BasePair>> = pairs.into_iter().map(Some).collect();
    let mut assembly = HelixAssembly::default();
    for (index, (order, mut flags)) in walks.into_iter().enumerate() {
        let start = assembly.pairs.len();
        assembly
            .pairs
            .extend(order.iter().filter_map(|&k| slots[k].take()));
        let members = &assembly.pairs[start..];

        if !flags.leftover {
            assembly
                .rise_warnings
                .extend(checks::check_rise(index, members, &links));
        }
        flags.z_form = !flags.has_anomaly() && checks::is_z_form(members);

        assembly.segments.push(HelixSegment {
            pairs: (start..assembly.pairs.len()).collect(),
            flags,
        });
    }

    info!(
        pairs = assembly.pairs.len(),
        helices = assembly.segments.len(),
        z_form = assembly.segments.iter().filter(|s| s.flags.z_form).count(),
        "Helix assembly finished."
    );
    assembly
}
