use super::backbone::Links;
use crate::core::utils::geometry::angle_degrees;
use crate::engine::pair::BasePair;
use tracing::trace;

/// Backbone anomalies left after orienting a segment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectionFlags {
    /// Some step has no O3'-P link on either strand.
    pub broken: bool,
    /// Strand II runs 5'->3' along the segment.
    pub parallel: bool,
    /// Strand I is linked both 5'->3' and 3'->5' along the segment.
    pub reversed: bool,
}

/// Swaps pairs so that strand I runs 5'->3' through the segment.
///
/// `order` holds indices into `pairs` in walk order; it is reversed when the
/// walk runs against strand I.
pub(crate) fn five_to_three(
    pairs: &mut [BasePair],
    order: &mut [usize],
    links: &Links,
) -> DirectionFlags {
    if order.len() < 2 {
        return DirectionFlags::default();
    }

    if first_pair_needs_swap(&pairs[order[0]], &pairs[order[1]], links) {
        pairs[order[0]].swap();
    }
    for step in order.windows(2) {
        if step_needs_swap(&pairs[step[0]], &pairs[step[1]], links) {
            trace!(pair = step[1], "Swapped strands to follow the previous pair.");
            pairs[step[1]].swap();
        }
    }

    let counts = StrandCounts::collect(pairs, order, links);
    if counts.backward_one > counts.forward_one {
        order.reverse();
    }

    let counts = StrandCounts::collect(pairs, order, links);
    DirectionFlags {
        broken: counts.unlinked_steps > 0,
        parallel: counts.forward_two > counts.backward_two,
        reversed: counts.forward_one > 0 && counts.backward_one > 0,
    }
}

/// Strand I of the first pair should lead 5'->3' into the second pair.
fn first_pair_needs_swap(first: &BasePair, second: &BasePair, links: &Links) -> bool {
    let (a1, b1, a2, b2) = (first.i, first.j, second.i, second.j);
    if links.forward(a1, a2) || links.forward(a1, b2) {
        return false;
    }
    if links.forward(b1, a2) || links.forward(b1, b2) {
        return true;
    }
    links.forward(a2, a1) || links.forward(b2, a1)
}

fn step_needs_swap(prev: &BasePair, cur: &BasePair, links: &Links) -> bool {
    let (ap, bp, ac, bc) = (prev.i, prev.j, cur.i, cur.j);
    let same_strand = links.any(ap, ac) || links.any(bp, bc);
    let cross_strand = links.any(ap, bc) || links.any(bp, ac);

    let by_orientation = watson_crick_crossed(prev, cur);
    let by_proximity = o3_closer_across(ap, bp, ac, bc, links);
    let by_linkage = cross_strand && !same_strand;
    if by_orientation || by_proximity || by_linkage {
        return true;
    }

    if same_strand || cross_strand || !deviation_favors_swap(prev, cur) {
        return false;
    }
    if prev.is_watson_crick() && cur.is_watson_crick() {
        return prev.strand_one_z().dot(&cur.strand_two_z()) > 0.0;
    }
    true
}

/// Both pairs Watson-Crick with the current pair's strands crossed over.
fn watson_crick_crossed(prev: &BasePair, cur: &BasePair) -> bool {
    if !(prev.is_watson_crick() && cur.is_watson_crick()) {
        return false;
    }
    let z = prev.strand_one_z();
    z.dot(&cur.strand_one_z()) < 0.0 && z.dot(&cur.strand_two_z()) > 0.0
}

fn o3_closer_across(ap: usize, bp: usize, ac: usize, bc: usize, links: &Links) -> bool {
    let distances = (
        links.o3_distance(ap, bc),
        links.o3_distance(ap, ac),
        links.o3_distance(bp, ac),
        links.o3_distance(bp, bc),
    );
    match distances {
        (Some(cross_one), Some(same_one), Some(cross_two), Some(same_two)) => {
            cross_one < same_one && cross_two < same_two
        }
        _ => false,
    }
}

/// Compares the summed normal deviations of both strand assignments.
fn deviation_favors_swap(prev: &BasePair, cur: &BasePair) -> bool {
    let (p1, p2) = (prev.strand_one_z(), prev.strand_two_z());
    let (c1, c2) = (cur.strand_one_z(), cur.strand_two_z());
    let keep = angle_degrees(&p1, &c1) + angle_degrees(&p2, &c2);
    let swap = angle_degrees(&p1, &c2) + angle_degrees(&p2, &c1);
    swap < keep
}

#[derive(Debug, Default)]
struct StrandCounts {
    forward_one: usize,
    backward_one: usize,
    forward_two: usize,
    backward_two: usize,
    unlinked_steps: usize,
}

impl StrandCounts {
    fn collect(pairs: &[BasePair], order: &[usize], links: &Links) -> Self {
        let mut counts = Self::default();
        for step in order.windows(2) {
            let (prev, cur) = (&pairs[step[0]], &pairs[step[1]]);
            let forward_one = links.forward(prev.i, cur.i);
            let backward_one = links.forward(cur.i, prev.i);
            let forward_two = links.forward(prev.j, cur.j);
            let backward_two = links.forward(cur.j, prev.j);

            counts.forward_one += forward_one as usize;
            counts.backward_one += backward_one as usize;
            counts.forward_two += forward_two as usize;
            counts.backward_two += backward_two as usize;
            if !(forward_one || backward_one || forward_two || backward_two) {
                counts.unlinked_steps += 1;
            }
        }
        counts
    }
}
