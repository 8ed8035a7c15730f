use crate::engine::pair::BasePair;
use kiddo::{KdTree, SquaredEuclidean};

const MAX_NEAREST: usize = 8;

/// Side of a pair, along its own z-axis, on which a stacked neighbor lies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Previous,
    Next,
}

impl Side {
    fn opposite(self) -> Self {
        match self {
            Side::Previous => Side::Next,
            Side::Next => Side::Previous,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub pair: usize,
    pub distance: f64,
    pub side: Side,
}

/// The stacked neighbors of one pair, nearest first; at most one per side.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PairContext {
    pub neighbors: Vec<Neighbor>,
}

impl PairContext {
    /// A pair with fewer than two stacked neighbors starts or ends a helix.
    pub fn is_end(&self) -> bool {
        self.neighbors.len() < 2
    }

    pub fn neighbor(&self, side: Side) -> Option<usize> {
        self.neighbors.iter().find(|n| n.side == side).map(|n| n.pair)
    }
}

/// Finds the stacked neighbors of every pair.
pub fn build(pairs: &[BasePair], helix_break: f64) -> Vec<PairContext> {
    if pairs.is_empty() {
        return Vec::new();
    }
    let origins: Vec<[f64; 3]> = pairs
        .iter()
        .map(|p| {
            let o = p.origin();
            [o.x, o.y, o.z]
        })
        .collect();
    let tree: KdTree<f64, 3> = (&origins).into();

    (0..pairs.len())
        .map(|index| context_of(index, pairs, &tree, helix_break))
        .collect()
}

fn context_of(
    index: usize,
    pairs: &[BasePair],
    tree: &KdTree<f64, 3>,
    helix_break: f64,
) -> PairContext {
    let pair = &pairs[index];
    let origin = pair.origin();
    let direction = |k: usize| pairs[k].origin() - origin;

    let mut nearest: Vec<(f64, usize)> = tree
        .nearest_n::<SquaredEuclidean>(&[origin.x, origin.y, origin.z], MAX_NEAREST + 1)
        .into_iter()
        .map(|found| found.item as usize)
        .filter(|&k| k != index)
        .map(|k| (direction(k).norm(), k))
        .collect();
    // Tree order is unspecified among equal distances.
    nearest.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
    nearest.truncate(MAX_NEAREST);

    let Some(&(d1, n1)) = nearest.first() else {
        return PairContext::default();
    };
    if d1 > helix_break {
        return PairContext::default();
    }
    let v1 = direction(n1);

    // Second nearest on the same side as the nearest: prefer the third if it
    // closes the other side.
    if nearest.len() >= 3 {
        let (d3, n3) = nearest[2];
        if v1.dot(&direction(nearest[1].1)) > 0.0
            && d3 <= helix_break
            && v1.dot(&direction(n3)) < 0.0
        {
            nearest.swap(1, 2);
        }
    }

    let first_side = if v1.dot(&pair.z_axis()) > 0.0 {
        Side::Next
    } else {
        Side::Previous
    };
    let mut neighbors = vec![Neighbor {
        pair: n1,
        distance: d1,
        side: first_side,
    }];
    if let Some(&(d2, n2)) = nearest.get(1) {
        if d2 <= helix_break && v1.dot(&direction(n2)) < 0.0 {
            neighbors.push(Neighbor {
                pair: n2,
                distance: d2,
                side: first_side.opposite(),
            });
        }
    }
    PairContext { neighbors }
}

/// Pairs where helix walks start, in pair order. A fully circular
/// arrangement has no natural end and starts at pair 0.
pub fn ends(contexts: &[PairContext]) -> Vec<usize> {
    let ends: Vec<usize> = contexts
        .iter()
        .enumerate()
        .filter(|(_, c)| c.is_end())
        .map(|(k, _)| k)
        .collect();
    if ends.is_empty() && !contexts.is_empty() {
        return vec![0];
    }
    ends
}
