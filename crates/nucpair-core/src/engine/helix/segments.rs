use super::context::{PairContext, ends};

/// Pair indices grouped into helix walks, plus any pairs no walk reached.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Segmentation {
    pub segments: Vec<Vec<usize>>,
    pub leftover: Vec<usize>,
}

/// Walks the neighbor graph from every helix end.
///
/// Each walk follows the neighbor it did not arrive from and stops at a dead
/// end or at a pair an earlier walk already claimed.
pub fn locate(contexts: &[PairContext]) -> Segmentation {
    let mut claimed = vec![false; contexts.len()];
    let mut segments = Vec::new();

    for start in ends(contexts) {
        if claimed[start] {
            continue;
        }
        claimed[start] = true;
        let mut segment = vec![start];
        let mut came_from = None;
        let mut current = start;

        while let Some(next) = contexts[current]
            .neighbors
            .iter()
            .map(|n| n.pair)
            .find(|&p| Some(p) != came_from)
        {
            if claimed[next] {
                break;
            }
            claimed[next] = true;
            segment.push(next);
            came_from = Some(current);
            current = next;
        }
        segments.push(segment);
    }

    let leftover = (0..contexts.len()).filter(|&k| !claimed[k]).collect();
    Segmentation { segments, leftover }
}
