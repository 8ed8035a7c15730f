use super::backbone::Links;
use crate::engine::pair::BasePair;
use tracing::warn;

/// A Watson-Crick step whose rise is negative although both strands are
/// covalently linked along it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiseWarning {
    pub segment: usize,
    /// Position, within the segment, of the second pair of the step.
    pub step: usize,
    pub rise: f64,
}

pub(crate) fn check_rise(segment: usize, pairs: &[BasePair], links: &Links) -> Vec<RiseWarning> {
    let mut warnings = Vec::new();
    for (position, step) in pairs.windows(2).enumerate() {
        let (prev, cur) = (&step[0], &step[1]);
        if !(prev.is_watson_crick() && cur.is_watson_crick()) {
            continue;
        }
        let Some(axis) = (prev.z_axis() + cur.z_axis()).try_normalize(1.0e-10) else {
            continue;
        };
        let rise = (cur.origin() - prev.origin()).dot(&axis);
        if rise < 0.0 && links.forward(prev.i, cur.i) && links.forward(cur.j, prev.j) {
            warn!(
                segment,
                step = position + 1,
                rise,
                "Negative rise on a linked Watson-Crick step; pair order may be wrong."
            );
            warnings.push(RiseWarning {
                segment,
                step: position + 1,
                rise,
            });
        }
    }
    warnings
}

/// Whether every step of an oriented segment runs against the y-axis of its
/// first pair, the signature of a left-handed stack.
pub(crate) fn is_z_form(pairs: &[BasePair]) -> bool {
    let Some(first) = pairs.first() else {
        return false;
    };
    if pairs.len() < 2 {
        return false;
    }
    let reference = first.pair_frame.y_axis();
    pairs
        .windows(2)
        .all(|step| (step[1].origin() - step[0].origin()).dot(&reference) < 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::helix::backbone::Backbone;
    use crate::testing::{Duplex, matched_duplex};

    fn left_handed(length: usize) -> Duplex {
        Duplex {
            twist: -30.0,
            offset: 3.0,
            ..Duplex::b_form(length)
        }
    }

    fn negative_rise(length: usize) -> Duplex {
        Duplex {
            rise: -3.38,
            twist: -30.0,
            ..Duplex::b_form(length)
        }
    }

    fn links(backbone: &Backbone) -> Links<'_> {
        Links { backbone, upper: 2.5 }
    }

    #[test]
    fn right_handed_stack_is_neither_z_form_nor_warned() {
        let (_, set, pairs) = matched_duplex(&Duplex::b_form(4));
        let backbone = Backbone::from_nucleotides(&set);

        assert!(!is_z_form(&pairs));
        assert!(check_rise(0, &pairs, &links(&backbone)).is_empty());
    }

    #[test]
    fn left_handed_stack_is_z_form() {
        let (_, set, pairs) = matched_duplex(&left_handed(4));
        let backbone = Backbone::from_nucleotides(&set);

        assert!(is_z_form(&pairs));
        assert!(check_rise(0, &pairs, &links(&backbone)).is_empty());
    }

    #[test]
    fn displaced_right_handed_stack_is_not_z_form() {
        let duplex = Duplex {
            offset: 3.0,
            ..Duplex::b_form(4)
        };
        let (_, _, pairs) = matched_duplex(&duplex);

        assert!(!is_z_form(&pairs));
    }

    #[test]
    fn negative_rise_on_linked_steps_is_warned() {
        let (_, set, pairs) = matched_duplex(&negative_rise(4));
        let backbone = Backbone::from_nucleotides(&set);

        let warnings = check_rise(2, &pairs, &links(&backbone));

        assert_eq!(warnings.len(), 3);
        assert_eq!(warnings[0].segment, 2);
        assert_eq!(warnings[0].step, 1);
        assert!((warnings[0].rise + 3.38).abs() < 1e-9);
        // Stacking straight down the axis has no component along the y-axis.
        assert!(!is_z_form(&pairs));
    }

    #[test]
    fn unlinked_negative_rise_is_not_warned() {
        let (_, _, pairs) = matched_duplex(&negative_rise(3));
        let backbone = Backbone::default();

        assert!(check_rise(0, &pairs, &links(&backbone)).is_empty());
    }

    #[test]
    fn single_pair_is_never_z_form() {
        let (_, _, pairs) = matched_duplex(&left_handed(1));
        assert!(!is_z_form(&pairs));
        assert!(!is_z_form(&[]));
    }
}
