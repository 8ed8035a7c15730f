use super::pair_check::check_pair;
use crate::engine::config::PairingConfig;
use crate::engine::error::EngineError;
use crate::engine::nucleotide::{Nucleotide, NucleotideSet};
use crate::engine::pair::BasePair;
use crate::engine::progress::{Progress, ProgressReporter};
use tracing::{debug, info, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Pairs nucleotides by repeated sweeps of mutual best matching.
///
/// In each sweep every unmatched nucleotide looks up its best-scoring valid
/// partner among the unmatched ones; a pair is committed only when the choice
/// is mutual. Matched nucleotides drop out of the candidate pool immediately,
/// so later lookups in the same sweep see the updated state. Sweeps repeat
/// until one commits nothing.
///
/// Returned pairs are in commit order with `i < j`.
#[instrument(skip_all, name = "best_pair_task")]
pub fn run(
    nucleotides: &NucleotideSet,
    config: &PairingConfig,
    reporter: &ProgressReporter,
) -> Result<Vec<BasePair>, EngineError> {
    let count = nucleotides.len();
    if let Some(limit) = config.limits.max_residues {
        if count > limit {
            return Err(EngineError::TooManyNucleotides { count, limit });
        }
    }

    let all = nucleotides.as_slice();
    let mut matched = vec![false; count];
    let mut pairs = Vec::new();
    let mut sweep = 0;

    loop {
        sweep += 1;
        let before = pairs.len();

        for i in 0..count {
            if matched[i] {
                continue;
            }
            let Some(j) = best_partner(all, i, &matched, config) else {
                continue;
            };
            if best_partner(all, j, &matched, config) != Some(i) {
                continue;
            }

            let (lo, hi) = if i < j { (i, j) } else { (j, i) };
            let (geometry, valid) = check_pair(&all[lo], &all[hi], config);
            if !valid {
                return Err(EngineError::Internal(format!(
                    "mutual best match ({}, {}) failed re-validation",
                    lo, hi
                )));
            }
            matched[lo] = true;
            matched[hi] = true;

            debug!(i = lo, j = hi, score = geometry.score, "Committed base pair.");
            reporter.report(Progress::PairCommitted { i: lo, j: hi });
            pairs.push(BasePair::new(&all[lo], &all[hi], geometry));
        }

        let matched_count = 2 * pairs.len();
        reporter.report(Progress::SweepFinished {
            sweep,
            matched: matched_count,
        });
        if pairs.len() == before {
            break;
        }
    }

    info!(
        pairs = pairs.len(),
        sweeps = sweep,
        unmatched = count - 2 * pairs.len(),
        "Best-pair matching finished."
    );
    Ok(pairs)
}

/// Lowest-scoring valid partner of `i` among unmatched nucleotides.
///
/// Equal scores resolve to the lower index.
fn best_partner(
    nucleotides: &[Nucleotide],
    i: usize,
    matched: &[bool],
    config: &PairingConfig,
) -> Option<usize> {
    let target = &nucleotides[i];

    #[cfg(not(feature = "parallel"))]
    let iterator = nucleotides.iter();

    #[cfg(feature = "parallel")]
    let iterator = nucleotides.par_iter();

    iterator
        .filter(|candidate| candidate.index != i && !matched[candidate.index])
        .filter_map(|candidate| {
            let (geometry, valid) = check_pair(target, candidate, config);
            valid.then_some((geometry.score, candidate.index))
        })
        .min_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)))
        .map(|(_, index)| index)
}
