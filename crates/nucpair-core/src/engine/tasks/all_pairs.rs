use super::pair_check::check_pair;
use crate::engine::config::PairingConfig;
use crate::engine::error::EngineError;
use crate::engine::nucleotide::NucleotideSet;
use crate::engine::pair::BasePair;
use crate::engine::progress::{Progress, ProgressReporter};
use std::collections::BTreeSet;
use tracing::{info, instrument, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Enumerates every valid pair `(i, j)` with `i < j`, including multiplets.
///
/// Each nucleotide takes part in at most `limits.max_pairs_per_residue`
/// pairs; pairs found after a nucleotide's quota is spent are dropped in
/// `(i, j)` order.
#[instrument(skip_all, name = "all_pairs_task")]
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
    if count < 2 {
        return Ok(Vec::new());
    }

    let all = nucleotides.as_slice();
    reporter.report(Progress::TaskStart {
        total_steps: count as u64,
    });

    #[cfg(not(feature = "parallel"))]
    let iterator = all.iter();

    #[cfg(feature = "parallel")]
    let iterator = all.par_iter();

    let rows: Vec<Vec<BasePair>> = iterator
        .map(|a| {
            let row = all[a.index + 1..]
                .iter()
                .filter_map(|b| {
                    let (geometry, valid) = check_pair(a, b, config);
                    valid.then(|| BasePair::new(a, b, geometry))
                })
                .collect();
            reporter.report(Progress::TaskIncrement);
            row
        })
        .collect();

    reporter.report(Progress::TaskFinish);

    let cap = config.limits.max_pairs_per_residue;
    let mut per_residue = vec![0usize; count];
    let mut saturated = BTreeSet::new();
    let mut pairs = Vec::new();

    for pair in rows.into_iter().flatten() {
        if per_residue[pair.i] >= cap || per_residue[pair.j] >= cap {
            if per_residue[pair.i] >= cap {
                saturated.insert(pair.i);
            }
            if per_residue[pair.j] >= cap {
                saturated.insert(pair.j);
            }
            continue;
        }
        per_residue[pair.i] += 1;
        per_residue[pair.j] += 1;
        pairs.push(pair);
    }

    for index in &saturated {
        warn!(
            nucleotide = index,
            cap, "Pair list truncated: nucleotide reached its pair quota."
        );
    }

    info!(
        pairs = pairs.len(),
        multiplet_members = per_residue.iter().filter(|&&n| n > 1).count(),
        "All-pairs enumeration finished."
    );
    Ok(pairs)
}
