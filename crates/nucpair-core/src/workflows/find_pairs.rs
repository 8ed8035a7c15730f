use crate::core::models::system::MolecularSystem;
use crate::engine::config::PairingConfig;
use crate::engine::error::EngineError;
use crate::engine::helix::backbone::Backbone;
use crate::engine::helix::checks::RiseWarning;
use crate::engine::helix::{self, HelixSegment};
use crate::engine::nucleotide::NucleotideSet;
use crate::engine::pair::BasePair;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::tasks::pair_check::Classification;
use crate::engine::tasks::{all_pairs, best_pair};
use tracing::{info, instrument};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PairingSummary {
    pub nucleotides: usize,
    pub excluded: usize,
    pub pairs: usize,
    pub watson_crick: usize,
    pub wobble: usize,
    pub other: usize,
    pub helices: usize,
    pub z_form_helices: usize,
    pub flagged_helices: usize,
}

#[derive(Debug, Clone)]
pub struct PairingResult {
    /// Accepted pairs in helix order.
    pub pairs: Vec<BasePair>,
    pub segments: Vec<HelixSegment>,
    pub rise_warnings: Vec<RiseWarning>,
    /// Every valid pair, when `all_pairs` is enabled.
    pub all_pairs: Option<Vec<BasePair>>,
    pub summary: PairingSummary,
}

#[instrument(skip_all, name = "find_pairs_workflow")]
pub fn run(
    system: &MolecularSystem,
    config: &PairingConfig,
    reporter: &ProgressReporter,
) -> Result<PairingResult, EngineError> {
    // === Phase 0: Preparation ===
    reporter.report(Progress::PhaseStart {
        name: "Preparation",
    });
    config.validate()?;
    let nucleotides = NucleotideSet::prepare(system, &config.hbond);
    reporter.report(Progress::PhaseFinish);

    // === Phase 1: Best-pair matching ===
    reporter.report(Progress::PhaseStart {
        name: "Best-Pair Matching",
    });
    let pairs = best_pair::run(&nucleotides, config, reporter)?;
    reporter.report(Progress::PhaseFinish);

    // === Phase 2: All-pairs enumeration (optional) ===
    let all_pairs = if config.all_pairs {
        reporter.report(Progress::PhaseStart {
            name: "All-Pairs Enumeration",
        });
        let listed = all_pairs::run(&nucleotides, config, reporter)?;
        reporter.report(Progress::PhaseFinish);
        Some(listed)
    } else {
        None
    };

    // === Phase 3: Helix assembly ===
    reporter.report(Progress::PhaseStart {
        name: "Helix Assembly",
    });
    let backbone = Backbone::from_nucleotides(&nucleotides);
    let assembly = helix::organize(pairs, &backbone, &config.helix);
    reporter.report(Progress::PhaseFinish);

    // === Phase 4: Summary ===
    let summary = summarize(&nucleotides, &assembly.pairs, &assembly.segments);
    info!(
        pairs = summary.pairs,
        watson_crick = summary.watson_crick,
        helices = summary.helices,
        "Pair finding complete."
    );

    Ok(PairingResult {
        pairs: assembly.pairs,
        segments: assembly.segments,
        rise_warnings: assembly.rise_warnings,
        all_pairs,
        summary,
    })
}

fn summarize(
    nucleotides: &NucleotideSet,
    pairs: &[BasePair],
    segments: &[HelixSegment],
) -> PairingSummary {
    let mut summary = PairingSummary {
        nucleotides: nucleotides.len(),
        excluded: nucleotides.excluded().len(),
        pairs: pairs.len(),
        helices: segments.len(),
        ..PairingSummary::default()
    };
    for pair in pairs {
        match pair.geometry.classification {
            Classification::WatsonCrick => summary.watson_crick += 1,
            Classification::Wobble => summary.wobble += 1,
            Classification::None => summary.other += 1,
        }
    }
    for segment in segments {
        if segment.flags.z_form {
            summary.z_form_helices += 1;
        }
        if segment.flags.has_anomaly() {
            summary.flagged_helices += 1;
        }
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::Atom;
    use crate::core::models::chain::ChainType;
    use crate::engine::config::{ConfigError, PairingConfigBuilder};
    use crate::testing::Duplex;
    use nalgebra::Point3;
    use std::sync::Mutex;

    #[test]
    fn duplex_end_to_end() {
        let mut system = Duplex::b_form(6).build();
        let chain = system.add_chain('W', ChainType::Other);
        let water = system.add_residue(chain, 1, None, "HOH").unwrap();
        system.add_atom_to_residue(water, Atom::new("O", water, Point3::new(30.0, 0.0, 0.0)));

        let result = run(&system, &PairingConfig::default(), &ProgressReporter::new()).unwrap();

        assert_eq!(
            result.summary,
            PairingSummary {
                nucleotides: 12,
                excluded: 1,
                pairs: 6,
                watson_crick: 6,
                wobble: 0,
                other: 0,
                helices: 1,
                z_form_helices: 0,
                flagged_helices: 0,
            }
        );
        assert_eq!(result.segments[0].pairs, vec![0, 1, 2, 3, 4, 5]);
        assert!(result.all_pairs.is_none());
        assert!(result.rise_warnings.is_empty());
    }

    #[test]
    fn all_pairs_are_listed_on_request() {
        let system = Duplex::b_form(3).build();
        let config = PairingConfigBuilder::new().all_pairs(true).build().unwrap();

        let result = run(&system, &config, &ProgressReporter::new()).unwrap();

        assert_eq!(result.all_pairs.map(|p| p.len()), Some(3));
    }

    #[test]
    fn phases_are_reported_in_order() {
        let system = Duplex::b_form(2).build();
        let events = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            if let Progress::PhaseStart { name } = event {
                events.lock().unwrap().push(name);
            }
        }));

        run(&system, &PairingConfig::default(), &reporter).unwrap();
        drop(reporter);

        assert_eq!(
            events.into_inner().unwrap(),
            vec!["Preparation", "Best-Pair Matching", "Helix Assembly"]
        );
    }

    #[test]
    fn invalid_config_is_rejected() {
        let system = Duplex::b_form(2).build();
        let mut config = PairingConfig::default();
        config.geometry.dorg.min = 20.0;

        let result = run(&system, &config, &ProgressReporter::new());

        assert!(matches!(
            result,
            Err(EngineError::Config {
                source: ConfigError::InvalidWindow { .. }
            })
        ));
    }

    #[test]
    fn structure_without_nucleotides_finds_nothing() {
        let result = run(
            &MolecularSystem::new(),
            &PairingConfig::default(),
            &ProgressReporter::new(),
        )
        .unwrap();

        assert!(result.pairs.is_empty());
        assert!(result.segments.is_empty());
        assert_eq!(result.summary, PairingSummary::default());
    }
}
