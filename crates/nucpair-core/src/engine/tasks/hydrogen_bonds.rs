use crate::core::models::atom::AtomRole;
use crate::core::utils::identifiers::{hbond_role, is_donor_acceptor_pair, is_non_pairing_contact};
use crate::engine::config::HBondParams;
use crate::engine::nucleotide::Nucleotide;
use tracing::{trace, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionState {
    Pending,
    Accepted,
    Conflicted,
}

/// Shared-atom signal computed after conflict resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Linkage {
    /// The candidate won arbitration for both of its atoms.
    Sentinel,
    /// Whether an accepted bond uses this candidate's atom in residue A / residue B.
    ///
    /// Arbitration leaves every candidate either accepted or conflicted, so the
    /// accepted bonds are the only ones retained.
    SharedAtoms { donor: bool, acceptor: bool },
}

impl Linkage {
    /// Legacy numeric form: 18 for arbitration winners, otherwise 0, 1 or 2.
    pub fn value(&self) -> u8 {
        match self {
            Linkage::Sentinel => 18,
            Linkage::SharedAtoms { donor, acceptor } => u8::from(*donor) + u8::from(*acceptor),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HBondType {
    Unclassified,
    Standard,
    NonStandard,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HydrogenBond {
    /// Atom name in the first residue.
    pub atom_a: String,
    /// Atom name in the second residue.
    pub atom_b: String,
    pub distance: f64,
    pub state: ResolutionState,
    pub linkage: Linkage,
    /// Accepted only through the second, distance-based pass.
    pub promoted: bool,
    pub bond_type: HBondType,
    /// Both atoms belong to the bases rather than the backbone.
    pub base_to_base: bool,
    index_a: usize,
    index_b: usize,
}

impl HydrogenBond {
    pub fn is_accepted(&self) -> bool {
        self.state == ResolutionState::Accepted
    }

    fn shares_atom_with(&self, other: &HydrogenBond) -> bool {
        self.index_a == other.index_a || self.index_b == other.index_b
    }
}

/// Detects, arbitrates and types the hydrogen bonds between two nucleotides.
///
/// Candidates are enumerated with the first residue's atoms as the outer loop,
/// which fixes the arbitration order. At most `max_candidates` are kept.
pub fn detect(
    a: &Nucleotide,
    b: &Nucleotide,
    params: &HBondParams,
    max_candidates: usize,
) -> Vec<HydrogenBond> {
    if a.hbond_atoms.is_empty() || b.hbond_atoms.is_empty() {
        return Vec::new();
    }

    let mut bonds = initial_candidates(a, b, params);
    if bonds.len() > max_candidates {
        warn!(
            found = bonds.len(),
            limit = max_candidates,
            "Too many hydrogen-bond candidates between two residues; truncating."
        );
        bonds.truncate(max_candidates);
    }
    if bonds.is_empty() {
        return bonds;
    }

    resolve_conflicts(&mut bonds);
    tag_linkage(&mut bonds, params);
    assign_types(&mut bonds, a.base_code, b.base_code);

    trace!(
        candidates = bonds.len(),
        accepted = bonds.iter().filter(|hb| hb.is_accepted()).count(),
        "Hydrogen bonds detected."
    );
    bonds
}

fn initial_candidates(a: &Nucleotide, b: &Nucleotide, params: &HBondParams) -> Vec<HydrogenBond> {
    let mut bonds = Vec::new();
    for (index_a, atom_a) in a.hbond_atoms.iter().enumerate() {
        for (index_b, atom_b) in b.hbond_atoms.iter().enumerate() {
            if is_non_pairing_contact(&atom_a.name, &atom_b.name) {
                continue;
            }
            let distance = (atom_a.position - atom_b.position).norm();
            if distance < params.lower || distance > params.dist1 {
                continue;
            }
            bonds.push(HydrogenBond {
                atom_a: atom_a.name.clone(),
                atom_b: atom_b.name.clone(),
                distance,
                state: ResolutionState::Pending,
                linkage: Linkage::SharedAtoms {
                    donor: false,
                    acceptor: false,
                },
                promoted: false,
                bond_type: HBondType::Unclassified,
                base_to_base: atom_a.role == AtomRole::Base && atom_b.role == AtomRole::Base,
                index_a,
                index_b,
            });
        }
    }
    bonds
}

/// Shortest pending candidate sharing an atom with candidate `k`; equal
/// distances go to the lowest index.
fn shortest_sharing(
    bonds: &[HydrogenBond],
    k: usize,
    same_atom: impl Fn(&HydrogenBond) -> bool,
) -> usize {
    bonds
        .iter()
        .enumerate()
        .filter(|(_, hb)| hb.state == ResolutionState::Pending && same_atom(hb))
        .min_by(|(_, x), (_, y)| x.distance.total_cmp(&y.distance))
        .map_or(k, |(m, _)| m)
}

fn resolve_conflicts(bonds: &mut [HydrogenBond]) {
    loop {
        let mut accepted = None;
        for k in 0..bonds.len() {
            if bonds[k].state != ResolutionState::Pending {
                continue;
            }
            let (atom_a, atom_b) = (bonds[k].index_a, bonds[k].index_b);
            let best_a = shortest_sharing(bonds, k, |hb| hb.index_a == atom_a);
            let best_b = shortest_sharing(bonds, k, |hb| hb.index_b == atom_b);
            if best_a == best_b {
                accepted = Some(best_a);
                break;
            }
        }

        // A pass without a winner leaves the remaining candidates unresolvable.
        let Some(winner) = accepted else {
            break;
        };

        bonds[winner].state = ResolutionState::Accepted;
        let (winner_a, winner_b) = (bonds[winner].index_a, bonds[winner].index_b);
        for hb in bonds.iter_mut() {
            if hb.state == ResolutionState::Pending
                && (hb.index_a == winner_a || hb.index_b == winner_b)
            {
                hb.state = ResolutionState::Conflicted;
            }
        }
    }

    for hb in bonds.iter_mut() {
        if hb.state == ResolutionState::Pending {
            hb.state = ResolutionState::Conflicted;
        }
    }
}

fn tag_linkage(bonds: &mut [HydrogenBond], params: &HBondParams) {
    let linkages: Vec<Linkage> = bonds
        .iter()
        .enumerate()
        .map(|(k, hb)| {
            if hb.is_accepted() {
                return Linkage::Sentinel;
            }
            let mut donor = false;
            let mut acceptor = false;
            for (m, other) in bonds.iter().enumerate() {
                if m == k || !other.is_accepted() {
                    continue;
                }
                donor |= other.index_a == hb.index_a;
                acceptor |= other.index_b == hb.index_b;
            }
            Linkage::SharedAtoms { donor, acceptor }
        })
        .collect();

    for (hb, linkage) in bonds.iter_mut().zip(linkages) {
        hb.linkage = linkage;
        if linkage != Linkage::Sentinel
            && hb.distance >= params.lower
            && hb.distance <= params.dist2
        {
            hb.state = ResolutionState::Accepted;
            hb.promoted = true;
        }
    }
}

fn assign_types(bonds: &mut [HydrogenBond], base_a: char, base_b: char) {
    for hb in bonds.iter_mut() {
        hb.bond_type = if !hb.is_accepted() {
            HBondType::Unclassified
        } else {
            match (hbond_role(base_a, &hb.atom_a), hbond_role(base_b, &hb.atom_b)) {
                (Some(role_a), Some(role_b)) if is_donor_acceptor_pair(role_a, role_b) => {
                    HBondType::Standard
                }
                (Some(_), Some(_)) if hb.promoted => HBondType::Unclassified,
                (Some(_), Some(_)) => HBondType::NonStandard,
                _ => HBondType::Unclassified,
            }
        };
    }
}

/// Counts candidate contacts between base atoms, before arbitration.
pub fn count_base_contacts(bonds: &[HydrogenBond]) -> usize {
    bonds.iter().filter(|hb| hb.base_to_base).count()
}

/// At most one accepted bond per atom, unless the promotion pass is enabled.
pub fn accepted_are_exclusive(bonds: &[HydrogenBond]) -> bool {
    let accepted: Vec<_> = bonds.iter().filter(|hb| hb.is_accepted()).collect();
    accepted.iter().enumerate().all(|(k, hb)| {
        accepted
            .iter()
            .skip(k + 1)
            .all(|other| !hb.shares_atom_with(other))
    })
}
