use phf::{Map, Set, phf_map, phf_set};

/// Hydrogen-bonding capability of an atom within its own base or backbone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HBondRole {
    Donor,
    Acceptor,
    /// Can act as either donor or acceptor (e.g., O2').
    Either,
    /// Listed for the base but not meaningful for pairing (the glycosidic N).
    Unknown,
}

impl HBondRole {
    fn code(&self) -> char {
        match self {
            HBondRole::Donor => 'D',
            HBondRole::Acceptor => 'A',
            HBondRole::Either => 'X',
            HBondRole::Unknown => '?',
        }
    }
}

// Keys are "<parent base>:<atom name>".
#[rustfmt::skip]
static BASE_ATOM_ROLES: Map<&'static str, HBondRole> = phf_map! {
    "A:N9" => HBondRole::Unknown, "A:N7" => HBondRole::Acceptor, "A:N6" => HBondRole::Donor,
    "A:N1" => HBondRole::Acceptor, "A:N3" => HBondRole::Acceptor,

    "C:N1" => HBondRole::Unknown, "C:O2" => HBondRole::Acceptor, "C:N3" => HBondRole::Acceptor,
    "C:N4" => HBondRole::Donor,

    "G:N9" => HBondRole::Unknown, "G:N7" => HBondRole::Acceptor, "G:O6" => HBondRole::Acceptor,
    "G:N1" => HBondRole::Donor, "G:N2" => HBondRole::Donor, "G:N3" => HBondRole::Acceptor,

    "I:N9" => HBondRole::Unknown, "I:N7" => HBondRole::Acceptor, "I:O6" => HBondRole::Acceptor,
    "I:N1" => HBondRole::Donor, "I:N3" => HBondRole::Acceptor,

    "T:N1" => HBondRole::Unknown, "T:O2" => HBondRole::Acceptor, "T:N3" => HBondRole::Donor,
    "T:O4" => HBondRole::Acceptor,

    "U:N1" => HBondRole::Unknown, "U:O2" => HBondRole::Acceptor, "U:N3" => HBondRole::Donor,
    "U:O4" => HBondRole::Acceptor,
};

static BACKBONE_ATOM_ROLES: Map<&'static str, HBondRole> = phf_map! {
    "OP1" => HBondRole::Acceptor, "OP2" => HBondRole::Acceptor,
    "O1P" => HBondRole::Acceptor, "O2P" => HBondRole::Acceptor,
    "O5'" => HBondRole::Acceptor, "O4'" => HBondRole::Acceptor,
    "O3'" => HBondRole::Acceptor, "O2'" => HBondRole::Either,
};

// Role pairs that make a chemically sensible donor/acceptor contact.
static DONOR_ACCEPTOR_COMBOS: Set<&'static str> = phf_set! {
    "AD", "DA", "AX", "XA", "DX", "XD", "XX",
};

// Contacts between two of these atoms are never counted as hydrogen bonds.
static NON_PAIRING_ATOMS: Set<&'static str> = phf_set! {
    "OP1", "OP2", "O1P", "O2P", "O3'", "O4'", "O5'", "N7",
};

static WATSON_CRICK_PAIRS: Set<&'static str> = phf_set! {
    "AT", "AU", "TA", "UA", "GC", "CG", "IC", "CI", "XX",
};

/// Ring atoms of a purine, in outline order (the C4-C5 fusion bond is interior).
pub const PURINE_RING_ATOMS: [&str; 9] = ["C4", "N3", "C2", "N1", "C6", "C5", "N7", "C8", "N9"];

/// Ring atoms of a pyrimidine, in outline order.
pub const PYRIMIDINE_RING_ATOMS: [&str; 6] = ["C4", "N3", "C2", "N1", "C6", "C5"];

/// Maps a one-letter base code to the standard base whose chemistry it shares.
///
/// Lowercase codes mark modified nucleotides and map to their parent base.
pub fn parent_base(base_code: char) -> Option<char> {
    match base_code.to_ascii_uppercase() {
        c @ ('A' | 'C' | 'G' | 'I' | 'T' | 'U') => Some(c),
        _ => None,
    }
}

/// Looks up the hydrogen-bonding role of an atom in a base of the given code.
///
/// Backbone atoms are looked up regardless of the base. Returns `None` when the
/// atom is not part of any donor/acceptor table for this base.
pub fn hbond_role(base_code: char, atom_name: &str) -> Option<HBondRole> {
    let atom_name = atom_name.trim();
    if let Some(role) = BACKBONE_ATOM_ROLES.get(atom_name) {
        return Some(*role);
    }
    let parent = parent_base(base_code)?;
    BASE_ATOM_ROLES
        .get(format!("{}:{}", parent, atom_name).as_str())
        .copied()
}

/// Returns true when the two roles form a donor/acceptor contact.
pub fn is_donor_acceptor_pair(role_a: HBondRole, role_b: HBondRole) -> bool {
    let key: String = [role_a.code(), role_b.code()].iter().collect();
    DONOR_ACCEPTOR_COMBOS.contains(key.as_str())
}

/// Returns true when both atoms belong to the phosphate/sugar/N7 group whose
/// mutual contacts are not treated as pairing hydrogen bonds.
pub fn is_non_pairing_contact(atom_a: &str, atom_b: &str) -> bool {
    NON_PAIRING_ATOMS.contains(atom_a.trim()) && NON_PAIRING_ATOMS.contains(atom_b.trim())
}

/// Checks whether two base codes form a canonical Watson-Crick combination.
pub fn is_watson_crick_pair(base_a: char, base_b: char) -> bool {
    let key: String = [base_a.to_ascii_uppercase(), base_b.to_ascii_uppercase()]
        .iter()
        .collect();
    WATSON_CRICK_PAIRS.contains(key.as_str())
}
