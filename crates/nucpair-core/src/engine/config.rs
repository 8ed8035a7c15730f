use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid window for '{name}': min {min} is greater than max {max}")]
    InvalidWindow {
        name: &'static str,
        min: f64,
        max: f64,
    },
    #[error("Parameter '{name}' must be positive, got {value}")]
    NonPositive { name: &'static str, value: f64 },
    #[error("Parameter '{name}' must not be negative, got {value}")]
    Negative { name: &'static str, value: f64 },
    #[error("At least one hydrogen-bond element is required")]
    NoHBondElements,
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
}

/// Closed interval `[min, max]` used for every range check.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Window {
    pub min: f64,
    pub max: f64,
}

impl Window {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    fn validate(&self, name: &'static str) -> Result<(), ConfigError> {
        if self.min <= self.max {
            Ok(())
        } else {
            Err(ConfigError::InvalidWindow {
                name,
                min: self.min,
                max: self.max,
            })
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HBondParams {
    /// Shortest donor-acceptor distance accepted as a candidate.
    pub lower: f64,
    /// Longest donor-acceptor distance accepted as a candidate.
    pub dist1: f64,
    /// Upper bound of the promotion pass; 0 disables it.
    pub dist2: f64,
    /// Element symbols whose atoms may take part in hydrogen bonds.
    pub elements: Vec<char>,
    /// Distance window of a bond counted towards the pair score.
    pub good_bond: Window,
}

impl Default for HBondParams {
    fn default() -> Self {
        Self {
            lower: 1.8,
            dist1: 4.0,
            dist2: 0.0,
            elements: vec!['N', 'O'],
            good_bond: Window::new(2.5, 3.5),
        }
    }
}

impl HBondParams {
    pub fn is_eligible_element(&self, element: char) -> bool {
        self.elements
            .iter()
            .any(|e| e.eq_ignore_ascii_case(&element))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PairWindows {
    pub dorg: Window,
    pub d_v: Window,
    pub plane_angle: Window,
    pub d_nn: Window,
    /// Largest ring overlap area (A^2) still considered a pair rather than a stack.
    pub max_overlap: f64,
    /// Minimum number of base-base hydrogen bonds; 0 skips the check.
    pub min_base_hbonds: usize,
}

impl Default for PairWindows {
    fn default() -> Self {
        Self {
            dorg: Window::new(0.0, 15.0),
            d_v: Window::new(0.0, 2.5),
            plane_angle: Window::new(0.0, 65.0),
            d_nn: Window::new(4.5, 1.0e18),
            max_overlap: 0.01,
            min_base_hbonds: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HelixParams {
    /// Largest origin distance between two pairs stacked in one helix.
    pub helix_break: f64,
    /// Largest O3'-P distance treated as a covalent backbone link.
    pub o3p_upper: f64,
}

impl Default for HelixParams {
    fn default() -> Self {
        Self {
            helix_break: 7.5,
            o3p_upper: 2.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Limits {
    pub max_hbond_candidates: usize,
    pub max_pairs_per_residue: usize,
    pub max_residues: Option<usize>,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_hbond_candidates: 512,
            max_pairs_per_residue: 32,
            max_residues: None,
        }
    }
}

/// Every threshold used by pair finding and helix assembly.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PairingConfig {
    pub hbond: HBondParams,
    pub geometry: PairWindows,
    pub helix: HelixParams,
    pub limits: Limits,
    /// Also enumerate every valid pair, not just the mutual best matches.
    pub all_pairs: bool,
}

impl PairingConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::Toml {
            path: "<string>".to_string(),
            source: e,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let hbond = &self.hbond;
        positive("hbond.lower", hbond.lower)?;
        Window::new(hbond.lower, hbond.dist1).validate("hbond.lower..dist1")?;
        non_negative("hbond.dist2", hbond.dist2)?;
        hbond.good_bond.validate("hbond.good_bond")?;
        if hbond.elements.is_empty() {
            return Err(ConfigError::NoHBondElements);
        }

        let geometry = &self.geometry;
        geometry.dorg.validate("geometry.dorg")?;
        geometry.d_v.validate("geometry.d_v")?;
        geometry.plane_angle.validate("geometry.plane_angle")?;
        geometry.d_nn.validate("geometry.d_nn")?;
        non_negative("geometry.max_overlap", geometry.max_overlap)?;

        positive("helix.helix_break", self.helix.helix_break)?;
        positive("helix.o3p_upper", self.helix.o3p_upper)?;

        positive(
            "limits.max_hbond_candidates",
            self.limits.max_hbond_candidates as f64,
        )?;
        positive(
            "limits.max_pairs_per_residue",
            self.limits.max_pairs_per_residue as f64,
        )?;
        Ok(())
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { name, value })
    }
}

fn non_negative(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { name, value })
    }
}

/// Fluent construction of a [`PairingConfig`] starting from the defaults.
#[derive(Default)]
pub struct PairingConfigBuilder {
    config: PairingConfig,
}

impl PairingConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hbond_distance(mut self, lower: f64, upper: f64) -> Self {
        self.config.hbond.lower = lower;
        self.config.hbond.dist1 = upper;
        self
    }
    pub fn hbond_promotion_cutoff(mut self, dist2: f64) -> Self {
        self.config.hbond.dist2 = dist2;
        self
    }
    pub fn hbond_elements(mut self, elements: Vec<char>) -> Self {
        self.config.hbond.elements = elements;
        self
    }
    pub fn good_hbond_window(mut self, min: f64, max: f64) -> Self {
        self.config.hbond.good_bond = Window::new(min, max);
        self
    }
    pub fn dorg_window(mut self, min: f64, max: f64) -> Self {
        self.config.geometry.dorg = Window::new(min, max);
        self
    }
    pub fn vertical_offset_window(mut self, min: f64, max: f64) -> Self {
        self.config.geometry.d_v = Window::new(min, max);
        self
    }
    pub fn plane_angle_window(mut self, min: f64, max: f64) -> Self {
        self.config.geometry.plane_angle = Window::new(min, max);
        self
    }
    pub fn glycosidic_distance_window(mut self, min: f64, max: f64) -> Self {
        self.config.geometry.d_nn = Window::new(min, max);
        self
    }
    pub fn max_overlap(mut self, area: f64) -> Self {
        self.config.geometry.max_overlap = area;
        self
    }
    pub fn min_base_hbonds(mut self, count: usize) -> Self {
        self.config.geometry.min_base_hbonds = count;
        self
    }
    pub fn helix_break(mut self, distance: f64) -> Self {
        self.config.helix.helix_break = distance;
        self
    }
    pub fn o3p_upper(mut self, distance: f64) -> Self {
        self.config.helix.o3p_upper = distance;
        self
    }
    pub fn max_hbond_candidates(mut self, count: usize) -> Self {
        self.config.limits.max_hbond_candidates = count;
        self
    }
    pub fn max_pairs_per_residue(mut self, count: usize) -> Self {
        self.config.limits.max_pairs_per_residue = count;
        self
    }
    pub fn max_residues(mut self, count: usize) -> Self {
        self.config.limits.max_residues = Some(count);
        self
    }
    pub fn all_pairs(mut self, enabled: bool) -> Self {
        self.config.all_pairs = enabled;
        self
    }

    pub fn build(self) -> Result<PairingConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
