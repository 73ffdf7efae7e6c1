//! Geometric cutoffs for interaction detection.

use crate::error::PlinteractError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Radius around the ligand centroid used to pre-select protein atoms (Å)
pub const POCKET_RADIUS: f64 = 18.0;
/// Atoms closer than this are considered covalently bonded in ring perception (Å)
pub const COVALENT_BOND_DIST: f64 = 1.65;
/// Donor-acceptor heavy atom cutoff (Å)
pub const HYDROGEN_BOND_DIST: f64 = 3.5;
/// Ionic interaction cutoff between charge centers (Å)
pub const SALT_BRIDGE_DIST: f64 = 4.0;
/// Ring centroid to ring centroid cutoff (Å)
pub const PI_STACKING_DIST: f64 = 5.5;
/// Cation to ring centroid cutoff (Å)
pub const PI_CATION_DIST: f64 = 6.0;
/// Halogen to acceptor cutoff (Å)
pub const HALOGEN_BOND_DIST: f64 = 3.5;
/// Carbon-carbon cutoff (Å)
pub const HYDROPHOBIC_CONTACT_DIST: f64 = 4.0;
/// Metal to coordinating atom cutoff (Å)
pub const METAL_COORDINATION_DIST: f64 = 3.0;
/// Maximum deviation from coplanar rings for parallel stacking (degrees)
pub const PARALLEL_ANGLE_MAX: f64 = 30.0;
/// Lower bound of the T-shaped stacking band (degrees)
pub const T_SHAPED_ANGLE_MIN: f64 = 60.0;
/// Upper bound of the T-shaped stacking band (degrees)
pub const T_SHAPED_ANGLE_MAX: f64 = 90.0;

/// All distance (Å) and angle (degrees) cutoffs used by the engine.
///
/// Raising a cutoff makes detection of that interaction type more permissive.
/// Every field has a default, so a TOML file only needs the keys it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Coarse filter radius around the ligand centroid
    pub pocket_radius: f64,
    /// Bond length limit for ligand ring perception
    pub covalent_bond: f64,
    /// Hydrogen bond heavy atom distance
    pub hydrogen_bond: f64,
    /// Charge centroid to ligand atom distance
    pub salt_bridge: f64,
    /// Ring centroid distance for stacking
    pub pi_stacking: f64,
    /// Cation to ring centroid distance
    pub pi_cation: f64,
    /// Halogen to acceptor distance
    pub halogen_bond: f64,
    /// Carbon-carbon distance
    pub hydrophobic: f64,
    /// Metal to ligand or residue atom distance
    pub metal_coordination: f64,
    /// Largest inter-plane angle counted as parallel stacking
    pub parallel_angle_max: f64,
    /// Smallest inter-plane angle counted as T-shaped stacking
    pub t_shaped_angle_min: f64,
    /// Largest inter-plane angle counted as T-shaped stacking
    pub t_shaped_angle_max: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            pocket_radius: POCKET_RADIUS,
            covalent_bond: COVALENT_BOND_DIST,
            hydrogen_bond: HYDROGEN_BOND_DIST,
            salt_bridge: SALT_BRIDGE_DIST,
            pi_stacking: PI_STACKING_DIST,
            pi_cation: PI_CATION_DIST,
            halogen_bond: HALOGEN_BOND_DIST,
            hydrophobic: HYDROPHOBIC_CONTACT_DIST,
            metal_coordination: METAL_COORDINATION_DIST,
            parallel_angle_max: PARALLEL_ANGLE_MAX,
            t_shaped_angle_min: T_SHAPED_ANGLE_MIN,
            t_shaped_angle_max: T_SHAPED_ANGLE_MAX,
        }
    }
}

impl Thresholds {
    /// Read thresholds from a TOML file; missing keys keep their defaults.
    pub fn from_toml_file(path: &Path) -> Result<Self, PlinteractError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse thresholds from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, PlinteractError> {
        Ok(toml::from_str(content)?)
    }

    /// Largest cutoff of the atom-pair tests, used as an early exit.
    pub fn max_pair_cutoff(&self) -> f64 {
        [
            self.hydrogen_bond,
            self.hydrophobic,
            self.halogen_bond,
            self.metal_coordination,
        ]
        .into_iter()
        .fold(0.0, f64::max)
    }

    /// Largest cutoff of any test. Should not exceed [`Thresholds::pocket_radius`].
    pub fn max_cutoff(&self) -> f64 {
        [self.salt_bridge, self.pi_stacking, self.pi_cation]
            .into_iter()
            .fold(self.max_pair_cutoff(), f64::max)
    }
}
