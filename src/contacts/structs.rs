use crate::structure::Atom;
use core::fmt;
use nalgebra as na;
use serde::Serialize;
use std::collections::BTreeMap;

/// Interaction categories, in the order used for tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum InteractionType {
    /// Donor and acceptor heavy atoms within hydrogen bond range
    HydrogenBond,
    /// Charged residue group and oppositely charged ligand atom
    SaltBridge,
    /// Ring-ring stacking, or a cation over a ring
    PiStacking,
    /// Ligand halogen near a protein acceptor
    HalogenBond,
    /// Metal on either side near a coordinating atom
    MetalCoordination,
    /// Carbon-carbon contact
    Hydrophobic,
}

impl InteractionType {
    /// Rank used when several types apply to the same atom pair; higher wins.
    pub fn priority(&self) -> u8 {
        match self {
            InteractionType::SaltBridge => 3,
            InteractionType::PiStacking => 2,
            InteractionType::HydrogenBond => 1,
            InteractionType::Hydrophobic
            | InteractionType::HalogenBond
            | InteractionType::MetalCoordination => 0,
        }
    }

    /// Short prefix of interaction ids.
    pub fn id_prefix(&self) -> &'static str {
        match self {
            InteractionType::HydrogenBond => "hb",
            InteractionType::SaltBridge => "sb",
            InteractionType::Hydrophobic => "hp",
            InteractionType::PiStacking => "pi",
            InteractionType::HalogenBond => "xb",
            InteractionType::MetalCoordination => "mc",
        }
    }

    /// Human readable name.
    pub fn label(&self) -> &'static str {
        match self {
            InteractionType::HydrogenBond => "Hydrogen Bond",
            InteractionType::SaltBridge => "Salt Bridge",
            InteractionType::Hydrophobic => "Hydrophobic",
            InteractionType::PiStacking => "Pi-Stacking",
            InteractionType::HalogenBond => "Halogen Bond",
            InteractionType::MetalCoordination => "Metal Coordination",
        }
    }
}

impl fmt::Display for InteractionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// An accepted geometric test between two centers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Detection {
    /// Type of the accepted test
    pub interaction: InteractionType,
    /// Distance between the two centers that passed the cutoff
    pub distance: f64,
    /// Inter-plane angle for ring-ring stacking, in degrees
    pub angle: Option<f64>,
}

/// One ligand-protein interaction.
///
/// `distance` is measured between `ligand_point` and `protein_point`. For atom
/// pairs these are the atom positions; for rings and charged groups they are
/// centroids, and the atom fields hold the member atom closest to the partner.
#[derive(Debug, Clone, Serialize)]
pub struct Interaction {
    /// Type prefix and running number, e.g. `hb-3`
    pub id: String,
    /// Interaction type
    #[serde(rename = "type")]
    pub interaction: InteractionType,
    /// Distance in Å
    pub distance: f64,
    /// Inter-plane angle for ring stacking, in degrees
    pub angle: Option<f64>,
    /// Ligand atom
    pub ligand: Atom,
    /// Protein atom
    pub protein: Atom,
    /// Ligand side anchor: atom position or ring centroid
    pub ligand_point: na::Point3<f64>,
    /// Protein side anchor: atom position, ring or charge centroid
    pub protein_point: na::Point3<f64>,
}

impl Interaction {
    /// Unordered atom index pair used for deduplication.
    pub fn atom_pair(&self) -> (usize, usize) {
        let (a, b) = (self.ligand.index, self.protein.index);
        (a.min(b), a.max(b))
    }

    /// Residue label of the protein partner, e.g. `ARG 52 (A)`.
    pub fn residue_label(&self) -> String {
        format!(
            "{} {} ({})",
            self.protein.resn, self.protein.resi, self.protein.chain
        )
    }
}

impl fmt::Display for Interaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ligand [{ligand}] has {intxn:?} with Protein [{protein}] at {dist:.2} Å",
            ligand = self.ligand,
            intxn = self.interaction,
            protein = self.protein,
            dist = self.distance
        )
    }
}

/// Output of one analysis run.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    /// Deduplicated interactions in detection order
    pub interactions: Vec<Interaction>,
    /// Centroid of the ligand atoms
    pub ligand_center: na::Point3<f64>,
}

impl AnalysisResult {
    /// No interactions, centered on the origin.
    pub fn empty() -> Self {
        Self {
            interactions: Vec::new(),
            ligand_center: na::Point3::origin(),
        }
    }

    /// Number of interactions of each type.
    pub fn count_by_type(&self) -> BTreeMap<InteractionType, usize> {
        let mut counts = BTreeMap::new();
        for intxn in &self.interactions {
            *counts.entry(intxn.interaction).or_insert(0) += 1;
        }
        counts
    }
}

/// Sort interactions by type, then by ascending distance.
pub fn sorted_for_table(interactions: &[Interaction]) -> Vec<Interaction> {
    let mut sorted = interactions.to_vec();
    sorted.sort_by(|a, b| {
        a.interaction
            .cmp(&b.interaction)
            .then(a.distance.total_cmp(&b.distance))
    });
    sorted
}
