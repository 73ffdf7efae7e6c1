//! Ligand-protein contact detection.
//!
//! Each submodule holds the geometric test for one family of interactions.
//! [`complex`] assembles them around a selected ligand residue and [`dedup`]
//! collapses multiple hits on the same atom pair.
/// Aromatic side chains: stacking and pi-cation
pub mod aromatic;
/// Ligand-centered analysis
pub mod complex;
/// One interaction per atom pair
pub mod dedup;
/// Hydrogen and halogen bonds
pub mod hbond;
/// Carbon-carbon contacts
pub mod hydrophobic;
/// Charged groups, salt bridges and cation-pi
pub mod ionic;
/// Metal coordination
pub mod metal;
pub mod rings;
/// Result types
pub mod structs;

#[cfg(test)]
pub(crate) mod fixtures;

// Re-exports
pub use aromatic::{aromatic_ring, find_pi_cation, find_pi_stacking, ResidueRing};
pub use complex::{analyze, analyze_with, InteractionComplex, Interactions};
pub use dedup::deduplicate;
pub use hbond::{find_halogen_bond, find_hydrogen_bond};
pub use hydrophobic::find_hydrophobic_contact;
pub use ionic::{charged_groups, find_cation_pi, find_salt_bridge, Charge, ChargedGroup};
pub use metal::find_metal_coordination;
pub use rings::{find_rings, Ring};
pub use structs::*;
