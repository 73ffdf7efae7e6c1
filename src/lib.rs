#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

//! # Plinteract Library
//!
//! This library detects non-covalent interactions between a ligand residue and
//! the surrounding protein: hydrogen bonds, salt bridges, ring stacking,
//! halogen bonds, metal coordination and hydrophobic contacts. Structures are
//! read from PDB or mmCIF files, and docked poses from SDF or MOL2.
//!
//! Results are plain Rust values that can be exported as Polars DataFrames or
//! JSON.

/// Ligand candidate listing
pub mod candidates;
pub mod config;
pub mod contacts;
pub mod error;
pub mod geometry;
pub mod molfile;
pub mod residues;
/// Atoms, residues and structure snapshots
pub mod structure;
mod utils;

// Re-export key public types
pub use candidates::{find_residue_by_name, list_ligand_candidates};
pub use config::Thresholds;
pub use contacts::{
    analyze, analyze_with, sorted_for_table, AnalysisResult, Interaction, InteractionType,
};
pub use error::{PlinteractError, Result};
pub use molfile::{parse_mol2, parse_sdf, StructureFormat};
pub use residues::{ChemistryTables, Plane};
pub use structure::{Atom, ResidueOption, ResidueSelector, Structure};
pub use utils::{
    interactions_to_df, load_model, load_structure, run_with_threads, write_interactions,
    DataFrameFileType,
};

use pdbtbx::PDB;
use tracing::debug;

/// Detect interactions between a ligand residue and the protein of a parsed structure.
///
/// # Arguments
///
/// * `pdb` - Reference to a PDB structure; only the first model is used
/// * `selector` - Chain, residue number and residue name of the ligand
/// * `thresholds` - Distance and angle cutoffs
///
/// # Returns
///
/// The deduplicated interactions and the ligand centroid. An empty result is
/// returned when the selector matches no atom.
///
/// # Example
///
/// ```no_run
/// use plinteract::{get_contacts, load_model, ResidueSelector, Thresholds};
///
/// let (pdb, _errors) = load_model("path/to/complex.pdb").unwrap();
/// let ligand = ResidueSelector::new("A", 401, "ATP");
/// let result = get_contacts(&pdb, &ligand, &Thresholds::default());
/// println!("Found {} interactions", result.interactions.len());
/// ```
pub fn get_contacts(
    pdb: &PDB,
    selector: &ResidueSelector,
    thresholds: &Thresholds,
) -> AnalysisResult {
    let structure = Structure::from_pdb(pdb);
    debug!(
        "Loaded {} atoms in {} residues",
        structure.atom_count(),
        structure.residues().len()
    );
    analyze_with(
        &structure,
        selector,
        &ChemistryTables::STANDARD,
        thresholds,
    )
}
