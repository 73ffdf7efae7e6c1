use super::structs::InteractionType;
use crate::config::Thresholds;
use crate::residues::ChemistryTables;
use crate::structure::Atom;

/// Search for metal coordination, with the metal on either side.
pub fn find_metal_coordination(
    ligand: &Atom,
    protein: &Atom,
    dist: f64,
    tables: &ChemistryTables,
    thresholds: &Thresholds,
) -> Option<InteractionType> {
    if (tables.is_metal(ligand) || tables.is_metal(protein))
        && dist <= thresholds.metal_coordination
    {
        Some(InteractionType::MetalCoordination)
    } else {
        None
    }
}
