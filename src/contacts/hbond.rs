use super::structs::InteractionType;
use crate::config::Thresholds;
use crate::residues::ChemistryTables;
use crate::structure::Atom;

/// Search for hydrogen bonds between heavy atoms.
///
/// Donor and acceptor roles come from the element alone, in either direction,
/// and no hydrogen positions are required.
pub fn find_hydrogen_bond(
    ligand: &Atom,
    protein: &Atom,
    dist: f64,
    tables: &ChemistryTables,
    thresholds: &Thresholds,
) -> Option<InteractionType> {
    let is_pair = (tables.is_donor(ligand) && tables.is_acceptor(protein))
        || (tables.is_acceptor(ligand) && tables.is_donor(protein));
    if is_pair && dist <= thresholds.hydrogen_bond {
        Some(InteractionType::HydrogenBond)
    } else {
        None
    }
}

/// Search for halogen bonds from a ligand halogen to a protein acceptor.
pub fn find_halogen_bond(
    ligand: &Atom,
    protein: &Atom,
    dist: f64,
    tables: &ChemistryTables,
    thresholds: &Thresholds,
) -> Option<InteractionType> {
    if tables.is_halogen(ligand) && tables.is_acceptor(protein) && dist <= thresholds.halogen_bond
    {
        Some(InteractionType::HalogenBond)
    } else {
        None
    }
}
