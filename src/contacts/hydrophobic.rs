use super::structs::InteractionType;
use crate::config::Thresholds;
use crate::structure::Atom;

/// Search for hydrophobic contacts.
///
/// Any two carbons within [`Thresholds::hydrophobic`] qualify; carbons next to
/// polar groups are not excluded.
pub fn find_hydrophobic_contact(
    ligand: &Atom,
    protein: &Atom,
    dist: f64,
    thresholds: &Thresholds,
) -> Option<InteractionType> {
    if ligand.element == "C" && protein.element == "C" && dist <= thresholds.hydrophobic {
        Some(InteractionType::Hydrophobic)
    } else {
        None
    }
}
