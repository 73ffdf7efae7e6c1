use super::structs::Interaction;
use std::collections::HashMap;

/// Keep one interaction per unordered atom pair.
///
/// When several types apply to the same pair, the one with the highest
/// [`InteractionType::priority`](super::InteractionType::priority) wins; among
/// equal priorities the earliest record is kept. The output follows the order
/// in which each pair first appeared.
pub fn deduplicate(interactions: Vec<Interaction>) -> Vec<Interaction> {
    let mut slots: HashMap<(usize, usize), usize> = HashMap::new();
    let mut kept: Vec<Interaction> = Vec::with_capacity(interactions.len());

    for intxn in interactions {
        match slots.get(&intxn.atom_pair()) {
            Some(&slot) => {
                if intxn.interaction.priority() > kept[slot].interaction.priority() {
                    kept[slot] = intxn;
                }
            }
            None => {
                slots.insert(intxn.atom_pair(), kept.len());
                kept.push(intxn);
            }
        }
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contacts::fixtures::{lig, prot};
    use crate::contacts::InteractionType;
    use crate::structure::Atom;

    fn record(id: &str, interaction: InteractionType, ligand: &Atom, protein: &Atom) -> Interaction {
        Interaction {
            id: id.to_string(),
            interaction,
            distance: ligand.distance(protein),
            angle: None,
            ligand: ligand.clone(),
            protein: protein.clone(),
            ligand_point: ligand.position,
            protein_point: protein.position,
        }
    }

    #[test]
    fn test_highest_priority_survives() {
        let mut o = lig("O1", "O", 0.0, 0.0, 0.0);
        o.index = 0;
        let mut n = prot("NH1", "N", "ARG", 52, 0.0, 0.0, 2.9);
        n.index = 1;
        let mut c = prot("CZ", "C", "ARG", 52, 0.0, 1.0, 3.5);
        c.index = 2;

        let kept = deduplicate(vec![
            record("hb-1", InteractionType::HydrogenBond, &o, &n),
            record("hp-2", InteractionType::Hydrophobic, &o, &c),
            record("sb-3", InteractionType::SaltBridge, &o, &n),
            record("pi-4", InteractionType::PiStacking, &o, &n),
        ]);
        let ids: Vec<&str> = kept.iter().map(|x| x.id.as_str()).collect();
        assert_eq!(ids, vec!["sb-3", "hp-2"]);
    }

    #[test]
    fn test_equal_priority_keeps_first() {
        let mut zn = lig("ZN", "ZN", 0.0, 0.0, 0.0);
        zn.index = 0;
        let mut o = prot("OD1", "O", "ASP", 3, 0.0, 0.0, 2.1);
        o.index = 5;

        let kept = deduplicate(vec![
            record("mc-1", InteractionType::MetalCoordination, &zn, &o),
            record("xb-2", InteractionType::HalogenBond, &zn, &o),
        ]);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, "mc-1");
        assert!(deduplicate(Vec::new()).is_empty());
    }
}
