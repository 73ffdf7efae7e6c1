use super::rings::closest_atom;
use super::structs::{Detection, InteractionType};
use crate::config::Thresholds;
use crate::geometry::centroid;
use crate::residues::{select_named, ChemistryTables, Plane};
use crate::structure::Atom;
use nalgebra as na;

/// Sign of a charged group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Charge {
    /// Arg, Lys and His side chains
    Positive,
    /// Asp and Glu carboxylates
    Negative,
}

/// The ionizable group of a residue, reduced to the centroid of its atoms.
#[derive(Debug, Clone)]
pub struct ChargedGroup<'a> {
    /// Sign of the group
    pub charge: Charge,
    /// Group atoms present in the residue
    pub atoms: Vec<&'a Atom>,
    /// Centroid of `atoms`
    pub center: na::Point3<f64>,
}

impl ChargedGroup<'_> {
    /// Group atom closest to `point`, used to represent the group in results.
    pub fn closest_atom(&self, point: &na::Point3<f64>) -> &Atom {
        closest_atom(&self.atoms, point)
    }
}

/// Collect the charged groups of one residue that are charged at pH 7.0.
///
/// Groups with none of their atoms present are skipped.
pub fn charged_groups<'a>(
    residue_atoms: &[&'a Atom],
    tables: &ChemistryTables,
) -> Vec<ChargedGroup<'a>> {
    let Some(resn) = residue_atoms.first().map(|a| a.resn.as_str()) else {
        return Vec::new();
    };

    [
        (Charge::Positive, tables.positive_center(resn)),
        (Charge::Negative, tables.negative_center(resn)),
    ]
    .into_iter()
    .filter_map(|(charge, names)| {
        let atoms = select_named(residue_atoms, names?);
        if atoms.is_empty() {
            return None;
        }
        let points: Vec<na::Point3<f64>> = atoms.iter().map(|a| a.position).collect();
        Some(ChargedGroup {
            charge,
            center: centroid(&points),
            atoms,
        })
    })
    .collect()
}

/// Search for a salt bridge between a residue's charged group and a ligand atom.
///
/// Positive groups pair with ligand O/S/P atoms, negative groups with ligand
/// nitrogens or amine-like atom names. The distance is taken from the group
/// centroid.
pub fn find_salt_bridge(
    group: &ChargedGroup,
    ligand: &Atom,
    tables: &ChemistryTables,
    thresholds: &Thresholds,
) -> Option<Detection> {
    let is_partner = match group.charge {
        Charge::Positive => tables.is_anionic(ligand),
        Charge::Negative => tables.is_cationic(ligand),
    };
    if !is_partner {
        return None;
    }

    let dist = na::distance(&group.center, &ligand.position);
    if dist <= thresholds.salt_bridge {
        Some(Detection {
            interaction: InteractionType::SaltBridge,
            distance: dist,
            angle: None,
        })
    } else {
        None
    }
}

/// Identify cation-pi interactions between a positive residue group and a
/// ligand ring. These are reported as ring stacking contacts.
pub fn find_cation_pi(
    group: &ChargedGroup,
    ring: &Plane,
    thresholds: &Thresholds,
) -> Option<Detection> {
    if group.charge != Charge::Positive {
        return None;
    }
    let dist = ring.point_dist(&group.center);
    if dist <= thresholds.pi_cation {
        Some(Detection {
            interaction: InteractionType::PiStacking,
            distance: dist,
            angle: None,
        })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contacts::fixtures::{lig, prot};

    fn arginine() -> Vec<Atom> {
        vec![
            prot("CD", "C", "ARG", 52, 0.0, 0.0, 6.0),
            prot("NE", "N", "ARG", 52, 1.2, 0.0, 5.3),
            prot("CZ", "C", "ARG", 52, 1.2, 0.0, 4.0),
            prot("NH1", "N", "ARG", 52, 0.0, 0.0, 3.3),
            prot("NH2", "N", "ARG", 52, 2.4, 0.0, 3.3),
        ]
    }

    #[test]
    fn test_charged_groups() {
        let tables = ChemistryTables::STANDARD;
        let arg = arginine();
        let refs: Vec<&Atom> = arg.iter().collect();
        let groups = charged_groups(&refs, &tables);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].charge, Charge::Positive);
        assert_eq!(groups[0].atoms.len(), 3);
        assert!((groups[0].center - na::Point3::new(1.2, 0.0, 3.9666666666666663)).norm() < 1e-9);

        let ala = [prot("CB", "C", "ALA", 1, 0.0, 0.0, 0.0)];
        let refs: Vec<&Atom> = ala.iter().collect();
        assert!(charged_groups(&refs, &tables).is_empty());
        assert!(charged_groups(&[], &tables).is_empty());
    }

    #[test]
    fn test_salt_bridge_partners() {
        let tables = ChemistryTables::STANDARD;
        let thresholds = Thresholds::default();
        let arg = arginine();
        let refs: Vec<&Atom> = arg.iter().collect();
        let group = &charged_groups(&refs, &tables)[0];

        let oxygen = lig("O1P", "O", 0.0, 0.0, 0.5);
        let detection = find_salt_bridge(group, &oxygen, &tables, &thresholds).unwrap();
        assert_eq!(detection.interaction, InteractionType::SaltBridge);
        assert!((detection.distance - na::distance(&group.center, &oxygen.position)).abs() < 1e-12);
        assert_eq!(group.closest_atom(&oxygen.position).name, "NH1");

        // Like charges do not pair
        let amine = lig("N1", "N", 0.0, 0.0, 0.5);
        assert!(find_salt_bridge(group, &amine, &tables, &thresholds).is_none());

        let far = lig("O2", "O", 0.0, 0.0, -5.0);
        assert!(find_salt_bridge(group, &far, &tables, &thresholds).is_none());
    }

    #[test]
    fn test_negative_group_pairs_with_amine_names() {
        let tables = ChemistryTables::STANDARD;
        let thresholds = Thresholds::default();
        let asp = [
            prot("CG", "C", "ASP", 7, 0.0, 0.0, 0.0),
            prot("OD1", "O", "ASP", 7, 1.1, 0.0, 0.6),
            prot("OD2", "O", "ASP", 7, -1.1, 0.0, 0.6),
        ];
        let refs: Vec<&Atom> = asp.iter().collect();
        let groups = charged_groups(&refs, &tables);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].charge, Charge::Negative);

        // Carbon named like an amine still counts
        let odd = lig("CNH", "C", 0.0, 0.0, 3.5);
        assert!(find_salt_bridge(&groups[0], &odd, &tables, &thresholds).is_some());
        let carbon = lig("C1", "C", 0.0, 0.0, 3.5);
        assert!(find_salt_bridge(&groups[0], &carbon, &tables, &thresholds).is_none());
    }

    #[test]
    fn test_cation_pi_needs_positive_group() {
        let tables = ChemistryTables::STANDARD;
        let thresholds = Thresholds::default();
        let lys = [prot("NZ", "N", "LYS", 20, 0.0, 0.0, 4.0)];
        let refs: Vec<&Atom> = lys.iter().collect();
        let group = &charged_groups(&refs, &tables)[0];
        let ring = Plane {
            center: na::Point3::origin(),
            normal: na::Vector3::z(),
        };
        let detection = find_cation_pi(group, &ring, &thresholds).unwrap();
        assert_eq!(detection.interaction, InteractionType::PiStacking);
        assert!((detection.distance - 4.0).abs() < 1e-12);

        let negative = ChargedGroup {
            charge: Charge::Negative,
            atoms: group.atoms.clone(),
            center: group.center,
        };
        assert!(find_cation_pi(&negative, &ring, &thresholds).is_none());
    }
}
