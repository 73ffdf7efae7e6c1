use super::rings::closest_atom;
use super::structs::{Detection, InteractionType};
use crate::config::Thresholds;
use crate::residues::{select_named, ChemistryTables, Plane};
use crate::structure::Atom;
use nalgebra as na;

/// Aromatic side-chain ring of a protein residue.
#[derive(Debug, Clone)]
pub struct ResidueRing<'a> {
    /// Ring atoms in ring order
    pub atoms: Vec<&'a Atom>,
    /// Plane through the ring atoms
    pub plane: Plane,
}

impl ResidueRing<'_> {
    /// Ring atom closest to `point`.
    pub fn closest_atom(&self, point: &na::Point3<f64>) -> &Atom {
        closest_atom(&self.atoms, point)
    }
}

/// Return the aromatic ring of a residue, if it is aromatic and at least three
/// ring atoms are present.
pub fn aromatic_ring<'a>(
    residue_atoms: &[&'a Atom],
    tables: &ChemistryTables,
) -> Option<ResidueRing<'a>> {
    let names = tables.aromatic_plane(&residue_atoms.first()?.resn)?;
    let atoms = select_named(residue_atoms, names);
    let points: Vec<na::Point3<f64>> = atoms.iter().map(|a| a.position).collect();
    let plane = Plane::from_points(&points)?;
    Some(ResidueRing { atoms, plane })
}

/// Identify pi-stacking between a protein ring and a ligand ring.
///
/// Rings within [`Thresholds::pi_stacking`] stack if their planes are roughly
/// parallel or within the T-shaped angle band. Rings without a defined
/// orientation never stack.
pub fn find_pi_stacking(
    protein_ring: &Plane,
    ligand_ring: &Plane,
    thresholds: &Thresholds,
) -> Option<Detection> {
    let dist = na::distance(&protein_ring.center, &ligand_ring.center);
    if dist > thresholds.pi_stacking
        || !protein_ring.has_orientation()
        || !ligand_ring.has_orientation()
    {
        return None;
    }

    let angle = protein_ring.dihedral(ligand_ring);
    let parallel =
        angle <= thresholds.parallel_angle_max || 180.0 - angle <= thresholds.parallel_angle_max;
    let t_shaped = (thresholds.t_shaped_angle_min..=thresholds.t_shaped_angle_max).contains(&angle);

    if parallel || t_shaped {
        Some(Detection {
            interaction: InteractionType::PiStacking,
            distance: dist,
            angle: Some(angle),
        })
    } else {
        None
    }
}

/// Identify cation-pi interactions between a protein ring and a ligand cation.
pub fn find_pi_cation(
    protein_ring: &Plane,
    ligand: &Atom,
    tables: &ChemistryTables,
    thresholds: &Thresholds,
) -> Option<Detection> {
    if !tables.is_cationic(ligand) {
        return None;
    }
    let dist = protein_ring.point_dist(&ligand.position);
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
    use crate::contacts::fixtures::{lig, phe_ring, prot};

    fn plane(center: [f64; 3], normal: [f64; 3]) -> Plane {
        Plane {
            center: na::Point3::new(center[0], center[1], center[2]),
            normal: na::Vector3::new(normal[0], normal[1], normal[2]).normalize(),
        }
    }

    #[test]
    fn test_aromatic_ring_of_phe() {
        let tables = ChemistryTables::STANDARD;
        let atoms = phe_ring(
            30,
            na::Point3::new(1.0, 2.0, 3.0),
            na::Vector3::x(),
            na::Vector3::y(),
        );
        let refs: Vec<&Atom> = atoms.iter().rev().collect();
        let ring = aromatic_ring(&refs, &tables).unwrap();
        assert_eq!(ring.atoms[0].name, "CG");
        assert!((ring.plane.center - na::Point3::new(1.0, 2.0, 3.0)).norm() < 1e-9);
        assert!((ring.plane.normal.z.abs() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_non_aromatic_or_incomplete() {
        let tables = ChemistryTables::STANDARD;
        let leu = [prot("CG", "C", "LEU", 3, 0.0, 0.0, 0.0)];
        let refs: Vec<&Atom> = leu.iter().collect();
        assert!(aromatic_ring(&refs, &tables).is_none());

        let partial = [
            prot("CG", "C", "PHE", 3, 0.0, 0.0, 0.0),
            prot("CD1", "C", "PHE", 3, 1.4, 0.0, 0.0),
        ];
        let refs: Vec<&Atom> = partial.iter().collect();
        assert!(aromatic_ring(&refs, &tables).is_none());
        assert!(aromatic_ring(&[], &tables).is_none());
    }

    #[test]
    fn test_parallel_and_t_shaped_stacking() {
        let thresholds = Thresholds::default();
        let base = plane([0.0, 0.0, 0.0], [0.0, 0.0, 1.0]);

        let sandwich = plane([0.0, 0.0, 3.8], [0.0, 0.0, -1.0]);
        let hit = find_pi_stacking(&base, &sandwich, &thresholds).unwrap();
        assert!(hit.angle.unwrap() < 1e-6);
        assert!((hit.distance - 3.8).abs() < 1e-12);

        let t_shaped = plane([0.0, 0.0, 5.0], [1.0, 0.0, 0.0]);
        let hit = find_pi_stacking(&base, &t_shaped, &thresholds).unwrap();
        assert!((hit.angle.unwrap() - 90.0).abs() < 1e-6);

        // 45 degrees is neither
        let tilted = plane([0.0, 0.0, 4.0], [1.0, 0.0, 1.0]);
        assert!(find_pi_stacking(&base, &tilted, &thresholds).is_none());

        let far = plane([0.0, 0.0, 7.0], [0.0, 0.0, 1.0]);
        assert!(find_pi_stacking(&base, &far, &thresholds).is_none());
    }

    #[test]
    fn test_undefined_orientation_never_stacks() {
        let thresholds = Thresholds::default();
        let base = plane([0.0, 0.0, 0.0], [0.0, 0.0, 1.0]);
        let flat = Plane {
            center: na::Point3::new(0.0, 0.0, 3.5),
            normal: na::Vector3::zeros(),
        };
        assert!(find_pi_stacking(&base, &flat, &thresholds).is_none());
        assert!(find_pi_stacking(&flat, &base, &thresholds).is_none());
    }

    #[test]
    fn test_pi_cation() {
        let tables = ChemistryTables::STANDARD;
        let thresholds = Thresholds::default();
        let ring = plane([0.0, 0.0, 0.0], [0.0, 0.0, 1.0]);

        let amine = lig("N1", "N", 0.0, 0.0, 4.2);
        let hit = find_pi_cation(&ring, &amine, &tables, &thresholds).unwrap();
        assert_eq!(hit.interaction, InteractionType::PiStacking);
        assert!((hit.distance - 4.2).abs() < 1e-12);

        let oxygen = lig("O1", "O", 0.0, 0.0, 4.2);
        assert!(find_pi_cation(&ring, &oxygen, &tables, &thresholds).is_none());
        let far = lig("N2", "N", 0.0, 0.0, 6.5);
        assert!(find_pi_cation(&ring, &far, &tables, &thresholds).is_none());
    }
}
