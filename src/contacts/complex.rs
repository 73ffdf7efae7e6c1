use super::{
    aromatic_ring, charged_groups, deduplicate, find_cation_pi, find_halogen_bond,
    find_hydrogen_bond, find_hydrophobic_contact, find_metal_coordination, find_pi_cation,
    find_pi_stacking, find_rings, find_salt_bridge, AnalysisResult, Charge, Detection,
    Interaction, InteractionType, Ring,
};
use crate::config::Thresholds;
use crate::geometry::{centroid, distance_squared};
use crate::residues::ChemistryTables;
use crate::structure::{Atom, ResidueSelector, Structure};
use nalgebra as na;
use rstar::{primitives::GeomWithData, RTree};
use std::collections::HashMap;
use tracing::{debug, trace};

type IndexedPoint = GeomWithData<[f64; 3], usize>;

/// The workhorse struct for identifying interactions around one ligand
pub struct InteractionComplex<'a> {
    /// The residue analyzed as ligand
    pub selector: ResidueSelector,
    /// All atoms of the ligand residue
    pub ligand: Vec<&'a Atom>,
    /// Polymer atoms within the pocket radius of the ligand center
    pub receptor: Vec<&'a Atom>,
    /// Centroid of the ligand atoms
    pub ligand_center: na::Point3<f64>,
    /// Chemistry tables in use
    pub tables: &'a ChemistryTables,
    /// Cutoffs in use
    pub thresholds: &'a Thresholds,

    /// Ligand rings with centers and normals
    rings: Vec<Ring<'a>>,
}

impl<'a> InteractionComplex<'a> {
    /// Split `structure` into the ligand picked by `selector` and the polymer
    /// pocket around it, and perceive the ligand rings.
    pub fn new(
        structure: &'a Structure,
        selector: &ResidueSelector,
        tables: &'a ChemistryTables,
        thresholds: &'a Thresholds,
    ) -> Self {
        // Hetero atoms outside the ligand (waters, ions, other ligands) take no part
        let (ligand, protein): (Vec<&Atom>, Vec<&Atom>) = structure
            .atoms()
            .iter()
            .filter(|a| a.belongs_to(selector) || !a.hetero)
            .partition(|a| a.belongs_to(selector));

        let points: Vec<na::Point3<f64>> = ligand.iter().map(|a| a.position).collect();
        let ligand_center = centroid(&points);
        let receptor = if ligand.is_empty() {
            Vec::new()
        } else {
            pocket_atoms(&protein, &ligand_center, thresholds.pocket_radius)
        };
        debug!(
            "Ligand {selector} has {} atoms; kept {} of {} polymer atoms within {:.1} Å",
            ligand.len(),
            receptor.len(),
            protein.len(),
            thresholds.pocket_radius
        );

        let rings = find_rings(&ligand, thresholds.covalent_bond);

        Self {
            selector: selector.clone(),
            ligand,
            receptor,
            ligand_center,
            tables,
            thresholds,
            rings,
        }
    }

    /// Perceived ligand rings.
    pub fn rings(&self) -> &[Ring<'a>] {
        &self.rings
    }

    /// Pocket atoms grouped by chain and residue number, in structure order.
    fn receptor_residues(&self) -> Vec<Vec<&'a Atom>> {
        let mut index: HashMap<(&str, isize), usize> = HashMap::new();
        let mut residues: Vec<Vec<&Atom>> = Vec::new();
        for &atom in &self.receptor {
            let key = (atom.chain.as_str(), atom.resi);
            match index.get(&key) {
                Some(&i) => residues[i].push(atom),
                None => {
                    index.insert(key, residues.len());
                    residues.push(vec![atom]);
                }
            }
        }
        residues
    }
}

/// Polymer atoms within `radius` of `center`, in input order.
fn pocket_atoms<'a>(atoms: &[&'a Atom], center: &na::Point3<f64>, radius: f64) -> Vec<&'a Atom> {
    let tree: RTree<IndexedPoint> = RTree::bulk_load(
        atoms
            .iter()
            .enumerate()
            .map(|(i, a)| IndexedPoint::new([a.position.x, a.position.y, a.position.z], i))
            .collect(),
    );
    let mut within: Vec<usize> = tree
        .locate_within_distance([center.x, center.y, center.z], radius * radius)
        .map(|p| p.data)
        .collect();
    within.sort_unstable();
    within.into_iter().map(|i| atoms[i]).collect()
}

fn to_interaction(
    detection: Detection,
    ligand: &Atom,
    protein: &Atom,
    ligand_point: na::Point3<f64>,
    protein_point: na::Point3<f64>,
) -> Interaction {
    let intxn = Interaction {
        id: String::new(),
        interaction: detection.interaction,
        distance: detection.distance,
        angle: detection.angle,
        ligand: ligand.clone(),
        protein: protein.clone(),
        ligand_point,
        protein_point,
    };
    trace!("{intxn}");
    intxn
}

/// Trait for calculating ligand-protein interactions.
pub trait Interactions {
    /// Ring and charged-group interactions of each pocket residue with the ligand.
    fn get_residue_contacts(&self) -> Vec<Interaction>;
    /// Atom-atom interactions between the ligand and the pocket.
    fn get_atomic_contacts(&self) -> Vec<Interaction>;
}

impl Interactions for InteractionComplex<'_> {
    fn get_residue_contacts(&self) -> Vec<Interaction> {
        let mut contacts = Vec::new();

        for residue in self.receptor_residues() {
            if let Some(ring) = aromatic_ring(&residue, self.tables) {
                // Ring-ring stacking
                for lig_ring in &self.rings {
                    if let Some(hit) = find_pi_stacking(&ring.plane, &lig_ring.plane, self.thresholds)
                    {
                        contacts.push(to_interaction(
                            hit,
                            lig_ring.closest_atom(&ring.plane.center),
                            ring.closest_atom(&lig_ring.center()),
                            lig_ring.center(),
                            ring.plane.center,
                        ));
                    }
                }

                // Ring to ligand cation
                for &atom in &self.ligand {
                    if let Some(hit) = find_pi_cation(&ring.plane, atom, self.tables, self.thresholds)
                    {
                        contacts.push(to_interaction(
                            hit,
                            atom,
                            ring.closest_atom(&atom.position),
                            atom.position,
                            ring.plane.center,
                        ));
                    }
                }
            }

            for group in charged_groups(&residue, self.tables) {
                if group.charge == Charge::Positive {
                    for lig_ring in &self.rings {
                        if let Some(hit) = find_cation_pi(&group, &lig_ring.plane, self.thresholds) {
                            contacts.push(to_interaction(
                                hit,
                                lig_ring.closest_atom(&group.center),
                                group.closest_atom(&lig_ring.center()),
                                lig_ring.center(),
                                group.center,
                            ));
                        }
                    }
                }

                for &atom in &self.ligand {
                    if let Some(hit) = find_salt_bridge(&group, atom, self.tables, self.thresholds) {
                        contacts.push(to_interaction(
                            hit,
                            atom,
                            group.closest_atom(&atom.position),
                            atom.position,
                            group.center,
                        ));
                    }
                }
            }
        }

        contacts
    }

    fn get_atomic_contacts(&self) -> Vec<Interaction> {
        let max_dist = self.thresholds.max_pair_cutoff();
        let max_dist_squared = max_dist * max_dist;
        let mut contacts = Vec::new();

        for &l in &self.ligand {
            for &p in &self.receptor {
                if distance_squared(&l.position, &p.position) > max_dist_squared {
                    continue;
                }
                let dist = l.distance(p);

                let found = [
                    find_hydrogen_bond(l, p, dist, self.tables, self.thresholds),
                    find_halogen_bond(l, p, dist, self.tables, self.thresholds),
                    find_hydrophobic_contact(l, p, dist, self.thresholds),
                    find_metal_coordination(l, p, dist, self.tables, self.thresholds),
                ];
                for interaction in found.into_iter().flatten() {
                    let hit = Detection {
                        interaction,
                        distance: dist,
                        angle: None,
                    };
                    contacts.push(to_interaction(hit, l, p, l.position, p.position));
                }
            }
        }

        contacts
    }
}

/// Detect all interactions between the selected ligand residue and the protein
/// using the standard chemistry tables and default thresholds.
pub fn analyze(structure: &Structure, selector: &ResidueSelector) -> AnalysisResult {
    analyze_with(
        structure,
        selector,
        &ChemistryTables::STANDARD,
        &Thresholds::default(),
    )
}

/// Detect all interactions between the selected ligand residue and the protein.
///
/// A selector that matches no atoms yields an empty result centered on the
/// origin. At most one interaction is reported per ligand-protein atom pair.
pub fn analyze_with(
    structure: &Structure,
    selector: &ResidueSelector,
    tables: &ChemistryTables,
    thresholds: &Thresholds,
) -> AnalysisResult {
    let i_complex = InteractionComplex::new(structure, selector, tables, thresholds);
    if i_complex.ligand.is_empty() {
        debug!("No atoms found for ligand {selector}");
        return AnalysisResult::empty();
    }

    let mut raw = i_complex.get_residue_contacts();
    debug!("Found {} ring and charged-group contacts", raw.len());
    let atomic = i_complex.get_atomic_contacts();
    debug!("Found {} atom-atom contacts", atomic.len());
    raw.extend(atomic);

    let mut counter = 0;
    for intxn in raw.iter_mut() {
        counter += 1;
        intxn.id = format!("{}-{counter}", intxn.interaction.id_prefix());
    }

    let interactions = deduplicate(raw);
    debug!(
        "Kept {} interactions after collapsing {} duplicates",
        interactions.len(),
        counter - interactions.len()
    );

    AnalysisResult {
        interactions,
        ligand_center: i_complex.ligand_center,
    }
}
