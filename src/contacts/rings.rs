//! Ring perception for ligands without bond records.
//!
//! Bonds are guessed from interatomic distances, then every 5- and 6-membered
//! cycle reachable from a carbon or nitrogen is collected with a depth-limited
//! search. This does not compute a minimal cycle basis: fused or bridged systems
//! may be incomplete, and dense adjacency can yield overlapping rings.

use crate::residues::Plane;
use crate::structure::Atom;
use nalgebra as na;
use std::collections::HashSet;
use tracing::debug;

const MIN_RING_SIZE: usize = 5;
const MAX_RING_SIZE: usize = 6;

/// A ring of ligand atoms with its centroid and plane normal.
#[derive(Debug, Clone)]
pub struct Ring<'a> {
    /// Member atoms in cycle order
    pub atoms: Vec<&'a Atom>,
    /// Plane fitted through the members
    pub plane: Plane,
}

impl Ring<'_> {
    /// Ring centroid.
    pub fn center(&self) -> na::Point3<f64> {
        self.plane.center
    }

    /// Member atom closest to `point`.
    pub fn closest_atom(&self, point: &na::Point3<f64>) -> &Atom {
        closest_atom(&self.atoms, point)
    }
}

/// Member of `atoms` closest to `point`. `atoms` must not be empty.
pub(crate) fn closest_atom<'a>(atoms: &[&'a Atom], point: &na::Point3<f64>) -> &'a Atom {
    atoms
        .iter()
        .copied()
        .min_by(|a, b| {
            na::distance_squared(&a.position, point)
                .total_cmp(&na::distance_squared(&b.position, point))
        })
        .unwrap_or(atoms[0])
}

/// Neighbor lists of atoms closer than `bond_cutoff` to each other.
pub fn build_adjacency(atoms: &[&Atom], bond_cutoff: f64) -> Vec<Vec<usize>> {
    let cutoff_squared = bond_cutoff * bond_cutoff;
    let mut adjacency = vec![Vec::new(); atoms.len()];
    for i in 0..atoms.len() {
        for j in (i + 1)..atoms.len() {
            if na::distance_squared(&atoms[i].position, &atoms[j].position) < cutoff_squared {
                adjacency[i].push(j);
                adjacency[j].push(i);
            }
        }
    }
    adjacency
}

/// Find the 5- and 6-membered rings of a ligand.
///
/// Each ring is reported once, however many traversals reach it.
pub fn find_rings<'a>(atoms: &[&'a Atom], bond_cutoff: f64) -> Vec<Ring<'a>> {
    let adjacency = build_adjacency(atoms, bond_cutoff);
    let mut seen: HashSet<Vec<usize>> = HashSet::new();
    let mut cycles: Vec<Vec<usize>> = Vec::new();

    for (start, atom) in atoms.iter().enumerate() {
        if !matches!(atom.element.as_str(), "C" | "N") {
            continue;
        }
        let mut path = vec![start];
        let mut on_path = vec![false; atoms.len()];
        on_path[start] = true;
        search_cycles(
            &adjacency,
            start,
            &mut path,
            &mut on_path,
            &mut seen,
            &mut cycles,
        );
    }

    let rings: Vec<Ring> = cycles
        .into_iter()
        .filter_map(|cycle| {
            let members: Vec<&Atom> = cycle.iter().map(|&i| atoms[i]).collect();
            let points: Vec<na::Point3<f64>> = members.iter().map(|a| a.position).collect();
            Plane::from_points(&points).map(|plane| Ring {
                atoms: members,
                plane,
            })
        })
        .collect();
    debug!("Perceived {} rings in {} ligand atoms", rings.len(), atoms.len());
    rings
}

fn search_cycles(
    adjacency: &[Vec<usize>],
    start: usize,
    path: &mut Vec<usize>,
    on_path: &mut [bool],
    seen: &mut HashSet<Vec<usize>>,
    cycles: &mut Vec<Vec<usize>>,
) {
    let current = path[path.len() - 1];
    if path.len() >= MIN_RING_SIZE && adjacency[current].contains(&start) {
        let mut key = path.clone();
        key.sort_unstable();
        if seen.insert(key) {
            cycles.push(path.clone());
        }
    }
    if path.len() >= MAX_RING_SIZE {
        return;
    }
    for &next in &adjacency[current] {
        if on_path[next] {
            continue;
        }
        path.push(next);
        on_path[next] = true;
        search_cycles(adjacency, start, path, on_path, seen, cycles);
        on_path[next] = false;
        path.pop();
    }
}
