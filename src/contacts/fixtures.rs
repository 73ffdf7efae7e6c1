//! Hand-built atoms for unit tests.

use crate::structure::{Atom, ResidueSelector};
use nalgebra as na;

pub(crate) const LIGAND_CHAIN: &str = "L";
pub(crate) const LIGAND_RESN: &str = "LIG";
pub(crate) const LIGAND_RESI: isize = 900;

pub(crate) fn ligand_selector() -> ResidueSelector {
    ResidueSelector::new(LIGAND_CHAIN, LIGAND_RESI, LIGAND_RESN)
}

/// Ligand atom; the index is reassigned by `Structure::new`.
pub(crate) fn lig(name: &str, element: &str, x: f64, y: f64, z: f64) -> Atom {
    Atom::new(
        0,
        name,
        element,
        na::Point3::new(x, y, z),
        LIGAND_RESN,
        LIGAND_RESI,
        LIGAND_CHAIN,
        true,
    )
}

/// Protein atom on chain A.
pub(crate) fn prot(
    name: &str,
    element: &str,
    resn: &str,
    resi: isize,
    x: f64,
    y: f64,
    z: f64,
) -> Atom {
    Atom::new(0, name, element, na::Point3::new(x, y, z), resn, resi, "A", false)
}

/// Regular polygon of ligand carbons in the xy plane, centered on the origin.
pub(crate) fn polygon(n: usize, bond: f64, offset: usize) -> Vec<Atom> {
    let radius = if n > 1 {
        bond / (2.0 * (std::f64::consts::PI / n as f64).sin())
    } else {
        0.0
    };
    (0..n)
        .map(|i| {
            let theta = 2.0 * std::f64::consts::PI * i as f64 / n as f64;
            let mut atom = lig(
                &format!("C{}", i + 1),
                "C",
                radius * theta.cos(),
                radius * theta.sin(),
                0.0,
            );
            atom.index = offset + i;
            atom
        })
        .collect()
}

/// Phenylalanine side-chain ring atoms, named in ring order, as a hexagon of
/// radius 1.4 Å centered on `center` and lying in the plane spanned by `u` and `v`.
pub(crate) fn phe_ring(
    resi: isize,
    center: na::Point3<f64>,
    u: na::Vector3<f64>,
    v: na::Vector3<f64>,
) -> Vec<Atom> {
    let names = ["CG", "CD1", "CE1", "CZ", "CE2", "CD2"];
    let (u, v) = (u.normalize(), v.normalize());
    names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let theta = 2.0 * std::f64::consts::PI * i as f64 / 6.0;
            let p = center + (u * theta.cos() + v * theta.sin()) * 1.4;
            prot(name, "C", "PHE", resi, p.x, p.y, p.z)
        })
        .collect()
}
