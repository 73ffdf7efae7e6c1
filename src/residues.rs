//! Chemistry lookup tables and the ring [`Plane`].

use crate::geometry::{angle_between_vectors, centroid, is_defined_direction, plane_normal};
use crate::structure::Atom;
use nalgebra as na;

/// Chemical property tables used to classify residues and atoms.
///
/// All names are uppercase. The tables are plain data: build one (usually
/// [`ChemistryTables::STANDARD`]) and hand it to the engine by reference.
#[derive(Debug, Clone, Copy)]
pub struct ChemistryTables {
    /// Ring atoms of aromatic side chains, listed in ring order
    pub aromatic_planes: &'static [(&'static str, &'static [&'static str])],
    /// Atoms forming the positively charged group of a residue
    pub positive_centers: &'static [(&'static str, &'static [&'static str])],
    /// Atoms forming the negatively charged group of a residue
    pub negative_centers: &'static [(&'static str, &'static [&'static str])],
    /// Elements that can donate a hydrogen bond
    pub donor_elements: &'static [&'static str],
    /// Elements that can accept a hydrogen bond
    pub acceptor_elements: &'static [&'static str],
    /// Halogen elements for halogen bonds
    pub halogen_elements: &'static [&'static str],
    /// Elements treated as coordinating metals
    pub metal_elements: &'static [&'static str],
    /// Ligand elements treated as part of an anionic group
    pub anion_elements: &'static [&'static str],
    /// Residue names that are always offered as ligands
    pub common_ligands: &'static [&'static str],
    /// Hetero residues never offered as ligands (solvent, ions, buffers)
    pub ignored_residues: &'static [&'static str],
}

impl ChemistryTables {
    /// Tables for the standard amino acids and common PDB ligands.
    pub const STANDARD: ChemistryTables = ChemistryTables {
        aromatic_planes: &[
            ("PHE", &["CG", "CD1", "CE1", "CZ", "CE2", "CD2"]),
            ("TYR", &["CG", "CD1", "CE1", "CZ", "CE2", "CD2"]),
            (
                "TRP",
                &["CG", "CD1", "NE1", "CE2", "CZ2", "CH2", "CZ3", "CE3", "CD2"],
            ),
            ("HIS", &["CG", "ND1", "CE1", "NE2", "CD2"]),
        ],
        positive_centers: &[
            ("ARG", &["NE", "NH1", "NH2"]),
            ("LYS", &["NZ"]),
            ("HIS", &["ND1", "NE2"]),
        ],
        negative_centers: &[("ASP", &["OD1", "OD2"]), ("GLU", &["OE1", "OE2"])],
        donor_elements: &["N", "O"],
        acceptor_elements: &["N", "O", "S"],
        halogen_elements: &["F", "CL", "BR", "I"],
        metal_elements: &[
            "ZN", "MG", "CA", "FE", "MN", "CU", "CO", "NI", "NA", "K", "CD", "HG",
        ],
        anion_elements: &["O", "S", "P"],
        common_ligands: &[
            "ATP", "ADP", "AMP", "ANP", "GTP", "GDP", "GNP", "NAD", "NAP", "NDP", "FAD", "FMN",
            "HEM", "HEC", "SAM", "SAH", "COA", "ACO", "PLP", "TPP", "BTN", "STI", "LIG", "UNL",
            "DRG", "INH", "MOL",
        ],
        ignored_residues: &[
            "HOH", "WAT", "DOD", "H2O", "NA", "CL", "K", "MG", "CA", "ZN", "MN", "FE", "CU",
            "NI", "CO", "CD", "IOD", "BR", "SO4", "PO4", "NO3", "NH4", "GOL", "EDO", "PEG",
            "PG4", "PGE", "1PE", "ACT", "ACY", "FMT", "DMS", "MPD", "BME", "TRS", "MES", "EPE",
            "CIT", "IMD", "SCN",
        ],
    };

    fn lookup(
        table: &'static [(&'static str, &'static [&'static str])],
        resn: &str,
    ) -> Option<&'static [&'static str]> {
        let resn = resn.to_uppercase();
        table
            .iter()
            .find(|(name, _)| *name == resn)
            .map(|(_, atoms)| *atoms)
    }

    /// Ring atom names of an aromatic residue.
    pub fn aromatic_plane(&self, resn: &str) -> Option<&'static [&'static str]> {
        Self::lookup(self.aromatic_planes, resn)
    }

    /// Atom names of the positively charged group of a residue.
    pub fn positive_center(&self, resn: &str) -> Option<&'static [&'static str]> {
        Self::lookup(self.positive_centers, resn)
    }

    /// Atom names of the negatively charged group of a residue.
    pub fn negative_center(&self, resn: &str) -> Option<&'static [&'static str]> {
        Self::lookup(self.negative_centers, resn)
    }

    /// Hydrogen bond donor by element.
    pub fn is_donor(&self, atom: &Atom) -> bool {
        self.donor_elements.contains(&atom.element.as_str())
    }

    /// Hydrogen bond acceptor by element.
    pub fn is_acceptor(&self, atom: &Atom) -> bool {
        self.acceptor_elements.contains(&atom.element.as_str())
    }

    /// F, Cl, Br or I.
    pub fn is_halogen(&self, atom: &Atom) -> bool {
        self.halogen_elements.contains(&atom.element.as_str())
    }

    /// Metal ion by element.
    pub fn is_metal(&self, atom: &Atom) -> bool {
        self.metal_elements.contains(&atom.element.as_str())
    }

    /// Ligand atom that may carry a negative charge.
    pub fn is_anionic(&self, atom: &Atom) -> bool {
        self.anion_elements.contains(&atom.element.as_str())
    }

    /// Nitrogens, plus any atom whose name looks like an amine or guanidine
    /// nitrogen ("NH" anywhere in the name).
    pub fn is_cationic(&self, atom: &Atom) -> bool {
        atom.element == "N" || atom.name.to_uppercase().contains("NH")
    }

    /// Residue name of a well-known ligand.
    pub fn is_common_ligand(&self, resn: &str) -> bool {
        self.common_ligands.contains(&resn.to_uppercase().as_str())
    }

    /// Solvent, ion or buffer residue name.
    pub fn is_ignored_residue(&self, resn: &str) -> bool {
        self.ignored_residues.contains(&resn.to_uppercase().as_str())
    }
}

impl Default for ChemistryTables {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// The struct for a plane in 3D space
#[derive(Clone, Copy, Debug)]
pub struct Plane {
    /// Centroid of the points the plane was fitted to
    pub center: na::Point3<f64>,
    /// Unit normal, or the zero vector for degenerate input
    pub normal: na::Vector3<f64>,
}

impl Plane {
    /// Fit a plane through ordered points.
    ///
    /// Returns `None` with fewer than three points.
    pub fn from_points(points: &[na::Point3<f64>]) -> Option<Self> {
        if points.len() < 3 {
            return None;
        }
        Some(Self {
            center: centroid(points),
            normal: plane_normal(points),
        })
    }

    /// Calculate the distance from a point to the plane center
    pub fn point_dist(&self, point: &na::Point3<f64>) -> f64 {
        na::distance(&self.center, point)
    }

    /// False for collinear input, where the normal is the zero vector.
    pub fn has_orientation(&self) -> bool {
        is_defined_direction(&self.normal)
    }

    /// Calculate the acute angle between two planes.
    ///
    /// NaN if either plane has no orientation.
    pub fn dihedral(&self, plane: &Plane) -> f64 {
        angle_between_vectors(&self.normal, &plane.normal)
    }
}

/// Collect the atoms of `residue_atoms` named in `names`, in the order of `names`.
pub fn select_named<'a>(residue_atoms: &[&'a Atom], names: &[&str]) -> Vec<&'a Atom> {
    names
        .iter()
        .filter_map(|name| residue_atoms.iter().find(|a| a.name == *name).copied())
        .collect()
}
