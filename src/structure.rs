use crate::error::PlinteractError;
use nalgebra as na;
use pdbtbx::*;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// An atom copied out of the parsed structure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Atom {
    /// Position of the atom in the structure, unique within it
    pub index: usize,
    /// Serial number from the input file
    pub serial: usize,
    /// Atom name, e.g. `OD1`
    pub name: String,
    /// Uppercase element symbol
    pub element: String,
    /// Coordinates in Å
    pub position: na::Point3<f64>,
    /// Residue name
    pub resn: String,
    /// Residue number
    pub resi: isize,
    /// Chain identifier
    pub chain: String,
    /// True if the atom is not part of the standard polymer
    pub hetero: bool,
}

impl Atom {
    /// Create an atom; names are trimmed and the element is uppercased.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        index: usize,
        name: &str,
        element: &str,
        position: na::Point3<f64>,
        resn: &str,
        resi: isize,
        chain: &str,
        hetero: bool,
    ) -> Self {
        Self {
            index,
            serial: index,
            name: name.trim().to_string(),
            element: element.trim().to_uppercase(),
            position,
            resn: resn.trim().to_string(),
            resi,
            chain: chain.to_string(),
            hetero,
        }
    }

    /// True if the atom sits in the residue picked by `selector`.
    pub fn belongs_to(&self, selector: &ResidueSelector) -> bool {
        self.chain == selector.chain && self.resi == selector.resi && self.resn == selector.resn
    }

    /// Euclidean distance in Å.
    pub fn distance(&self, other: &Atom) -> f64 {
        na::distance(&self.position, &other.position)
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Chain {chain}, Residue {resn} {resi}, Atom {name} {index}",
            chain = self.chain,
            resn = self.resn,
            resi = self.resi,
            name = self.name,
            index = self.index
        )
    }
}

/// Identifies the ligand residue to analyze.
#[derive(Debug, Hash, PartialEq, Eq, Clone)]
pub struct ResidueSelector {
    /// Chain identifier
    pub chain: String,
    /// Residue number
    pub resi: isize,
    /// Residue name, matched exactly
    pub resn: String,
}

impl ResidueSelector {
    /// Select residue `resn` `resi` on `chain`.
    pub fn new(chain: &str, resi: isize, resn: &str) -> Self {
        Self {
            chain: chain.to_string(),
            resi,
            resn: resn.to_string(),
        }
    }

    /// Select a listed residue.
    pub fn from_option(option: &ResidueOption) -> Self {
        Self::new(&option.chain, option.resi, &option.resn)
    }

    /// Parse a `CHAIN:NAME:NUMBER` selector, e.g. `A:ATP:401`.
    pub fn parse(s: &str) -> Option<Self> {
        let fields: Vec<&str> = s.trim().split(':').collect();
        match fields.as_slice() {
            [chain, resn, resi] => {
                let resi = resi.trim().parse::<isize>().ok()?;
                Some(Self::new(chain.trim(), resi, resn.trim()))
            }
            _ => None,
        }
    }
}

impl FromStr for ResidueSelector {
    type Err = PlinteractError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| PlinteractError::InvalidSelector(s.to_string()))
    }
}

impl fmt::Display for ResidueSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.chain, self.resn, self.resi)
    }
}

/// A residue of the structure, as offered to the user for ligand selection.
#[derive(Debug, PartialEq, Eq, Clone, Serialize)]
pub struct ResidueOption {
    /// Chain identifier
    pub chain: String,
    /// Residue number
    pub resi: isize,
    /// Residue name
    pub resn: String,
    /// Number of atoms in the residue
    pub atom_count: usize,
    /// True if any atom of the residue is a hetero atom
    pub hetero: bool,
}

/// Immutable snapshot of all atoms of one model.
#[derive(Debug, Clone, Default)]
pub struct Structure {
    atoms: Vec<Atom>,
}

impl Structure {
    /// Build a structure from atoms, reassigning indices to their positions.
    pub fn new(atoms: Vec<Atom>) -> Self {
        let atoms = atoms
            .into_iter()
            .enumerate()
            .map(|(i, mut atom)| {
                atom.index = i;
                atom
            })
            .collect();
        Self { atoms }
    }

    /// Convert the first model of a [`pdbtbx::PDB`].
    ///
    /// Only the blank or first alternate location of each atom is kept.
    pub fn from_pdb(pdb: &PDB) -> Self {
        let Some(first_model) = pdb.models().next().map(|m| m.serial_number()) else {
            return Self::default();
        };

        let mut seen_altlocs: HashMap<(String, isize, Option<String>), String> = HashMap::new();
        let atoms = pdb
            .atoms_with_hierarchy()
            .filter(|x| x.model().serial_number() == first_model)
            .filter(|x| match x.conformer().alternative_location() {
                None => true,
                Some(altloc) => {
                    let key = (
                        x.chain().id().to_string(),
                        x.residue().serial_number(),
                        x.residue().id().1.map(|c| c.to_string()),
                    );
                    let first = seen_altlocs
                        .entry(key)
                        .or_insert_with(|| altloc.to_string());
                    first == altloc
                }
            })
            .map(|x| {
                let element = match x.atom().element() {
                    Some(e) => e.symbol().to_string(),
                    None => element_from_name(x.atom().name()),
                };
                let (px, py, pz) = x.atom().pos();
                let mut atom = Atom::new(
                    0,
                    x.atom().name(),
                    &element,
                    na::Point3::new(px, py, pz),
                    x.residue().name().unwrap_or(x.conformer().name()),
                    x.residue().serial_number(),
                    x.chain().id(),
                    x.atom().hetero(),
                );
                atom.serial = x.atom().serial_number();
                atom
            })
            .collect::<Vec<Atom>>();

        debug!("Converted {} atoms from model {first_model}", atoms.len());
        Self::new(atoms)
    }

    /// Atoms in input order; `Atom::index` is the position in this slice.
    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    /// Number of atoms.
    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    /// True if the structure has no atoms.
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Append the atoms of `other`, such as a docked pose read from its own file.
    pub fn merge(self, other: Structure) -> Self {
        let mut atoms = self.atoms;
        atoms.extend(other.atoms);
        Self::new(atoms)
    }

    /// True if any atom belongs to the residue picked by `selector`.
    pub fn contains_residue(&self, selector: &ResidueSelector) -> bool {
        self.atoms.iter().any(|a| a.belongs_to(selector))
    }

    /// All residues, ordered by ascending chain, then ascending residue number.
    ///
    /// Residues sharing chain and number but differing in name keep the order
    /// in which they first appear in the atom list.
    pub fn residues(&self) -> Vec<ResidueOption> {
        let mut index: HashMap<(&str, isize, &str), usize> = HashMap::new();
        let mut residues: Vec<ResidueOption> = Vec::new();

        for atom in &self.atoms {
            let key = (atom.chain.as_str(), atom.resi, atom.resn.as_str());
            match index.get(&key) {
                Some(&i) => {
                    residues[i].atom_count += 1;
                    residues[i].hetero |= atom.hetero;
                }
                None => {
                    index.insert(key, residues.len());
                    residues.push(ResidueOption {
                        chain: atom.chain.clone(),
                        resi: atom.resi,
                        resn: atom.resn.clone(),
                        atom_count: 1,
                        hetero: atom.hetero,
                    });
                }
            }
        }

        // Stable, so first appearance breaks ties
        residues.sort_by(|a, b| a.chain.cmp(&b.chain).then(a.resi.cmp(&b.resi)));
        residues
    }
}

/// Guess an element symbol from the leading letters of an atom name.
fn element_from_name(name: &str) -> String {
    name.trim()
        .chars()
        .skip_while(|c| c.is_ascii_digit())
        .take_while(|c| c.is_ascii_alphabetic())
        .take(1)
        .collect::<String>()
        .to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::load_model;

    fn atom(name: &str, resn: &str, resi: isize, chain: &str, hetero: bool) -> Atom {
        Atom::new(0, name, &name[..1], na::Point3::origin(), resn, resi, chain, hetero)
    }

    #[test]
    fn test_residue_order() {
        let structure = Structure::new(vec![
            atom("C1", "LIG", 5, "B", true),
            atom("N", "ALA", 2, "A", false),
            atom("CA", "ALA", 2, "A", false),
            atom("N", "GLY", 1, "A", false),
        ]);
        let residues = structure.residues();
        let keys: Vec<(&str, isize)> = residues
            .iter()
            .map(|r| (r.chain.as_str(), r.resi))
            .collect();
        assert_eq!(keys, vec![("A", 1), ("A", 2), ("B", 5)]);
        assert_eq!(residues[1].atom_count, 2);
        assert!(residues[2].hetero);
        assert_eq!(structure.atoms()[3].index, 3);
    }

    #[test]
    fn test_selector_parse() {
        assert_eq!(
            ResidueSelector::parse("A:ATP:401"),
            Some(ResidueSelector::new("A", 401, "ATP"))
        );
        assert_eq!(
            ResidueSelector::parse(" B : HEM : -3 "),
            Some(ResidueSelector::new("B", -3, "HEM"))
        );
        assert_eq!(ResidueSelector::parse("A:ATP"), None);
        assert_eq!(ResidueSelector::parse("A:ATP:x"), None);
    }

    #[test]
    fn test_selector_from_str() {
        let selector: ResidueSelector = "A:ATP:401".parse().unwrap();
        assert_eq!(selector, ResidueSelector::new("A", 401, "ATP"));

        let err = "A:ATP".parse::<ResidueSelector>().unwrap_err();
        assert!(matches!(err, PlinteractError::InvalidSelector(ref s) if s == "A:ATP"));
        assert_eq!(
            err.to_string(),
            "Invalid residue selector 'A:ATP', expected CHAIN:NAME:NUMBER"
        );
    }

    #[test]
    fn test_merge_reindexes() {
        let protein = Structure::new(vec![atom("N", "ALA", 2, "A", false)]);
        let pose = Structure::new(vec![
            atom("C1", "LIG", 1, "L", true),
            atom("C2", "LIG", 1, "L", true),
        ]);
        let merged = protein.merge(pose);
        assert_eq!(merged.atom_count(), 3);
        let indices: Vec<usize> = merged.atoms().iter().map(|a| a.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        assert_eq!(merged.atoms()[2].name, "C2");
    }

    #[test]
    fn test_contains_residue() {
        let structure = Structure::new(vec![
            atom("N", "ALA", 2, "A", false),
            atom("C1", "LIG", 5, "B", true),
        ]);
        assert!(structure.contains_residue(&ResidueSelector::new("B", 5, "LIG")));
        assert!(!structure.contains_residue(&ResidueSelector::new("B", 5, "ATP")));
        assert!(!structure.contains_residue(&ResidueSelector::new("A", 5, "LIG")));
    }

    #[test]
    fn test_element_from_name() {
        assert_eq!(element_from_name("CA"), "C");
        assert_eq!(element_from_name("1HB"), "H");
        assert_eq!(element_from_name(""), "");
    }

    #[test]
    fn test_from_pdb() {
        let root = env!("CARGO_MANIFEST_DIR");
        let path = format!("{}/{}", root, "test-data/mini_complex.pdb");
        let (pdb, _) = load_model(&path).unwrap();
        let structure = Structure::from_pdb(&pdb);

        assert!(!structure.is_empty());
        let ligand: Vec<&Atom> = structure
            .atoms()
            .iter()
            .filter(|a| a.resn == "BNZ")
            .collect();
        assert_eq!(ligand.len(), 6);
        assert!(ligand.iter().all(|a| a.hetero && a.element == "C"));
        assert!(structure
            .atoms()
            .iter()
            .filter(|a| a.resn == "ARG")
            .all(|a| !a.hetero));
        let water = structure.atoms().iter().find(|a| a.resn == "HOH").unwrap();
        assert!(water.hetero);
    }
}
