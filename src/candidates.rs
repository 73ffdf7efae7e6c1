use crate::residues::ChemistryTables;
use crate::structure::{ResidueOption, Structure};
use std::collections::HashSet;

/// List residues that are plausible ligands.
///
/// A residue qualifies if its name is a known ligand, or if it is a hetero
/// residue that is not water, a buffer or a common ion. Each (chain, number)
/// appears once. Known ligands come first, then larger residues before smaller
/// ones; ties keep residue order.
pub fn list_ligand_candidates(
    structure: &Structure,
    tables: &ChemistryTables,
) -> Vec<ResidueOption> {
    let mut seen: HashSet<(String, isize)> = HashSet::new();
    let mut candidates: Vec<ResidueOption> = structure
        .residues()
        .into_iter()
        .filter(|res| {
            tables.is_common_ligand(&res.resn)
                || (res.hetero && !tables.is_ignored_residue(&res.resn))
        })
        .filter(|res| seen.insert((res.chain.clone(), res.resi)))
        .collect();

    candidates.sort_by(|a, b| {
        let a_known = tables.is_common_ligand(&a.resn);
        let b_known = tables.is_common_ligand(&b.resn);
        b_known
            .cmp(&a_known)
            .then(b.atom_count.cmp(&a.atom_count))
    });
    candidates
}

/// Find the first residue named `name`, ignoring case and surrounding whitespace.
pub fn find_residue_by_name(structure: &Structure, name: &str) -> Option<ResidueOption> {
    let name = name.trim();
    structure
        .residues()
        .into_iter()
        .find(|res| res.resn.trim().eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::Atom;
    use nalgebra as na;

    fn atom(name: &str, resn: &str, resi: isize, chain: &str, hetero: bool) -> Atom {
        Atom::new(0, name, "C", na::Point3::origin(), resn, resi, chain, hetero)
    }

    fn complex() -> Structure {
        let mut atoms = vec![
            atom("N", "ALA", 1, "A", false),
            atom("CA", "ALA", 1, "A", false),
        ];
        atoms.extend((0..3).map(|i| atom(&format!("C{i}"), "GOL", 401, "A", true)));
        atoms.push(atom("O", "HOH", 501, "A", true));
        atoms.push(atom("NA", "NA", 502, "A", true));
        atoms.extend((0..12).map(|i| atom(&format!("C{i}"), "UNL", 301, "B", true)));
        atoms.extend((0..6).map(|i| atom(&format!("C{i}"), "ATP", 302, "B", true)));
        atoms.extend((0..5).map(|i| atom(&format!("C{i}"), "SO4", 303, "B", true)));
        atoms.extend((0..20).map(|i| atom(&format!("C{i}"), "XYZ", 1, "C", true)));
        Structure::new(atoms)
    }

    #[test]
    fn test_list_ligand_candidates() {
        let tables = ChemistryTables::STANDARD;
        let names: Vec<String> = list_ligand_candidates(&complex(), &tables)
            .into_iter()
            .map(|c| c.resn)
            .collect();
        // Known ligands first even when smaller
        assert_eq!(names, vec!["UNL", "ATP", "XYZ"]);
    }

    #[test]
    fn test_candidates_deduplicated_by_position() {
        let tables = ChemistryTables::STANDARD;
        let structure = Structure::new(vec![
            atom("C1", "LIG", 5, "C", true),
            atom("C2", "LIG", 5, "C", true),
            atom("C1", "UNK", 5, "C", true),
            atom("C1", "DRG", 6, "C", true),
        ]);
        let candidates = list_ligand_candidates(&structure, &tables);
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].resn, "LIG");
        assert_eq!(candidates[0].atom_count, 2);
        assert_eq!(candidates[1].resn, "DRG");

        assert!(list_ligand_candidates(&Structure::default(), &tables).is_empty());
    }

    #[test]
    fn test_equal_sizes_keep_residue_order() {
        let tables = ChemistryTables::STANDARD;
        let structure = Structure::new(vec![
            atom("C1", "DRB", 20, "B", true),
            atom("C1", "DRA", 10, "B", true),
            atom("C1", "DRC", 5, "A", true),
        ]);
        let order: Vec<(String, isize)> = list_ligand_candidates(&structure, &tables)
            .into_iter()
            .map(|c| (c.chain, c.resi))
            .collect();
        assert_eq!(
            order,
            vec![
                ("A".to_string(), 5),
                ("B".to_string(), 10),
                ("B".to_string(), 20)
            ]
        );
    }

    #[test]
    fn test_find_residue_by_name() {
        let structure = complex();
        let found = find_residue_by_name(&structure, "  atp ").unwrap();
        assert_eq!((found.chain.as_str(), found.resi), ("B", 302));
        assert!(find_residue_by_name(&structure, "QQQ").is_none());
        assert!(find_residue_by_name(&structure, "").is_none());

        let twice = Structure::new(vec![
            atom("C1", "LIG", 9, "B", true),
            atom("C1", "LIG", 3, "A", true),
        ]);
        let first = find_residue_by_name(&twice, "LIG").unwrap();
        assert_eq!((first.chain.as_str(), first.resi), ("A", 3));
    }
}
