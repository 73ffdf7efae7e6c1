//! Readers for small-molecule files: MDL SDF (V2000) and Tripos MOL2.
//!
//! Every molecule becomes one hetero residue on chain [`LIGAND_CHAIN`],
//! numbered from 1 in file order. Bond blocks are skipped since ligand rings
//! are perceived from distances.

use crate::error::{PlinteractError, Result};
use crate::structure::{Atom, Structure};
use nalgebra as na;
use std::path::Path;
use tracing::debug;

/// Chain of residues read from SDF and MOL2 files
pub const LIGAND_CHAIN: &str = "L";
/// Residue name used when the file carries none
pub const LIGAND_RESN: &str = "LIG";

/// Structure file formats, told apart by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructureFormat {
    /// Protein Data Bank
    Pdb,
    /// PDBx/mmCIF
    Mmcif,
    /// MDL SDF or single MOL file
    Sdf,
    /// Tripos MOL2
    Mol2,
}

impl StructureFormat {
    /// Guess the format of `path` from its extension, ignoring case.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "pdb" | "ent" => Some(Self::Pdb),
            "cif" | "mmcif" => Some(Self::Mmcif),
            "sdf" | "sd" | "mol" => Some(Self::Sdf),
            "mol2" => Some(Self::Mol2),
            _ => None,
        }
    }
}

/// Line cursor that keeps track of line numbers for error messages.
struct LineReader<'a> {
    lines: Vec<&'a str>,
    pos: usize,
    source: &'a str,
}

impl<'a> LineReader<'a> {
    fn new(content: &'a str, source: &'a str) -> Self {
        Self {
            lines: content.lines().collect(),
            pos: 0,
            source,
        }
    }

    fn next_line(&mut self) -> Option<&'a str> {
        let line = self.lines.get(self.pos).copied()?;
        self.pos += 1;
        Some(line)
    }

    fn peek(&self) -> Option<&'a str> {
        self.lines.get(self.pos).copied()
    }

    /// Next line, or an error naming what was expected.
    fn expect_line(&mut self, what: &str) -> Result<&'a str> {
        match self.next_line() {
            Some(line) => Ok(line),
            None => Err(self.error(format!("expected {what}, got end of file"))),
        }
    }

    fn rest_is_blank(&self) -> bool {
        self.lines[self.pos.min(self.lines.len())..]
            .iter()
            .all(|l| l.trim().is_empty())
    }

    fn error(&self, message: impl std::fmt::Display) -> PlinteractError {
        PlinteractError::Parse {
            path: self.source.to_string(),
            message: format!("line {}: {message}", self.pos),
        }
    }
}

/// Read every record of an SDF file. `source` names the file in errors.
///
/// SDF carries no atom names, so atoms are named by element and position in
/// the record, e.g. `N7`. All records are named [`LIGAND_RESN`].
pub fn parse_sdf(content: &str, source: &str) -> Result<Structure> {
    let mut reader = LineReader::new(content, source);
    let mut atoms = Vec::new();
    let mut molecule: isize = 0;

    loop {
        while reader.peek().is_some_and(|l| l.starts_with("$$$$")) {
            reader.next_line();
        }
        if reader.rest_is_blank() {
            break;
        }
        molecule += 1;
        let before = atoms.len();
        let name = read_sdf_record(&mut reader, molecule, &mut atoms)?;
        debug!(
            "Read {} atoms of molecule {molecule} '{name}'",
            atoms.len() - before
        );
    }

    Ok(Structure::new(atoms))
}

/// Read one molfile plus its data items. Returns the molecule name.
fn read_sdf_record<'a>(
    reader: &mut LineReader<'a>,
    molecule: isize,
    atoms: &mut Vec<Atom>,
) -> Result<&'a str> {
    let name = reader.expect_line("molecule name")?.trim();
    reader.expect_line("program line")?;
    reader.expect_line("comment line")?;

    let counts = reader.expect_line("counts line")?;
    if counts.get(33..39).is_some_and(|v| v.trim() == "V3000") {
        return Err(reader.error("V3000 molfiles are not supported"));
    }
    let field = |range: std::ops::Range<usize>| -> Option<usize> {
        counts.get(range).and_then(|s| s.trim().parse().ok())
    };
    let (Some(n_atoms), Some(n_bonds)) = (field(0..3), field(3..6)) else {
        return Err(reader.error("invalid counts line"));
    };

    for i in 0..n_atoms {
        let line = reader.expect_line(&format!("atom {}", i + 1))?;
        let coord = |range: std::ops::Range<usize>| -> Option<f64> {
            line.get(range).and_then(|s| s.trim().parse().ok())
        };
        let (Some(x), Some(y), Some(z)) = (coord(0..10), coord(10..20), coord(20..30)) else {
            return Err(reader.error("invalid atom coordinates"));
        };
        let symbol = line.get(31..34).map(str::trim).unwrap_or_default();
        if symbol.is_empty() {
            return Err(reader.error("missing atom symbol"));
        }
        atoms.push(Atom::new(
            0,
            &format!("{}{}", symbol.to_uppercase(), i + 1),
            symbol,
            na::Point3::new(x, y, z),
            LIGAND_RESN,
            molecule,
            LIGAND_CHAIN,
            true,
        ));
    }

    for i in 0..n_bonds {
        reader.expect_line(&format!("bond {}", i + 1))?;
    }

    // Properties block
    while let Some(line) = reader.next_line() {
        if line.starts_with("M  END") {
            break;
        }
    }

    // Data items; `$$$$` only ends the record between items
    let mut in_data_item = false;
    while let Some(line) = reader.next_line() {
        if in_data_item {
            if line.trim().is_empty() {
                in_data_item = false;
            }
        } else if line.starts_with("$$$$") {
            break;
        } else if line.starts_with('>') {
            in_data_item = true;
        }
    }

    Ok(name)
}

/// Read every molecule of a MOL2 file. `source` names the file in errors.
///
/// The residue name comes from the substructure name of the first atom with
/// trailing digits dropped (`BNZ1` becomes `BNZ`), falling back to
/// [`LIGAND_RESN`]. Lone pairs are skipped.
pub fn parse_mol2(content: &str, source: &str) -> Result<Structure> {
    let mut reader = LineReader::new(content, source);
    let mut atoms = Vec::new();
    let mut molecule: isize = 0;

    while skip_to_section(&mut reader, "MOLECULE") {
        molecule += 1;
        let name = reader.expect_line("molecule name")?.trim();
        let counts = reader.expect_line("counts line")?;
        let n_atoms: usize = counts
            .split_whitespace()
            .next()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| reader.error("invalid counts line"))?;

        if !skip_to_section(&mut reader, "ATOM") {
            return Err(reader.error(format!("molecule '{name}' has no ATOM section")));
        }

        let mut records = Vec::with_capacity(n_atoms);
        while let Some(line) = reader.peek() {
            if line.starts_with("@<TRIPOS>") {
                break;
            }
            reader.next_line();
            if line.trim().is_empty() {
                continue;
            }
            let record = parse_mol2_atom(line).ok_or_else(|| reader.error("invalid atom line"))?;
            records.push(record);
        }
        if records.len() != n_atoms {
            debug!(
                "Molecule '{name}' declares {n_atoms} atoms but lists {}",
                records.len()
            );
        }

        let resn = records
            .first()
            .and_then(|r| r.subst_name)
            .map(|s| {
                s.chars()
                    .take_while(|c| c.is_ascii_alphabetic())
                    .collect::<String>()
                    .to_uppercase()
            })
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| LIGAND_RESN.to_string());

        let before = atoms.len();
        atoms.extend(
            records
                .iter()
                .filter(|r| !r.element.eq_ignore_ascii_case("LP"))
                .map(|r| {
                    Atom::new(
                        0,
                        r.name,
                        r.element,
                        r.position,
                        &resn,
                        molecule,
                        LIGAND_CHAIN,
                        true,
                    )
                }),
        );
        debug!(
            "Read {} atoms of molecule {molecule} '{name}' as {resn}",
            atoms.len() - before
        );
    }

    Ok(Structure::new(atoms))
}

/// Move past the next `@<TRIPOS><section>` header. False at end of file.
fn skip_to_section(reader: &mut LineReader, section: &str) -> bool {
    while let Some(line) = reader.next_line() {
        if line
            .strip_prefix("@<TRIPOS>")
            .is_some_and(|s| s.trim() == section)
        {
            return true;
        }
    }
    false
}

struct Mol2Atom<'a> {
    name: &'a str,
    element: &'a str,
    position: na::Point3<f64>,
    subst_name: Option<&'a str>,
}

/// `atom_id atom_name x y z atom_type [subst_id [subst_name [charge]]]`
fn parse_mol2_atom(line: &str) -> Option<Mol2Atom<'_>> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < 6 {
        return None;
    }
    let x = parts[2].parse().ok()?;
    let y = parts[3].parse().ok()?;
    let z = parts[4].parse().ok()?;
    // SYBYL type, e.g. `N.ar` or `C.3`
    let element = parts[5].split('.').next().unwrap_or(parts[5]);
    Some(Mol2Atom {
        name: parts[1],
        element,
        position: na::Point3::new(x, y, z),
        subst_name: parts.get(7).copied(),
    })
}
