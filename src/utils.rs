use crate::contacts::{sorted_for_table, AnalysisResult, Interaction};
use crate::error::{PlinteractError, Result};
use crate::molfile::{parse_mol2, parse_sdf, StructureFormat};
use crate::structure::Structure;
use pdbtbx::{PDBError, PDB};
use polars::prelude::*;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, error, warn};

/// Open an atomic data file with [`pdbtbx::ReadOptions`].
///
/// Hetero residues are kept since ligands live there. Non-breaking parser
/// warnings are returned next to the structure.
pub fn load_model(input_file: &str) -> Result<(PDB, Vec<PDBError>)> {
    pdbtbx::ReadOptions::default()
        .set_only_atomic_coords(true)
        .set_level(pdbtbx::StrictnessLevel::Loose)
        .read(input_file)
        .map_err(|errors| PlinteractError::Parse {
            path: input_file.to_string(),
            message: errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<String>>()
                .join("; "),
        })
}

/// Read any supported structure file into a [`Structure`].
///
/// The parser is picked from the extension: SDF and MOL2 go through
/// [`crate::molfile`], everything else through [`load_model`], whose warnings
/// are logged. Files without atoms are rejected.
pub fn load_structure(path: &Path) -> Result<Structure> {
    let input_file = path.to_string_lossy().to_string();
    let format = StructureFormat::from_path(path);
    debug!("Reading {input_file} as {format:?}");

    let structure = match format {
        Some(StructureFormat::Sdf) => parse_sdf(&std::fs::read_to_string(path)?, &input_file)?,
        Some(StructureFormat::Mol2) => parse_mol2(&std::fs::read_to_string(path)?, &input_file)?,
        Some(StructureFormat::Pdb | StructureFormat::Mmcif) | None => {
            let (pdb, pdb_warnings) = load_model(&input_file)?;
            for e in &pdb_warnings {
                match e.level() {
                    pdbtbx::ErrorLevel::BreakingError => error!("{e}"),
                    pdbtbx::ErrorLevel::InvalidatingError => error!("{e}"),
                    _ => warn!("{e}"),
                }
            }
            Structure::from_pdb(&pdb)
        }
    };

    if structure.is_empty() {
        return Err(PlinteractError::EmptyStructure(input_file));
    }
    Ok(structure)
}

/// Run `f` on a dedicated rayon pool with `num_threads` threads (0 for all cores).
pub fn run_with_threads<T, F>(num_threads: usize, f: F) -> T
where
    F: FnOnce() -> T + Send,
    T: Send,
{
    match rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build()
    {
        Ok(pool) => pool.install(f),
        Err(e) => {
            warn!("Failed to build thread pool, running on the current thread: {e}");
            f()
        }
    }
}

/// Tabulate interactions, sorted by type then distance.
pub fn interactions_to_df(interactions: &[Interaction]) -> Result<DataFrame> {
    let res = sorted_for_table(interactions);
    let df = df!(
        "ID" => res.iter().map(|x| x.id.clone()).collect::<Vec<String>>(),
        "Type" => res.iter().map(|x| x.interaction.label().to_string()).collect::<Vec<String>>(),
        "Distance(Å)" => res.iter().map(|x| x.distance).collect::<Vec<f64>>(),
        "Ligand Atom" => res.iter().map(|x| x.ligand.name.clone()).collect::<Vec<String>>(),
        "Protein Atom" => res.iter().map(|x| x.protein.name.clone()).collect::<Vec<String>>(),
        "Residue" => res.iter().map(|x| x.residue_label()).collect::<Vec<String>>(),
    )?;
    Ok(df)
}

/// Write the interactions of `result` to `file_path`, replacing its extension
/// with the one of `file_type`. Returns the path that was written.
///
/// Tables (CSV, Parquet) hold one row per interaction. JSON is an array of
/// interaction objects with nested atom records, and NDJSON one such object per
/// line.
pub fn write_interactions(
    file_path: &Path,
    file_type: DataFrameFileType,
    result: &AnalysisResult,
) -> Result<PathBuf> {
    let output_file = file_path.with_extension(file_type.to_string());
    let mut file = std::fs::File::create(&output_file)?;
    match file_type {
        DataFrameFileType::Csv => {
            let mut df = interactions_to_df(&result.interactions)?;
            CsvWriter::new(&mut file).finish(&mut df)?;
        }
        DataFrameFileType::Parquet => {
            let mut df = interactions_to_df(&result.interactions)?;
            ParquetWriter::new(&mut file).finish(&mut df)?;
        }
        DataFrameFileType::Json => {
            let sorted = sorted_for_table(&result.interactions);
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, &sorted)?;
            writer.flush()?;
        }
        DataFrameFileType::NDJson => {
            let mut writer = BufWriter::new(file);
            for intxn in sorted_for_table(&result.interactions) {
                serde_json::to_writer(&mut writer, &intxn)?;
                writer.write_all(b"\n")?;
            }
            writer.flush()?;
        }
    }
    Ok(output_file)
}

/// File format for writing interactions.
#[derive(clap::ValueEnum, Clone, Debug, Copy, PartialEq, Eq)]
pub enum DataFrameFileType {
    /// Comma-separated values
    Csv,
    /// Parquet columnar storage
    Parquet,
    /// Standard JSON
    Json,
    /// Newline-delimited JSON
    NDJson,
}

impl std::fmt::Display for DataFrameFileType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            DataFrameFileType::Csv => write!(f, "csv"),
            DataFrameFileType::Parquet => write!(f, "parquet"),
            DataFrameFileType::Json => write!(f, "json"),
            DataFrameFileType::NDJson => write!(f, "ndjson"),
        }
    }
}
