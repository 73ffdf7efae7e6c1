use clap::Parser;
use plinteract::{
    analyze_with, find_residue_by_name, list_ligand_candidates, load_structure, run_with_threads,
    write_interactions, ChemistryTables, DataFrameFileType, PlinteractError, ResidueOption,
    ResidueSelector, Result, Structure, Thresholds,
};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info, trace, warn};

#[derive(Parser, Debug, Clone)]
#[command(version, about)]
pub(crate) struct Args {
    /// Path to the PDB, mmCIF, SDF or MOL2 file to be analyzed
    #[arg(short, long)]
    input: PathBuf,

    /// Docked ligand pose (SDF, MOL2, PDB or mmCIF) added to the input structure.
    /// Its molecules are the default ligand candidates
    #[arg(short = 'L', long = "ligand-file")]
    ligand_file: Option<PathBuf>,

    /// Output directory
    #[arg(short, long)]
    output: PathBuf,

    /// Residue name of the ligand, e.g. ATP. The first matching residue is used
    #[arg(short, long, conflicts_with_all = ["selector", "all_candidates"])]
    ligand: Option<String>,

    /// Exact ligand residue as CHAIN:NAME:NUMBER, e.g. A:ATP:401
    #[arg(short, long, conflicts_with = "all_candidates")]
    selector: Option<String>,

    /// Analyze every ligand candidate instead of only the top one
    #[arg(short = 'a', long = "all-candidates", default_value_t = false)]
    all_candidates: bool,

    /// Name of the output file
    #[arg(short = 'f', long = "filename", default_value_t = String::from("contacts"))]
    filename: String,

    /// Output file type
    #[arg(short = 't', long, default_value_t = DataFrameFileType::Csv)]
    output_format: DataFrameFileType,

    /// TOML file overriding the default distance and angle cutoffs
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Radius around the ligand center for selecting protein atoms
    #[arg(long)]
    pocket_radius: Option<f64>,

    /// Hydrogen bond distance cutoff
    #[arg(long)]
    hbond_dist: Option<f64>,

    /// Salt bridge distance cutoff
    #[arg(long)]
    salt_bridge_dist: Option<f64>,

    /// Ring centroid distance cutoff for pi-stacking
    #[arg(long)]
    pi_stacking_dist: Option<f64>,

    /// Cation to ring centroid distance cutoff
    #[arg(long)]
    pi_cation_dist: Option<f64>,

    /// Halogen bond distance cutoff
    #[arg(long)]
    halogen_dist: Option<f64>,

    /// Hydrophobic contact distance cutoff
    #[arg(long)]
    hydrophobic_dist: Option<f64>,

    /// Metal coordination distance cutoff
    #[arg(long)]
    metal_dist: Option<f64>,

    /// Number of threads used when analyzing several ligands (0 for all cores)
    #[arg(short = 'j', long = "num-threads", default_value_t = 1)]
    num_threads: usize,
}

impl Args {
    /// Cutoffs from the config file, if any, with command line values on top.
    fn thresholds(&self) -> Result<Thresholds> {
        let mut thresholds = match &self.config {
            Some(path) => Thresholds::from_toml_file(path)?,
            None => Thresholds::default(),
        };

        let overrides = [
            (self.pocket_radius, &mut thresholds.pocket_radius),
            (self.hbond_dist, &mut thresholds.hydrogen_bond),
            (self.salt_bridge_dist, &mut thresholds.salt_bridge),
            (self.pi_stacking_dist, &mut thresholds.pi_stacking),
            (self.pi_cation_dist, &mut thresholds.pi_cation),
            (self.halogen_dist, &mut thresholds.halogen_bond),
            (self.hydrophobic_dist, &mut thresholds.hydrophobic),
            (self.metal_dist, &mut thresholds.metal_coordination),
        ];
        for (value, field) in overrides {
            if let Some(v) = value {
                *field = v;
            }
        }

        if thresholds.max_cutoff() > thresholds.pocket_radius {
            warn!(
                "Pocket radius {:.1} Å is below the largest cutoff {:.1} Å; some contacts may be missed",
                thresholds.pocket_radius,
                thresholds.max_cutoff()
            );
        }
        Ok(thresholds)
    }

    /// Ligand residues to analyze.
    ///
    /// `pose_residues` replaces the candidate search when a separate ligand
    /// file was given.
    fn ligands(
        &self,
        structure: &Structure,
        pose_residues: Option<Vec<ResidueOption>>,
        tables: &ChemistryTables,
    ) -> Result<Vec<ResidueSelector>> {
        if let Some(s) = &self.selector {
            return Ok(vec![s.parse::<ResidueSelector>()?]);
        }
        if let Some(name) = &self.ligand {
            let found = find_residue_by_name(structure, name)
                .ok_or_else(|| PlinteractError::LigandNotFound(name.clone()))?;
            return Ok(vec![ResidueSelector::from_option(&found)]);
        }

        let candidates =
            pose_residues.unwrap_or_else(|| list_ligand_candidates(structure, tables));
        debug!(
            "Ligand candidates: {:?}",
            candidates
                .iter()
                .map(|c| format!("{}:{}:{}", c.chain, c.resn, c.resi))
                .collect::<Vec<String>>()
        );
        let selected = candidates.iter().map(ResidueSelector::from_option);
        Ok(if self.all_candidates {
            selected.collect()
        } else {
            selected.take(1).collect()
        })
    }
}

pub(crate) fn run(args: &Args) -> Result<()> {
    trace!("{args:?}");

    // Make sure `input` exists
    let input_path = Path::new(&args.input).canonicalize()?;
    let output_path = std::path::absolute(&args.output)?;
    let input_file = input_path.to_string_lossy().to_string();

    // Load file as complex structure, adding the docked pose if any
    let mut structure = load_structure(&input_path)?;
    let mut pose_residues = None;
    if let Some(ligand_file) = &args.ligand_file {
        let pose = load_structure(&Path::new(ligand_file).canonicalize()?)?;
        info!(
            "Adding {} atoms from {}",
            pose.atom_count(),
            ligand_file.display()
        );
        pose_residues = Some(pose.residues());
        structure = structure.merge(pose);
    }

    let tables = ChemistryTables::STANDARD;
    let thresholds = args.thresholds()?;
    let ligands = args.ligands(&structure, pose_residues, &tables)?;
    if ligands.is_empty() {
        warn!("No ligand candidates found in {input_file}");
        return Ok(());
    }
    for ligand in &ligands {
        if !structure.contains_residue(ligand) {
            warn!("Ligand {ligand} matches no atoms in {input_file}");
        }
    }

    // The engine only reads the structure, so ligands can be analyzed in parallel
    let results = run_with_threads(args.num_threads, || {
        debug!("Using {} thread(s)", rayon::current_num_threads());
        ligands
            .par_iter()
            .map(|ligand| analyze_with(&structure, ligand, &tables, &thresholds))
            .collect::<Vec<_>>()
    });

    std::fs::create_dir_all(&output_path)?;
    for (ligand, result) in ligands.iter().zip(results.iter()) {
        let filename = if args.all_candidates {
            format!(
                "{}_{}_{}_{}",
                args.filename, ligand.chain, ligand.resn, ligand.resi
            )
        } else {
            args.filename.clone()
        };

        let summary = result
            .count_by_type()
            .iter()
            .map(|(intxn, n)| format!("{}: {n}", intxn.label()))
            .collect::<Vec<String>>()
            .join(", ");
        info!(
            "Ligand {ligand} has {} interactions ({summary})",
            result.interactions.len()
        );

        let output_file =
            write_interactions(&output_path.join(filename), args.output_format, result)?;
        info!("Results saved to {}", output_file.display());
    }

    Ok(())
}
