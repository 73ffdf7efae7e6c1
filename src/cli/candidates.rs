use clap::Parser;
use plinteract::{list_ligand_candidates, load_structure, ChemistryTables, Result};
use std::path::{Path, PathBuf};
use tracing::trace;

#[derive(Parser, Debug, Clone)]
#[command(version, about)]
pub(crate) struct Args {
    /// Path to the PDB, mmCIF, SDF or MOL2 files to be listed
    input: Vec<PathBuf>,

    /// Print candidates as JSON instead of a table
    #[arg(long, default_value_t = false)]
    json: bool,
}

pub(crate) fn run(args: &Args) -> Result<()> {
    trace!("{args:?}");
    let tables = ChemistryTables::STANDARD;

    for f in &args.input {
        let input_path = Path::new(f).canonicalize()?;
        let input_file = input_path.to_string_lossy().to_string();

        let structure = load_structure(&input_path)?;
        let candidates = list_ligand_candidates(&structure, &tables);

        if args.json {
            println!("{}", serde_json::to_string_pretty(&candidates)?);
            continue;
        }

        println!("File: {input_file}");
        println!("chain\tresn\tresi\tatoms\tknown");
        for c in &candidates {
            println!(
                "{}\t{}\t{}\t{}\t{}",
                c.chain,
                c.resn,
                c.resi,
                c.atom_count,
                tables.is_common_ligand(&c.resn)
            );
        }
        println!();
    }
    Ok(())
}
