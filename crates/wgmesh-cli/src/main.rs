//! wgmesh binary entrypoint.
//!
//! One-shot batch tool: load the manifest, generate every peer's
//! document, write the files, exit. All failures propagate here; in
//! non-verbose mode only a single-line summary is printed.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use wgmesh::keys::{LocalDeriver, PublicKeyDeriver, WgCommandDeriver};
use wgmesh::{Mesh, load_manifest, output};

mod cli;

use cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.verbose {
                eprintln!("ERROR: {e:?}");
            } else {
                eprintln!("ERROR: {e}");
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let peers = load_manifest(&cli.config_file)?;
    let mesh = Mesh::new(peers)?;

    let deriver: Box<dyn PublicKeyDeriver> = if cli.local_keys {
        Box::new(LocalDeriver)
    } else {
        Box::new(WgCommandDeriver)
    };

    let docs = mesh.generate(deriver.as_ref())?;
    let written = output::write_configs(&cli.output_dir, &docs)?;
    for path in &written {
        println!("Wrote {}", path.display());
    }
    Ok(())
}
