use std::{io::BufReader, path::PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use vmd_model::{JsonFileSink, TargetMesh, convert_camera, convert_morphs};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a camera animation clip from a camera motion file.
    Camera {
        /// The .vmd camera motion file.
        input: PathBuf,
    },
    /// Create one morph animation clip for each target mesh.
    Morph {
        /// The .vmd motion file.
        input: PathBuf,
        /// JSON manifest listing target meshes and their blend shape names.
        meshes: PathBuf,
        /// Sort morph keyframes by frame index
        /// instead of keeping the on-disk sample order.
        #[arg(long)]
        sort_by_frame: bool,
    },
}

fn main() -> anyhow::Result<()> {
    simple_logger::SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .init()
        .unwrap();

    let cli = Cli::parse();
    let mut sink = JsonFileSink;

    match cli.command {
        Command::Camera { input } => {
            let path = convert_camera(&input, &mut sink)?;
            println!("{}", path.display());
        }
        Command::Morph {
            input,
            meshes,
            sort_by_frame,
        } => {
            let file = std::fs::File::open(&meshes)
                .with_context(|| format!("failed to open mesh manifest {meshes:?}"))?;
            let meshes: Vec<TargetMesh> = serde_json::from_reader(BufReader::new(file))
                .context("failed to parse mesh manifest")?;

            for path in convert_morphs(&input, &meshes, sort_by_frame, &mut sink)? {
                println!("{}", path.display());
            }
        }
    }

    Ok(())
}
