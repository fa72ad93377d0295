//! Map the vertices of an OBJ mesh onto an NRRD coordinate volume,
//! writing `mesh.json`, `elem.dat` and `vert.dat` to an output directory.

use clap::Parser;
use std::path::PathBuf;
use std::process;

use volume_coords::{align, load_obj, writer, AlignmentOptions, NrrdObject, Result};

#[derive(Parser, Debug)]
#[command(name = "align_mesh")]
#[command(about = "Resolve volume coordinates for every vertex of a mesh", long_about = None)]
struct Args {
    /// NRRD coordinate volume (raw or gzip encoded)
    volume: PathBuf,

    /// Wavefront OBJ mesh
    mesh: PathBuf,

    /// Output directory
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// Distance moved along the normal per attempt, in mesh units
    #[arg(long, default_value = "0.2")]
    step: f64,

    /// Extra attempts per vertex before giving up
    #[arg(long, default_value = "50")]
    max_iterations: usize,

    /// Process vertices on a single thread
    #[arg(long)]
    sequential: bool,
}

fn run(args: &Args) -> Result<()> {
    let obj = NrrdObject::from_file(&args.volume)?;
    let bounds = obj.header().world_bounds();
    println!("Volume bounds: {:?} to {:?}", bounds.min, bounds.max);

    let mesh = load_obj(&args.mesh)?;
    let options = AlignmentOptions::new()
        .step(args.step)
        .max_iterations(args.max_iterations)
        .parallel(!args.sequential);
    let dataset = align(&mesh, obj.volume(), &options)?;
    writer::write_dataset(&args.output, &dataset)?;

    let stats = &dataset.stats;
    println!("Coordinates found: {:.2}%", stats.good_percentage());
    if stats.gave_up > 0 {
        println!("{} vertices gave up", stats.gave_up);
    }
    Ok(())
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
