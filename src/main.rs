//! `pixelsolid`: turn a label-grid job file into printable solids and check them.

mod job;
mod report;

use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use pixelsolid_mesh::constants::SLICER_WELD_TOLERANCE_MM;
use pixelsolid_mesh::{build_all, build_all_sequential};

use crate::job::Job;
use crate::report::MeshCheck;

/// Extrude a pixel-art label grid into one watertight mesh per color plus a base.
#[derive(Parser, Debug)]
#[command(name = "pixelsolid", version, about, long_about = None)]
struct Cli {
    /// TOML job file with `labels`, optional `palette` and `[params]`
    #[arg(name = "JOB")]
    job: PathBuf,

    /// Cell edge length in mm (overrides the job)
    #[arg(long)]
    pixel_size: Option<f64>,

    /// Color layer thickness in mm (overrides the job)
    #[arg(long)]
    pixel_height: Option<f64>,

    /// Base slab thickness in mm (overrides the job)
    #[arg(long)]
    base_height: Option<f64>,

    /// Build color layers on the calling thread
    #[arg(long)]
    sequential: bool,

    /// Vertex merge distance used for the simulated slicer weld
    #[arg(long, value_name = "MM", default_value_t = SLICER_WELD_TOLERANCE_MM)]
    weld_tolerance: f64,

    /// Report meshes rotated Z-up for the print bed
    #[arg(long)]
    print_orient: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => {
            log::error!("{}: one or more meshes failed the edge check", cli.job.display());
            ExitCode::FAILURE
        }
        Err(e) => {
            log::error!("{}: {}", cli.job.display(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<bool, Box<dyn Error>> {
    let mut job = Job::load(&cli.job)?;
    if let Some(v) = cli.pixel_size {
        job.params.pixel_size = v;
    }
    if let Some(v) = cli.pixel_height {
        job.params.pixel_height = v;
    }
    if let Some(v) = cli.base_height {
        job.params.base_height = v;
    }
    let p = job.params;
    if !(p.pixel_size > 0.0) {
        log::warn!("pixel_size={} is not positive; every mesh will be empty", p.pixel_size);
    }
    log::info!(
        "job {} grid={}x{} materials={} pixel_size={} pixel_height={} base_height={}",
        cli.job.display(),
        job.grid.width(),
        job.grid.height(),
        job.grid.materials().len(),
        p.pixel_size,
        p.pixel_height,
        p.base_height
    );

    let build = if cli.sequential { build_all_sequential } else { build_all };
    let mut set = build(&job.grid, &job.palette, p.pixel_size, p.pixel_height, p.base_height);
    if cli.print_orient {
        set = set.rotated_for_printing();
    }

    let mut checks = vec![MeshCheck::run("base", &set.base, cli.weld_tolerance)];
    for layer in set.per_color.values() {
        let name = match layer.color {
            Some(c) => format!("color {} {}", layer.material, c.to_hex()),
            None => format!("color {}", layer.material),
        };
        checks.push(MeshCheck::run(name, &layer.mesh, cli.weld_tolerance));
    }
    for c in &checks {
        println!("{c}");
    }
    Ok(checks.iter().all(MeshCheck::passed))
}
