use crate::global_variables::*;
use crate::lattice::Lattice;
use crate::region::Box3D;
use colored::*;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

pub const POST_PROCESSING_PATH: &'static str = "./post_processing";

pub const FACE_DENSITY_FILE: &'static str = "face_mean_density.dat";

pub const AXIAL_PROFILE_FILE: &'static str = "axial_profile.dat";

pub fn warn(message: &str) {
    eprintln!("{} {message}", "Warning:".yellow().bold());
}

pub fn create_output_directory() -> io::Result<()> {
    let path = Path::new(POST_PROCESSING_PATH);
    if !path.exists() {
        println!(
            "Creating the {} path.\n",
            POST_PROCESSING_PATH.yellow().bold()
        );
        fs::create_dir(path)?;
    }
    Ok(())
}

/// Appends the slice-averaged inlet and outlet densities for one step.
pub fn write_face_mean_densities(
    time_step: usize,
    rho_avg_in: Float,
    rho_avg_out: Float,
) -> io::Result<()> {
    let path = Path::new(POST_PROCESSING_PATH).join(FACE_DENSITY_FILE);
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    if time_step == 0 {
        writeln!(
            file,
            "{:>8} {:>16} {:>16}",
            "step", "rho_avg_in", "rho_avg_out"
        )?;
    }
    writeln!(
        file,
        "{:>8} {:>16.8e} {:>16.8e}",
        time_step, rho_avg_in, rho_avg_out
    )?;
    Ok(())
}

/// Writes the plane-averaged density and axial velocity for every slice
/// along `axis`, one row per slice.
pub fn write_axial_profile(lattice: &Lattice, axis: usize) -> io::Result<()> {
    let path = Path::new(POST_PROCESSING_PATH).join(AXIAL_PROFILE_FILE);
    let mut file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)?;
    writeln!(file, "{:>8} {:>16} {:>16}", "slice", "density", "velocity")?;
    let extent = [lattice.nx, lattice.ny, lattice.nz][axis];
    for position in 0..extent {
        let mut slice = lattice.whole_domain();
        match axis {
            0 => {
                slice.x0 = position;
                slice.x1 = position;
            }
            1 => {
                slice.y0 = position;
                slice.y1 = position;
            }
            _ => {
                slice.z0 = position;
                slice.z1 = position;
            }
        }
        let density = lattice.compute_average_density(&slice);
        let velocity = average_axial_velocity(lattice, &slice, axis);
        writeln!(
            file,
            "{:>8} {:>16.8e} {:>16.8e}",
            position, density, velocity
        )?;
    }
    Ok(())
}

fn average_axial_velocity(lattice: &Lattice, slice: &Box3D, axis: usize) -> Float {
    let sum = slice
        .iter()
        .map(|index| lattice.get_cell(index).velocity(&lattice.descriptor)[axis])
        .sum::<Float>();
    sum / (slice.num_cells() as Float)
}
