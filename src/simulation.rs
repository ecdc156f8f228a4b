use crate::bc::{PeriodicPressureManager, PeriodicPressureParameters};
use crate::descriptor::Descriptor;
use crate::global_variables::*;
use crate::io;
use crate::lattice::{Lattice, PressureGradient};
use crate::region::Box3D;
use colored::*;
use std::process;
use std::time::Instant;

#[derive(Debug, Clone)]
pub struct SimulationConfig {
    pub nx: usize,
    pub ny: usize,
    pub nz: usize,
    pub tau: Float,
    pub rho_in: Float,
    pub rho_out: Float,
    pub max_iter: usize,
    pub write_frequency: usize,
}

/// Pressure-driven periodic channel along x: the flow is periodic in every
/// direction while the inlet and outlet planes hold the prescribed density
/// difference.
pub fn run(config: SimulationConfig) {
    let simulation_time = Instant::now();

    if let Err(e) = io::create_output_directory() {
        eprintln!("Error while creating the output directory: {e}.");
        process::exit(1);
    }

    let mut lattice = Lattice::new(
        config.nx,
        config.ny,
        config.nz,
        config.tau,
        Descriptor::d3q27(),
    );
    let gradient = PressureGradient::new(config.rho_in, config.rho_out, config.nx, 0);
    lattice.initialize_at_equilibrium(|index| gradient.density_and_velocity(index));

    let parameters = PeriodicPressureParameters {
        rho_in: config.rho_in,
        rho_out: config.rho_out,
        axis: 0,
        in_direction: 1,
        out_direction: -1,
        inlet: Box3D::new(0, 0, 0, config.ny - 1, 0, config.nz - 1),
        outlet: Box3D::new(
            config.nx - 1,
            config.nx - 1,
            0,
            config.ny - 1,
            0,
            config.nz - 1,
        ),
    };
    let mut manager = match PeriodicPressureManager::new(&lattice, parameters) {
        Ok(manager) => manager,
        Err(e) => {
            eprintln!("Error in the periodic pressure setup: {e}.");
            process::exit(1);
        }
    };

    for time_step in 0..config.max_iter {
        manager.pre_coll(&lattice);
        lattice.collision_step();
        manager.post_coll(&mut lattice);
        lattice.streaming_step();

        if time_step % config.write_frequency == 0 {
            print_step(&lattice, &manager, time_step);
            if let Err(e) =
                io::write_face_mean_densities(time_step, manager.rho_avg_in, manager.rho_avg_out)
            {
                eprintln!("Error while writing the face mean density file: {e}.");
                process::exit(1);
            }
        }
    }

    if let Err(e) = io::write_axial_profile(&lattice, 0) {
        eprintln!("Error while writing the axial profile file: {e}.");
        process::exit(1);
    }

    println!(
        "\n{} {} steps in {:.3} s.",
        "Finished".green().bold(),
        config.max_iter,
        simulation_time.elapsed().as_secs_f64()
    );
}

fn print_step(lattice: &Lattice, manager: &PeriodicPressureManager, time_step: usize) {
    let domain = lattice.whole_domain();
    let mean_density = lattice.compute_average_density(&domain);
    println!(
        "{} {:>8}  {} {:>12.6}  {} {:>12.6}  {} {:>12.6}",
        "step".cyan().bold(),
        time_step,
        "rho_avg_in".cyan(),
        manager.rho_avg_in,
        "rho_avg_out".cyan(),
        manager.rho_avg_out,
        "mean_rho".cyan(),
        mean_density
    );
}
