use crate::descriptor::{Descriptor, D};
use crate::dispatch::{apply_processing_functional, LatticeScalarTensorFunctional, Modif};
use crate::fields::{ScalarField3D, TensorField3D};
use crate::global_variables::*;
use crate::io;
use crate::lattice::Lattice;
use crate::region::Box3D;
use rayon::prelude::*;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidAxis(usize),
    InvalidDirection(i32),
    RegionNotAPlane { region: &'static str, axis: usize },
    RegionShapeMismatch,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidAxis(axis) => {
                write!(f, "invalid axis {axis}: must be 0, 1 or 2")
            }
            ConfigError::InvalidDirection(direction) => {
                write!(f, "invalid direction {direction}: must be +1 or -1")
            }
            ConfigError::RegionNotAPlane { region, axis } => {
                write!(f, "{region} region must be a single plane along axis {axis}")
            }
            ConfigError::RegionShapeMismatch => {
                write!(f, "inlet and outlet regions must have the same shape")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Swaps the equilibrium part of the listed populations from `density` to
/// `target_density`, keeping the non-equilibrium part and the local velocity
/// untouched. Momentum is recomputed from the velocity at each density, so
/// the velocity, not the momentum, is the quantity held fixed.
pub fn rescale_populations(
    f: &mut [Float],
    indices: &[usize],
    descriptor: &Descriptor,
    density: Float,
    target_density: Float,
    velocity: [Float; D],
) {
    let mut momentum = [0.0; D];
    let mut target_momentum = [0.0; D];
    let mut j_sqr = 0.0;
    let mut target_j_sqr = 0.0;
    for axis in 0..D {
        momentum[axis] = velocity[axis] * density;
        target_momentum[axis] = velocity[axis] * target_density;
        j_sqr += momentum[axis] * momentum[axis];
        target_j_sqr += target_momentum[axis] * target_momentum[axis];
    }
    for &i_pop in indices {
        f[i_pop] -= descriptor.equilibrium(i_pop, density, momentum, j_sqr);
        f[i_pop] += descriptor.equilibrium(i_pop, target_density, target_momentum, target_j_sqr);
    }
}

/// Rescales the populations crossing one boundary face toward a prescribed
/// density, reading the per-cell density and velocity from the scratch
/// fields filled during the pre-collision phase.
pub struct PeriodicPressureFunctional {
    pub rho_target: Float,
    pub rho_avg: Float,
    rescale_pop: Vec<usize>,
}

impl PeriodicPressureFunctional {
    pub fn new(
        descriptor: &Descriptor,
        rho_target: Float,
        rho_avg: Float,
        axis: usize,
        direction: i32,
    ) -> Result<Self, ConfigError> {
        let rescale_pop = compute_rescale_indices(descriptor, axis, direction)?;
        Ok(Self::with_indices(rho_target, rho_avg, rescale_pop))
    }

    pub(crate) fn with_indices(rho_target: Float, rho_avg: Float, rescale_pop: Vec<usize>) -> Self {
        Self {
            rho_target,
            rho_avg,
            rescale_pop,
        }
    }
}

impl LatticeScalarTensorFunctional for PeriodicPressureFunctional {
    fn process(
        &self,
        domain: &Box3D,
        lattice: &mut Lattice,
        rho: &ScalarField3D,
        u: &TensorField3D,
    ) {
        let descriptor = &lattice.descriptor;
        lattice
            .cells
            .par_iter_mut()
            .filter(|cell| domain.contains(cell.index))
            .for_each(|cell| {
                let density = rho.get(cell.index);
                let velocity = u.get(cell.index);
                let cell_target = density + (self.rho_target - self.rho_avg);
                rescale_populations(
                    &mut cell.f,
                    &self.rescale_pop,
                    descriptor,
                    density,
                    cell_target,
                    velocity,
                );
            });
    }

    fn modification(&self) -> [Modif; 3] {
        [Modif::Variables, Modif::Nothing, Modif::Nothing]
    }
}

fn compute_rescale_indices(
    descriptor: &Descriptor,
    axis: usize,
    direction: i32,
) -> Result<Vec<usize>, ConfigError> {
    if axis >= D {
        return Err(ConfigError::InvalidAxis(axis));
    }
    if direction != 1 && direction != -1 {
        return Err(ConfigError::InvalidDirection(direction));
    }
    let indices = descriptor.rescale_indices(axis, direction);
    if indices.is_empty() {
        io::warn(&format!(
            "no population crosses axis {axis} with direction {direction:+}; \
             the pressure condition is a no-op on that face"
        ));
    }
    Ok(indices)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    PreCollision,
    PostCollision,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeriodicPressureParameters {
    pub rho_in: Float,
    pub rho_out: Float,
    pub axis: usize,
    pub in_direction: i32,
    pub out_direction: i32,
    pub inlet: Box3D,
    pub outlet: Box3D,
}

/// Drives one periodic-pressure cycle per time step: `pre_coll` before the
/// collision records and swaps the face moments, `post_coll` after it
/// rescales both faces toward the prescribed densities.
pub struct PeriodicPressureManager {
    pub rho_in: Float,
    pub rho_out: Float,
    pub rho_avg_in: Float,
    pub rho_avg_out: Float,
    pub inlet: Box3D,
    pub outlet: Box3D,
    pub rho: ScalarField3D,
    pub u: TensorField3D,
    tmp_rho: ScalarField3D,
    tmp_u: TensorField3D,
    rescale_in: Vec<usize>,
    rescale_out: Vec<usize>,
    phase: Phase,
}

impl PeriodicPressureManager {
    pub fn new(lattice: &Lattice, parameters: PeriodicPressureParameters) -> Result<Self, ConfigError> {
        let PeriodicPressureParameters {
            rho_in,
            rho_out,
            axis,
            in_direction,
            out_direction,
            inlet,
            outlet,
        } = parameters;
        if axis >= D {
            return Err(ConfigError::InvalidAxis(axis));
        }
        if !inlet.is_plane(axis) {
            return Err(ConfigError::RegionNotAPlane {
                region: "inlet",
                axis,
            });
        }
        if !outlet.is_plane(axis) {
            return Err(ConfigError::RegionNotAPlane {
                region: "outlet",
                axis,
            });
        }
        if inlet.shape() != outlet.shape() {
            return Err(ConfigError::RegionShapeMismatch);
        }
        let rescale_in = compute_rescale_indices(&lattice.descriptor, axis, in_direction)?;
        let rescale_out = compute_rescale_indices(&lattice.descriptor, axis, out_direction)?;
        Ok(Self {
            rho_in,
            rho_out,
            rho_avg_in: 0.0,
            rho_avg_out: 0.0,
            inlet,
            outlet,
            rho: ScalarField3D::new(lattice.nx, lattice.ny, lattice.nz),
            u: TensorField3D::new(lattice.nx, lattice.ny, lattice.nz),
            tmp_rho: ScalarField3D::sized_to(&inlet),
            tmp_u: TensorField3D::sized_to(&inlet),
            rescale_in,
            rescale_out,
            phase: Phase::PreCollision,
        })
    }

    /// Records density and velocity over both faces, rotates them through
    /// the single-plane swap buffer so each face sees the other's moments,
    /// and stores the slice-averaged densities for `post_coll`.
    pub fn pre_coll(&mut self, lattice: &Lattice) {
        lattice.compute_density_field(&self.inlet, &mut self.rho);
        lattice.compute_density_field(&self.outlet, &mut self.rho);
        lattice.compute_velocity_field(&self.inlet, &mut self.u);
        lattice.compute_velocity_field(&self.outlet, &mut self.u);

        let swap = self.inlet.at_origin();
        self.tmp_rho.copy_region_from(&self.rho, &self.inlet, &swap);
        self.rho.copy_region(&self.outlet, &self.inlet);
        self.rho.copy_region_from(&self.tmp_rho, &swap, &self.outlet);
        self.tmp_u.copy_region_from(&self.u, &self.inlet, &swap);
        self.u.copy_region(&self.outlet, &self.inlet);
        self.u.copy_region_from(&self.tmp_u, &swap, &self.outlet);

        self.rho_avg_in = lattice.compute_average_density(&self.inlet);
        self.rho_avg_out = lattice.compute_average_density(&self.outlet);
        self.phase = Phase::PostCollision;
    }

    /// Rescales the inlet toward `rho_in` anchored to the outlet's slice
    /// average, and the outlet toward `rho_out` anchored to the inlet's.
    pub fn post_coll(&mut self, lattice: &mut Lattice) {
        assert_eq!(
            self.phase,
            Phase::PostCollision,
            "post_coll requires a preceding pre_coll in the same step"
        );
        let inlet_functional = PeriodicPressureFunctional::with_indices(
            self.rho_in,
            self.rho_avg_out,
            self.rescale_in.clone(),
        );
        let outlet_functional = PeriodicPressureFunctional::with_indices(
            self.rho_out,
            self.rho_avg_in,
            self.rescale_out.clone(),
        );
        apply_processing_functional(&inlet_functional, &self.inlet, lattice, &self.rho, &self.u);
        apply_processing_functional(&outlet_functional, &self.outlet, lattice, &self.rho, &self.u);
        self.phase = Phase::PreCollision;
    }
}
