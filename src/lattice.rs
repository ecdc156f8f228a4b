use crate::descriptor::{Descriptor, D};
use crate::fields::{ScalarField3D, TensorField3D};
use crate::global_variables::*;
use crate::region::Box3D;
use rayon::prelude::*;

#[derive(Clone)]
pub struct Cell {
    pub index: [usize; D],

    pub f: Box<[Float]>,

    /// Streaming scratch: holds the pre-streaming populations while the
    /// pull loop rewrites `f`.
    pub f_star: Box<[Float]>,
}

impl Cell {
    pub fn density(&self) -> Float {
        self.f.iter().sum()
    }

    pub fn velocity(&self, descriptor: &Descriptor) -> [Float; D] {
        let density = self.density();
        let mut velocity = [0.0; D];
        for i_pop in 0..descriptor.q {
            for axis in 0..D {
                velocity[axis] += self.f[i_pop] * (descriptor.c[i_pop][axis] as Float);
            }
        }
        for axis in 0..D {
            velocity[axis] /= density;
        }
        velocity
    }

    fn set_to_equilibrium(&mut self, descriptor: &Descriptor, density: Float, velocity: [Float; D]) {
        let mut momentum = [0.0; D];
        let mut j_sqr = 0.0;
        for axis in 0..D {
            momentum[axis] = velocity[axis] * density;
            j_sqr += momentum[axis] * momentum[axis];
        }
        for i_pop in 0..descriptor.q {
            self.f[i_pop] = descriptor.equilibrium(i_pop, density, momentum, j_sqr);
        }
        self.f_star.copy_from_slice(&self.f);
    }

    fn collision(&mut self, descriptor: &Descriptor, omega: Float, omega_prime: Float) {
        let density = self.density();
        let velocity = self.velocity(descriptor);
        let mut momentum = [0.0; D];
        let mut j_sqr = 0.0;
        for axis in 0..D {
            momentum[axis] = velocity[axis] * density;
            j_sqr += momentum[axis] * momentum[axis];
        }
        for i_pop in 0..descriptor.q {
            let f_eq = descriptor.equilibrium(i_pop, density, momentum, j_sqr);
            self.f[i_pop] = omega_prime * self.f[i_pop] + omega * f_eq;
        }
    }
}

pub struct Lattice {
    pub nx: usize,
    pub ny: usize,
    pub nz: usize,
    pub omega: Float,
    pub omega_prime: Float,
    pub descriptor: Descriptor,
    pub cells: Vec<Cell>,
}

impl Lattice {
    pub fn new(nx: usize, ny: usize, nz: usize, tau: Float, descriptor: Descriptor) -> Self {
        let omega = DELTA_T / tau;
        let omega_prime = 1.0 - omega;
        let cell = Cell {
            index: [0; D],
            f: vec![0.0; descriptor.q].into_boxed_slice(),
            f_star: vec![0.0; descriptor.q].into_boxed_slice(),
        };
        let mut lattice = Self {
            nx,
            ny,
            nz,
            omega,
            omega_prime,
            descriptor,
            cells: vec![cell; nx * ny * nz],
        };
        lattice.set_cell_indices();
        lattice.initialize_at_equilibrium(|_| (LATTICE_DENSITY, [0.0; D]));
        lattice
    }

    pub fn get_cell(&self, index: [usize; D]) -> &Cell {
        let [i, j, k] = index;
        let number_of_slices = self.nx * self.ny * k;
        let number_of_rows = self.nx * j;
        &self.cells[i + number_of_rows + number_of_slices]
    }

    pub fn get_cell_mut(&mut self, index: [usize; D]) -> &mut Cell {
        let [i, j, k] = index;
        let number_of_slices = self.nx * self.ny * k;
        let number_of_rows = self.nx * j;
        &mut self.cells[i + number_of_rows + number_of_slices]
    }

    pub fn whole_domain(&self) -> Box3D {
        Box3D::new(0, self.nx - 1, 0, self.ny - 1, 0, self.nz - 1)
    }

    /// Seeds every cell with the equilibrium populations of the density and
    /// velocity returned by `profile` at its grid index.
    pub fn initialize_at_equilibrium<P>(&mut self, profile: P)
    where
        P: Fn([usize; D]) -> (Float, [Float; D]) + Sync,
    {
        let descriptor = &self.descriptor;
        self.cells.par_iter_mut().for_each(|cell| {
            let (density, velocity) = profile(cell.index);
            cell.set_to_equilibrium(descriptor, density, velocity);
        });
    }

    pub fn collision_step(&mut self) {
        let descriptor = &self.descriptor;
        let omega = self.omega;
        let omega_prime = self.omega_prime;
        self.cells
            .par_iter_mut()
            .for_each(|cell| cell.collision(descriptor, omega, omega_prime));
    }

    pub fn streaming_step(&mut self) {
        self.cells
            .par_iter_mut()
            .for_each(|cell| cell.f_star.copy_from_slice(&cell.f));
        for i in 0..self.nx {
            for j in 0..self.ny {
                for k in 0..self.nz {
                    for i_pop in 0..self.descriptor.q {
                        let [cx, cy, cz] = self.descriptor.c[i_pop];
                        let new_i = ((i as i32) + cx).rem_euclid(self.nx as i32) as usize;
                        let new_j = ((j as i32) + cy).rem_euclid(self.ny as i32) as usize;
                        let new_k = ((k as i32) + cz).rem_euclid(self.nz as i32) as usize;
                        let value = self.get_cell([i, j, k]).f_star[i_pop];
                        self.get_cell_mut([new_i, new_j, new_k]).f[i_pop] = value;
                    }
                }
            }
        }
    }

    pub fn compute_density_field(&self, region: &Box3D, rho: &mut ScalarField3D) {
        for index in region.iter() {
            rho.set(index, self.get_cell(index).density());
        }
    }

    pub fn compute_velocity_field(&self, region: &Box3D, u: &mut TensorField3D) {
        for index in region.iter() {
            u.set(index, self.get_cell(index).velocity(&self.descriptor));
        }
    }

    pub fn compute_average_density(&self, region: &Box3D) -> Float {
        let sum = region
            .iter()
            .map(|index| self.get_cell(index).density())
            .sum::<Float>();
        sum / (region.num_cells() as Float)
    }

    fn set_cell_indices(&mut self) {
        for k in 0..self.nz {
            for j in 0..self.ny {
                for i in 0..self.nx {
                    self.get_cell_mut([i, j, k]).index = [i, j, k];
                }
            }
        }
    }
}

/// Linear density ramp between two prescribed pressures along one axis,
/// with zero velocity. Used only to seed the initial field.
pub struct PressureGradient {
    pub p_hi: Float,
    pub p_lo: Float,
    pub n: usize,
    pub axis: usize,
}

impl PressureGradient {
    pub fn new(p_hi: Float, p_lo: Float, n: usize, axis: usize) -> Self {
        Self { p_hi, p_lo, n, axis }
    }

    pub fn density_and_velocity(&self, index: [usize; D]) -> (Float, [Float; D]) {
        let position = index[self.axis] as Float;
        let span = self.n.saturating_sub(1).max(1) as Float;
        let density = self.p_hi - (self.p_hi - self.p_lo) * position / span;
        (density, [0.0; D])
    }
}
