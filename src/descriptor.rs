use crate::global_variables::*;

pub const D: usize = 3;

/// Discrete-velocity model passed around as a plain value, so boundary
/// conditions can be unit-tested with small synthetic velocity sets.
#[derive(Debug, Clone, PartialEq)]
pub struct Descriptor {
    pub q: usize,
    pub c: Vec<[i32; D]>,
    pub w: Vec<Float>,
}

impl Descriptor {
    pub fn new(c: Vec<[i32; D]>, w: Vec<Float>) -> Self {
        assert_eq!(
            c.len(),
            w.len(),
            "descriptor requires one weight per discrete velocity"
        );
        Self { q: c.len(), c, w }
    }

    pub fn d3q27() -> Self {
        let c = vec![
            [0, 0, 0],
            [1, 0, 0],
            [-1, 0, 0],
            [0, 1, 0],
            [0, -1, 0],
            [0, 0, 1],
            [0, 0, -1],
            [1, 1, 0],
            [-1, -1, 0],
            [1, 0, 1],
            [-1, 0, -1],
            [0, 1, 1],
            [0, -1, -1],
            [1, -1, 0],
            [-1, 1, 0],
            [1, 0, -1],
            [-1, 0, 1],
            [0, 1, -1],
            [0, -1, 1],
            [1, 1, 1],
            [-1, -1, -1],
            [1, 1, -1],
            [-1, -1, 1],
            [1, -1, 1],
            [-1, 1, -1],
            [-1, 1, 1],
            [1, -1, -1],
        ];
        let mut w = vec![8.0 / 27.0];
        w.extend(std::iter::repeat(2.0 / 27.0).take(6));
        w.extend(std::iter::repeat(1.0 / 54.0).take(12));
        w.extend(std::iter::repeat(1.0 / 216.0).take(8));
        Self::new(c, w)
    }

    pub fn d3q19() -> Self {
        let c = vec![
            [0, 0, 0],
            [1, 0, 0],
            [-1, 0, 0],
            [0, 1, 0],
            [0, -1, 0],
            [0, 0, 1],
            [0, 0, -1],
            [1, 1, 0],
            [-1, -1, 0],
            [1, 0, 1],
            [-1, 0, -1],
            [0, 1, 1],
            [0, -1, -1],
            [1, -1, 0],
            [-1, 1, 0],
            [1, 0, -1],
            [-1, 0, 1],
            [0, 1, -1],
            [0, -1, 1],
        ];
        let mut w = vec![1.0 / 3.0];
        w.extend(std::iter::repeat(1.0 / 18.0).take(6));
        w.extend(std::iter::repeat(1.0 / 36.0).take(12));
        Self::new(c, w)
    }

    /// Second-order BGK equilibrium in momentum form: `j` is the momentum
    /// `rho * u` and `j_sqr` its squared magnitude.
    pub fn equilibrium(&self, i_pop: usize, density: Float, momentum: [Float; D], j_sqr: Float) -> Float {
        let c_dot_j = self.c[i_pop]
            .iter()
            .zip(momentum.iter())
            .map(|(&c, &j)| (c as Float) * j)
            .sum::<Float>();
        self.w[i_pop]
            * (density
                + CS_2_INV * c_dot_j
                + (0.5 * CS_4_INV * c_dot_j * c_dot_j - 0.5 * CS_2_INV * j_sqr) / density)
    }

    /// Population indices whose discrete velocity along `axis` equals
    /// `direction`. Depends only on the velocity set, so the result can be
    /// computed once at setup and reused for every rescale call.
    pub fn rescale_indices(&self, axis: usize, direction: i32) -> Vec<usize> {
        (0..self.q)
            .filter(|&i_pop| self.c[i_pop][axis] == direction)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_d3q27_weights_sum_to_one() {
        let descriptor = Descriptor::d3q27();

        assert_eq!(descriptor.q, 27);
        assert_relative_eq!(descriptor.w.iter().sum::<Float>(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_d3q19_weights_sum_to_one() {
        let descriptor = Descriptor::d3q19();

        assert_eq!(descriptor.q, 19);
        assert_relative_eq!(descriptor.w.iter().sum::<Float>(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_velocities_sum_to_zero() {
        for descriptor in [Descriptor::d3q27(), Descriptor::d3q19()] {
            for axis in 0..D {
                let sum = descriptor.c.iter().map(|c| c[axis]).sum::<i32>();
                assert_eq!(sum, 0);
            }
        }
    }

    #[test]
    fn test_equilibrium_at_rest() {
        let descriptor = Descriptor::d3q27();

        for i_pop in 0..descriptor.q {
            let f_eq = descriptor.equilibrium(i_pop, 1.0, [0.0; D], 0.0);
            assert_relative_eq!(f_eq, descriptor.w[i_pop], epsilon = 1e-12);
        }
    }

    #[test]
    fn test_equilibrium_recovers_density() {
        let descriptor = Descriptor::d3q27();
        let density = 1.05;
        let momentum = [0.02, -0.01, 0.005];
        let j_sqr = momentum.iter().map(|j| j * j).sum::<Float>();

        let total = (0..descriptor.q)
            .map(|i_pop| descriptor.equilibrium(i_pop, density, momentum, j_sqr))
            .sum::<Float>();

        assert_relative_eq!(total, density, epsilon = 1e-12);
    }

    #[test]
    fn test_equilibrium_recovers_momentum() {
        let descriptor = Descriptor::d3q27();
        let density = 0.98;
        let momentum = [0.01, 0.03, -0.02];
        let j_sqr = momentum.iter().map(|j| j * j).sum::<Float>();

        for axis in 0..D {
            let total = (0..descriptor.q)
                .map(|i_pop| {
                    descriptor.equilibrium(i_pop, density, momentum, j_sqr)
                        * (descriptor.c[i_pop][axis] as Float)
                })
                .sum::<Float>();
            assert_relative_eq!(total, momentum[axis], epsilon = 1e-12);
        }
    }

    #[test]
    fn test_rescale_indices_d3q27_east_and_west() {
        let descriptor = Descriptor::d3q27();

        assert_eq!(
            descriptor.rescale_indices(0, 1),
            vec![1, 7, 9, 13, 15, 19, 21, 23, 26]
        );
        assert_eq!(
            descriptor.rescale_indices(0, -1),
            vec![2, 8, 10, 14, 16, 20, 22, 24, 25]
        );
    }

    #[test]
    fn test_rescale_indices_are_exact_subset() {
        let descriptor = Descriptor::d3q19();

        for axis in 0..D {
            for direction in [-1, 1] {
                let indices = descriptor.rescale_indices(axis, direction);
                for i_pop in 0..descriptor.q {
                    let selected = indices.contains(&i_pop);
                    assert_eq!(selected, descriptor.c[i_pop][axis] == direction);
                }
            }
        }
    }

    #[test]
    fn test_rescale_indices_deterministic() {
        let first = Descriptor::d3q27().rescale_indices(2, -1);
        let second = Descriptor::d3q27().rescale_indices(2, -1);

        assert_eq!(first, second);
    }

    #[test]
    fn test_rescale_indices_synthetic_descriptor() {
        let descriptor = Descriptor::new(
            vec![[0, 0, 0], [1, 0, 0], [-1, 0, 0], [0, 1, 0]],
            vec![0.4, 0.2, 0.2, 0.2],
        );

        assert_eq!(descriptor.rescale_indices(0, 1), vec![1]);
        assert_eq!(descriptor.rescale_indices(1, 1), vec![3]);
        assert!(descriptor.rescale_indices(2, 1).is_empty());
        assert!(descriptor.rescale_indices(1, -1).is_empty());
    }
}
