use crate::global_variables::*;
use crate::region::Box3D;

/// Dense density snapshot over a grid-shaped index space. The periodic
/// pressure manager allocates these once and overwrites them every step.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarField3D {
    pub nx: usize,
    pub ny: usize,
    pub nz: usize,
    pub data: Vec<Float>,
}

/// Dense velocity snapshot, one 3-vector per grid point.
#[derive(Debug, Clone, PartialEq)]
pub struct TensorField3D {
    pub nx: usize,
    pub ny: usize,
    pub nz: usize,
    pub data: Vec<[Float; 3]>,
}

fn linear_index(nx: usize, ny: usize, index: [usize; 3]) -> usize {
    let [i, j, k] = index;
    i + nx * j + nx * ny * k
}

impl ScalarField3D {
    pub fn new(nx: usize, ny: usize, nz: usize) -> Self {
        Self {
            nx,
            ny,
            nz,
            data: vec![0.0; nx * ny * nz],
        }
    }

    pub fn sized_to(region: &Box3D) -> Self {
        let [nx, ny, nz] = region.shape();
        Self::new(nx, ny, nz)
    }

    pub fn get(&self, index: [usize; 3]) -> Float {
        self.data[linear_index(self.nx, self.ny, index)]
    }

    pub fn set(&mut self, index: [usize; 3], value: Float) {
        let i = linear_index(self.nx, self.ny, index);
        self.data[i] = value;
    }

    /// Copies `src_box` of `src` onto `dst_box` of `self`, point for point.
    /// The two boxes must have the same shape.
    pub fn copy_region_from(&mut self, src: &ScalarField3D, src_box: &Box3D, dst_box: &Box3D) {
        assert_eq!(
            src_box.shape(),
            dst_box.shape(),
            "region copy requires matching box shapes"
        );
        for (from, to) in src_box.iter().zip(dst_box.iter()) {
            self.set(to, src.get(from));
        }
    }

    /// In-place variant used when source and destination live in the same
    /// field. The two boxes must not overlap.
    pub fn copy_region(&mut self, src_box: &Box3D, dst_box: &Box3D) {
        assert_eq!(
            src_box.shape(),
            dst_box.shape(),
            "region copy requires matching box shapes"
        );
        for (from, to) in src_box.iter().zip(dst_box.iter()) {
            let value = self.get(from);
            self.set(to, value);
        }
    }

    pub fn average(&self, region: &Box3D) -> Float {
        let sum = region.iter().map(|index| self.get(index)).sum::<Float>();
        sum / (region.num_cells() as Float)
    }
}

impl TensorField3D {
    pub fn new(nx: usize, ny: usize, nz: usize) -> Self {
        Self {
            nx,
            ny,
            nz,
            data: vec![[0.0; 3]; nx * ny * nz],
        }
    }

    pub fn sized_to(region: &Box3D) -> Self {
        let [nx, ny, nz] = region.shape();
        Self::new(nx, ny, nz)
    }

    pub fn get(&self, index: [usize; 3]) -> [Float; 3] {
        self.data[linear_index(self.nx, self.ny, index)]
    }

    pub fn set(&mut self, index: [usize; 3], value: [Float; 3]) {
        let i = linear_index(self.nx, self.ny, index);
        self.data[i] = value;
    }

    pub fn copy_region_from(&mut self, src: &TensorField3D, src_box: &Box3D, dst_box: &Box3D) {
        assert_eq!(
            src_box.shape(),
            dst_box.shape(),
            "region copy requires matching box shapes"
        );
        for (from, to) in src_box.iter().zip(dst_box.iter()) {
            self.set(to, src.get(from));
        }
    }

    pub fn copy_region(&mut self, src_box: &Box3D, dst_box: &Box3D) {
        assert_eq!(
            src_box.shape(),
            dst_box.shape(),
            "region copy requires matching box shapes"
        );
        for (from, to) in src_box.iter().zip(dst_box.iter()) {
            let value = self.get(from);
            self.set(to, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_average_of_uniform_field() {
        for n in [1, 2, 5] {
            let mut rho = ScalarField3D::new(n, n, n);
            let region = Box3D::new(0, n - 1, 0, n - 1, 0, n - 1);
            for index in region.iter() {
                rho.set(index, 0.87);
            }

            assert_relative_eq!(rho.average(&region), 0.87, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_average_is_arithmetic_mean() {
        let mut rho = ScalarField3D::new(4, 1, 1);
        let region = Box3D::new(0, 3, 0, 0, 0, 0);
        for (n, index) in region.iter().enumerate() {
            rho.set(index, (n + 1) as Float);
        }

        assert_relative_eq!(rho.average(&region), 2.5, epsilon = 1e-12);
    }

    #[test]
    fn test_scalar_copy_between_regions() {
        let mut rho = ScalarField3D::new(3, 2, 2);
        let west = Box3D::new(0, 0, 0, 1, 0, 1);
        let east = Box3D::new(2, 2, 0, 1, 0, 1);
        for index in west.iter() {
            rho.set(index, 1.25);
        }

        let source = rho.clone();
        rho.copy_region_from(&source, &west, &east);

        for index in east.iter() {
            assert_relative_eq!(rho.get(index), 1.25, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_tensor_copy_into_face_buffer() {
        let mut u = TensorField3D::new(4, 3, 3);
        let face = Box3D::new(3, 3, 0, 2, 0, 2);
        for index in face.iter() {
            u.set(index, [0.1, -0.2, 0.3]);
        }

        let mut buffer = TensorField3D::sized_to(&face);
        buffer.copy_region_from(&u, &face, &face.at_origin());

        for index in face.at_origin().iter() {
            assert_eq!(buffer.get(index), [0.1, -0.2, 0.3]);
        }
    }
}
