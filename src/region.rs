/// Axis-aligned box of grid indices with inclusive bounds, matching the
/// `x0..=x1, y0..=y1, z0..=z1` convention of the rest of the solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Box3D {
    pub x0: usize,
    pub x1: usize,
    pub y0: usize,
    pub y1: usize,
    pub z0: usize,
    pub z1: usize,
}

impl Box3D {
    pub fn new(x0: usize, x1: usize, y0: usize, y1: usize, z0: usize, z1: usize) -> Self {
        assert!(
            x0 <= x1 && y0 <= y1 && z0 <= z1,
            "box bounds must satisfy x0 <= x1, y0 <= y1, z0 <= z1"
        );
        Self {
            x0,
            x1,
            y0,
            y1,
            z0,
            z1,
        }
    }

    pub fn shape(&self) -> [usize; 3] {
        [
            self.x1 - self.x0 + 1,
            self.y1 - self.y0 + 1,
            self.z1 - self.z0 + 1,
        ]
    }

    pub fn num_cells(&self) -> usize {
        let [nx, ny, nz] = self.shape();
        nx * ny * nz
    }

    pub fn contains(&self, index: [usize; 3]) -> bool {
        let [i, j, k] = index;
        i >= self.x0 && i <= self.x1 && j >= self.y0 && j <= self.y1 && k >= self.z0 && k <= self.z1
    }

    /// Single-cell extent along `axis`; inlet, outlet and swap regions must
    /// all satisfy this.
    pub fn is_plane(&self, axis: usize) -> bool {
        self.shape()[axis] == 1
    }

    /// Same shape translated to start at the grid origin. Used to address
    /// the dedicated single-plane swap buffers.
    pub fn at_origin(&self) -> Self {
        let [nx, ny, nz] = self.shape();
        Self::new(0, nx - 1, 0, ny - 1, 0, nz - 1)
    }

    pub fn iter(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        let this = *self;
        (this.x0..=this.x1).flat_map(move |i| {
            (this.y0..=this.y1)
                .flat_map(move |j| (this.z0..=this.z1).map(move |k| [i, j, k]))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_and_num_cells() {
        let region = Box3D::new(2, 2, 0, 3, 1, 5);

        assert_eq!(region.shape(), [1, 4, 5]);
        assert_eq!(region.num_cells(), 20);
        assert_eq!(region.iter().count(), 20);
    }

    #[test]
    fn test_contains_inclusive_bounds() {
        let region = Box3D::new(1, 3, 1, 3, 1, 3);

        assert!(region.contains([1, 1, 1]));
        assert!(region.contains([3, 3, 3]));
        assert!(!region.contains([0, 2, 2]));
        assert!(!region.contains([2, 4, 2]));
    }

    #[test]
    fn test_is_plane() {
        let face = Box3D::new(0, 0, 0, 7, 0, 7);

        assert!(face.is_plane(0));
        assert!(!face.is_plane(1));
        assert!(!face.is_plane(2));
    }

    #[test]
    fn test_at_origin_preserves_shape() {
        let region = Box3D::new(9, 9, 2, 5, 3, 4);
        let origin = region.at_origin();

        assert_eq!(origin, Box3D::new(0, 0, 0, 3, 0, 1));
        assert_eq!(origin.shape(), region.shape());
    }

    #[test]
    fn test_iter_visits_every_index_once() {
        let region = Box3D::new(0, 1, 0, 1, 0, 1);
        let indices: Vec<_> = region.iter().collect();

        assert_eq!(indices.len(), 8);
        for index in region.iter() {
            assert_eq!(indices.iter().filter(|&&x| x == index).count(), 1);
        }
    }
}
