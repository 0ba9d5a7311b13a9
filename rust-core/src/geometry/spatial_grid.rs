// Uniform cell list for fixed-radius neighbour queries
//
// Space spanned by the points is cut into cubic cells whose side is at least the
// query radius, so a query only visits the 3x3x3 block of cells around the point.
// Points are stored sorted by cell (counting sort), cell_start[c]..cell_start[c+1]
// indexes the members of cell c.

use nalgebra::Vector3;

use crate::geometry::bounding_box::BoundingBox3D;

// Upper bound on the number of cells per axis
const MAX_CELLS_PER_AXIS: usize = 256;
// Upper bound on the number of cells per indexed point; sparse clouds get
// coarser cells instead of mostly empty ones
const MAX_CELLS_PER_POINT: usize = 8;

#[derive(Debug, Clone)]
pub struct SpatialGrid {
    origin: Vector3<f64>,
    cell_size: f64,
    dims: [usize; 3],
    /// cell_start[c] = first slot of cell c in `sorted`, length = n_cells + 1
    cell_start: Vec<usize>,
    /// particle indices sorted by cell
    sorted: Vec<usize>,
}

fn grid_dims(extent: &Vector3<f64>, cell_size: f64) -> [usize; 3] {
    [0, 1, 2].map(|k| {
        let cells = (extent[k] / cell_size).floor() as usize;
        cells.saturating_add(1).min(MAX_CELLS_PER_AXIS)
    })
}

impl SpatialGrid {
    /// Build a grid over `positions` tuned for queries of radius `cutoff`.
    pub fn build(positions: &[Vector3<f64>], cutoff: f64) -> Self {
        let bb = BoundingBox3D::from_points(positions)
            .unwrap_or_else(|| BoundingBox3D::new(Vector3::zeros(), Vector3::zeros()));
        let extent = bb.size();
        let longest = extent.max();

        // Cells never smaller than the cutoff, never more than MAX_CELLS_PER_AXIS per
        // axis and never more than MAX_CELLS_PER_POINT per point in total
        let mut cell_size = cutoff.max(f64::MIN_POSITIVE);
        if longest / cell_size > MAX_CELLS_PER_AXIS as f64 {
            cell_size = longest / MAX_CELLS_PER_AXIS as f64;
        }
        let max_cells = positions.len().max(1) * MAX_CELLS_PER_POINT;
        let mut dims = grid_dims(&extent, cell_size);
        while dims.iter().product::<usize>() > max_cells {
            let excess = dims.iter().product::<usize>() as f64 / max_cells as f64;
            cell_size *= excess.cbrt().max(1.1);
            dims = grid_dims(&extent, cell_size);
        }
        let n_cells = dims[0] * dims[1] * dims[2];

        let mut grid = SpatialGrid {
            origin: bb.min,
            cell_size,
            dims,
            cell_start: vec![0; n_cells + 1],
            sorted: vec![0; positions.len()],
        };

        let cell_ids: Vec<usize> = positions
            .iter()
            .map(|p| grid.cell_id(&grid.cell_of(p)))
            .collect();

        for &c in &cell_ids {
            grid.cell_start[c + 1] += 1;
        }
        for c in 0..n_cells {
            grid.cell_start[c + 1] += grid.cell_start[c];
        }
        let mut fill = grid.cell_start.clone();
        for (i, &c) in cell_ids.iter().enumerate() {
            grid.sorted[fill[c]] = i;
            fill[c] += 1;
        }
        grid
    }

    pub fn len(&self) -> usize {
        self.sorted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    pub fn dims(&self) -> [usize; 3] {
        self.dims
    }

    pub fn n_cells(&self) -> usize {
        self.cell_start.len() - 1
    }

    fn cell_of(&self, p: &Vector3<f64>) -> [i64; 3] {
        [0, 1, 2].map(|k| ((p[k] - self.origin[k]) / self.cell_size).floor() as i64)
    }

    fn cell_id(&self, cell: &[i64; 3]) -> usize {
        let c = [0, 1, 2].map(|k| cell[k].clamp(0, self.dims[k] as i64 - 1) as usize);
        c[0] + self.dims[0] * (c[1] + self.dims[1] * c[2])
    }

    /// Calls `f(j, distance²)` for every indexed point `j` with
    /// |positions[j] - point| < radius.
    ///
    /// `positions` must be the slice the grid was built from. The point itself
    /// is reported if it belongs to the grid; callers drop self pairs.
    pub fn for_each_within<F>(
        &self,
        positions: &[Vector3<f64>],
        point: &Vector3<f64>,
        radius: f64,
        mut f: F,
    ) where
        F: FnMut(usize, f64),
    {
        if self.sorted.is_empty() {
            return;
        }
        let radius_sq = radius * radius;
        let lo = self.cell_of(&point.add_scalar(-radius));
        let hi = self.cell_of(&point.add_scalar(radius));
        // Out-of-range cells collapse onto the border cells, which hold every clamped point
        let clamp = |v: i64, k: usize| v.clamp(0, self.dims[k] as i64 - 1);
        for cz in clamp(lo[2], 2)..=clamp(hi[2], 2) {
            for cy in clamp(lo[1], 1)..=clamp(hi[1], 1) {
                for cx in clamp(lo[0], 0)..=clamp(hi[0], 0) {
                    let c = self.cell_id(&[cx, cy, cz]);
                    for &j in &self.sorted[self.cell_start[c]..self.cell_start[c + 1]] {
                        let d2 = (positions[j] - point).norm_squared();
                        if d2 < radius_sq {
                            f(j, d2);
                        }
                    }
                }
            }
        }
    }

    /// All unordered pairs (i < j) closer than `cutoff`, sorted.
    pub fn pairs_within(&self, positions: &[Vector3<f64>], cutoff: f64) -> Vec<(usize, usize)> {
        let mut pairs = Vec::new();
        for (i, p) in positions.iter().enumerate() {
            self.for_each_within(positions, p, cutoff, |j, _| {
                if j > i {
                    pairs.push((i, j));
                }
            });
        }
        pairs.sort_unstable();
        pairs
    }
}
