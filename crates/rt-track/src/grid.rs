use rt_core::Image;

use crate::edge::Side;
use crate::predicate::OccupancyQuery;

/// Per-pixel region membership. Occupied cells hold the region marker.
#[derive(Debug, Clone)]
pub struct OccupancyGrid {
    cells: Image<u16>,
    marker: u16,
    count: usize,
}

impl OccupancyGrid {
    /// `marker` must be nonzero; zero denotes a free cell.
    pub fn new(width: usize, height: usize, marker: u16) -> Self {
        debug_assert!(marker != 0, "region marker must be nonzero");
        Self {
            cells: Image::new_fill(width, height, 0),
            marker,
            count: 0,
        }
    }

    pub fn width(&self) -> usize {
        self.cells.width()
    }

    pub fn height(&self) -> usize {
        self.cells.height()
    }

    #[inline]
    pub fn is_free(&self, x: usize, y: usize) -> bool {
        self.cells.data()[self.cells.index_of(x, y)] == 0
    }

    /// Marks the cell occupied. Returns `false` if it already was.
    #[inline]
    pub fn occupy(&mut self, x: usize, y: usize) -> bool {
        let i = self.cells.index_of(x, y);
        let cell = &mut self.cells.data_mut()[i];
        if *cell != 0 {
            return false;
        }
        *cell = self.marker;
        self.count += 1;
        true
    }

    /// Frees the cell. Returns `false` if it already was free.
    #[inline]
    pub fn release(&mut self, x: usize, y: usize) -> bool {
        let i = self.cells.index_of(x, y);
        let cell = &mut self.cells.data_mut()[i];
        if *cell == 0 {
            return false;
        }
        *cell = 0;
        self.count -= 1;
        true
    }

    /// Number of occupied cells.
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn marker(&self) -> u16 {
        self.marker
    }

    pub fn cells(&self) -> &Image<u16> {
        &self.cells
    }

    pub fn clear(&mut self) {
        self.cells.fill(0);
        self.count = 0;
    }
}

impl OccupancyQuery for OccupancyGrid {
    fn width(&self) -> usize {
        self.cells.width()
    }

    fn height(&self) -> usize {
        self.cells.height()
    }

    #[inline]
    fn is_occupied(&self, x: usize, y: usize) -> bool {
        self.cells.get(x, y).is_some_and(|&v| v != 0)
    }

    fn is_occupied_by(&self, x: usize, y: usize, id: u16) -> bool {
        id != 0 && self.cells.get(x, y) == Some(&id)
    }
}

/// Boundary edge masks on the vertex lattice, one vertex larger than the
/// pixel raster in each axis.
#[derive(Debug, Clone)]
pub struct ConnectivityGrid {
    bits: Image<u8>,
}

impl ConnectivityGrid {
    /// Lattice for a `width x height` pixel raster.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            bits: Image::new_fill(width + 1, height + 1, 0),
        }
    }

    pub fn mask(&self, vx: usize, vy: usize) -> u8 {
        self.bits.get(vx, vy).copied().unwrap_or(0)
    }

    /// Records the edge on `side` of pixel `(x, y)`.
    #[inline]
    pub fn mark(&mut self, x: usize, y: usize, side: Side) {
        let (ox, oy) = side.vertex_offset();
        let i = self.bits.index_of(x + ox, y + oy);
        self.bits.data_mut()[i] |= side.bit();
    }

    #[inline]
    pub fn has_edge(&self, x: usize, y: usize, side: Side) -> bool {
        let (ox, oy) = side.vertex_offset();
        self.mask(x + ox, y + oy) & side.bit() != 0
    }

    /// Clears `bit` at the vertex, returning whether it was set.
    #[inline]
    pub fn take(&mut self, vx: usize, vy: usize, bit: u8) -> bool {
        let Some(v) = self.bits.get_mut(vx, vy) else {
            return false;
        };
        if *v & bit == 0 {
            return false;
        }
        *v &= !bit;
        true
    }

    pub fn is_clear(&self) -> bool {
        self.bits.data().iter().all(|&v| v == 0)
    }

    pub fn count_edges(&self) -> usize {
        self.bits
            .data()
            .iter()
            .map(|v| v.count_ones() as usize)
            .sum()
    }

    pub fn bits(&self) -> &Image<u8> {
        &self.bits
    }

    pub fn clear(&mut self) {
        self.bits.fill(0);
    }
}
