/// Read-only view of the tracked region's occupancy.
///
/// Coordinates outside the raster are never occupied.
pub trait OccupancyQuery {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn is_occupied(&self, x: usize, y: usize) -> bool;
    fn is_occupied_by(&self, x: usize, y: usize, id: u16) -> bool;
}

/// Acceptance test deciding which pixels belong to the region.
pub trait RegionPredicate {
    fn accepts(&self, x: usize, y: usize, occupancy: &dyn OccupancyQuery) -> bool;

    /// Called once at the end of every tracking step, after the boundary has
    /// been extracted.
    fn observe(&mut self, _occupancy: &dyn OccupancyQuery) {}
}

impl<P: RegionPredicate + ?Sized> RegionPredicate for Box<P> {
    fn accepts(&self, x: usize, y: usize, occupancy: &dyn OccupancyQuery) -> bool {
        (**self).accepts(x, y, occupancy)
    }

    fn observe(&mut self, occupancy: &dyn OccupancyQuery) {
        (**self).observe(occupancy);
    }
}

/// Adapts a coordinate closure that ignores occupancy.
#[derive(Debug, Clone, Copy)]
pub struct FnPredicate<F>(pub F);

impl<F: Fn(usize, usize) -> bool> RegionPredicate for FnPredicate<F> {
    #[inline]
    fn accepts(&self, x: usize, y: usize, _occupancy: &dyn OccupancyQuery) -> bool {
        (self.0)(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::{FnPredicate, OccupancyQuery, RegionPredicate};
    use crate::OccupancyGrid;

    struct Counting {
        observed: usize,
    }

    impl RegionPredicate for Counting {
        fn accepts(&self, x: usize, _y: usize, occupancy: &dyn OccupancyQuery) -> bool {
            x + 1 < occupancy.width()
        }

        fn observe(&mut self, _occupancy: &dyn OccupancyQuery) {
            self.observed += 1;
        }
    }

    #[test]
    fn closure_predicate_ignores_occupancy() {
        let grid = OccupancyGrid::new(3, 3, 1);
        let p = FnPredicate(|x: usize, y: usize| x == y);
        assert!(p.accepts(2, 2, &grid));
        assert!(!p.accepts(2, 1, &grid));
    }

    #[test]
    fn boxed_predicate_forwards_both_hooks() {
        let grid = OccupancyGrid::new(4, 2, 1);
        let mut boxed: Box<Counting> = Box::new(Counting { observed: 0 });

        assert!(boxed.accepts(2, 0, &grid));
        assert!(!boxed.accepts(3, 0, &grid));
        RegionPredicate::observe(&mut boxed, &grid);
        assert_eq!(boxed.observed, 1);
    }
}
