use rt_core::{Error, Image};
use rt_track::{OccupancyQuery, RegionPredicate};

/// Accepts pixels whose mask value is nonzero.
#[derive(Debug, Clone)]
pub struct MaskPredicate {
    mask: Image<u8>,
}

impl MaskPredicate {
    pub fn new(mask: Image<u8>) -> Self {
        Self { mask }
    }

    /// Replaces the mask; the new one must have the same size.
    pub fn set_mask(&mut self, mask: Image<u8>) -> Result<(), Error> {
        self.mask.check_dims(mask.width(), mask.height())?;
        self.mask = mask;
        Ok(())
    }

    pub fn mask(&self) -> &Image<u8> {
        &self.mask
    }
}

impl RegionPredicate for MaskPredicate {
    #[inline]
    fn accepts(&self, x: usize, y: usize, _occupancy: &dyn OccupancyQuery) -> bool {
        self.mask.get(x, y).is_some_and(|&v| v != 0)
    }
}

#[cfg(test)]
mod tests {
    use rt_core::{Error, Image};
    use rt_track::{OccupancyGrid, RegionPredicate, RegionTracker, TrackerConfig};

    use super::MaskPredicate;

    fn square_mask(w: usize, h: usize, x0: usize, x1: usize) -> Image<u8> {
        let mut img = Image::new_fill(w, h, 0u8);
        for y in x0..x1 {
            for x in x0..x1 {
                *img.get_mut(x, y).expect("in bounds") = 255;
            }
        }
        img
    }

    #[test]
    fn accepts_nonzero_and_rejects_outside() {
        let grid = OccupancyGrid::new(4, 4, 1);
        let p = MaskPredicate::new(square_mask(4, 4, 1, 3));

        assert!(p.accepts(1, 2, &grid));
        assert!(!p.accepts(0, 2, &grid));
        assert!(!p.accepts(9, 9, &grid));
    }

    #[test]
    fn set_mask_checks_dimensions() {
        let mut p = MaskPredicate::new(square_mask(4, 4, 1, 3));
        assert_eq!(
            p.set_mask(Image::new_fill(5, 4, 0)),
            Err(Error::DimensionMismatch {
                expected: (4, 4),
                actual: (5, 4)
            })
        );
        assert!(p.set_mask(Image::new_fill(4, 4, 0)).is_ok());
        assert!(p.mask().data().iter().all(|&v| v == 0));
    }

    #[test]
    fn tracks_a_shrinking_mask() {
        let p = MaskPredicate::new(square_mask(16, 16, 2, 12));
        let mut t = RegionTracker::new(16, 16, TrackerConfig::default(), p).expect("valid tracker");
        assert_eq!(t.track().region_size, 100);

        t.predicate_mut()
            .set_mask(square_mask(16, 16, 4, 10))
            .expect("same size");
        assert_eq!(t.track().region_size, 36);
    }
}
