use rt_core::{BorderMode, Error, Image, ImageView, window};
use rt_track::OccupancyQuery;

/// Per-pixel background depth thresholds.
///
/// Thresholds start at zero and are learned by averaging: first over a fixed
/// number of calibration frames, then, while tracking, from every pixel whose
/// neighborhood is clear of the tracked region. A reading of `0` means "no
/// value" and never updates a threshold.
#[derive(Debug, Clone)]
pub struct BackgroundModel {
    thresholds: Image<u16>,
    calibration_frames: usize,
    frames_seen: usize,
}

impl BackgroundModel {
    pub fn new(width: usize, height: usize, calibration_frames: usize) -> Self {
        Self {
            thresholds: Image::new_fill(width, height, 0),
            calibration_frames,
            frames_seen: 0,
        }
    }

    /// Starts from known thresholds; the model counts as calibrated.
    pub fn from_thresholds(thresholds: Image<u16>) -> Self {
        Self {
            thresholds,
            calibration_frames: 0,
            frames_seen: 0,
        }
    }

    pub fn width(&self) -> usize {
        self.thresholds.width()
    }

    pub fn height(&self) -> usize {
        self.thresholds.height()
    }

    /// Blends `frame` into every threshold while calibration is running.
    ///
    /// Returns `true` once the configured number of frames has been seen;
    /// later calls leave the thresholds untouched.
    pub fn calibrate(&mut self, frame: &ImageView<'_, u16>) -> Result<bool, Error> {
        self.thresholds.check_dims(frame.width(), frame.height())?;
        if self.is_calibrated() {
            return Ok(true);
        }

        let width = self.thresholds.width();
        for y in 0..frame.height() {
            let start = self.thresholds.index_of(0, y);
            let row = &mut self.thresholds.data_mut()[start..start + width];
            for (t, &v) in row.iter_mut().zip(frame.row(y)) {
                *t = blend(*t, v);
            }
        }
        self.frames_seen += 1;

        if self.is_calibrated() {
            tracing::info!(
                "background calibrated from {} frames",
                self.calibration_frames
            );
        }
        Ok(self.is_calibrated())
    }

    pub fn is_calibrated(&self) -> bool {
        self.frames_seen >= self.calibration_frames
    }

    pub fn calibration_progress(&self) -> (usize, usize) {
        (self.frames_seen, self.calibration_frames)
    }

    /// Restarts calibration without clearing the thresholds.
    pub fn restart_calibration(&mut self) {
        self.frames_seen = 0;
    }

    /// Blends `frame` into the thresholds of pixels with no occupied pixel
    /// within `margin` (Chebyshev distance).
    ///
    /// `border` decides what happens to windows that reach past the raster:
    /// [`BorderMode::Clamp`] checks the part inside, [`BorderMode::Skip`]
    /// leaves those pixels alone. Returns the number of thresholds updated.
    pub fn update(
        &mut self,
        frame: &ImageView<'_, u16>,
        occupancy: &dyn OccupancyQuery,
        margin: usize,
        border: BorderMode,
    ) -> Result<usize, Error> {
        let (width, height) = self.thresholds.dims();
        self.thresholds.check_dims(frame.width(), frame.height())?;
        self.thresholds
            .check_dims(occupancy.width(), occupancy.height())?;

        let counts = OccupiedCounts::new(occupancy);
        let mut updated = 0;

        for y in 0..height {
            let Some(rows) = window(y, margin, height, border) else {
                continue;
            };
            let row = frame.row(y);
            for x in 0..width {
                let v = row[x];
                if v == 0 {
                    continue;
                }
                let Some(cols) = window(x, margin, width, border) else {
                    continue;
                };
                if counts.in_rect(cols, rows.clone()) != 0 {
                    continue;
                }

                let i = self.thresholds.index_of(x, y);
                let t = &mut self.thresholds.data_mut()[i];
                *t = blend(*t, v);
                updated += 1;
            }
        }

        Ok(updated)
    }

    #[inline]
    pub fn threshold(&self, x: usize, y: usize) -> u16 {
        self.thresholds.get(x, y).copied().unwrap_or(0)
    }

    pub fn thresholds(&self) -> &Image<u16> {
        &self.thresholds
    }
}

#[inline]
fn blend(t: u16, v: u16) -> u16 {
    ((u32::from(t) + u32::from(v)) / 2) as u16
}

/// Summed-area table of occupied pixels.
struct OccupiedCounts {
    stride: usize,
    sums: Vec<u32>,
}

impl OccupiedCounts {
    fn new(occupancy: &dyn OccupancyQuery) -> Self {
        let (w, h) = (occupancy.width(), occupancy.height());
        let stride = w + 1;
        let mut sums = vec![0u32; stride * (h + 1)];

        for y in 0..h {
            let mut run = 0u32;
            for x in 0..w {
                run += u32::from(occupancy.is_occupied(x, y));
                sums[(y + 1) * stride + x + 1] = sums[y * stride + x + 1] + run;
            }
        }

        Self { stride, sums }
    }

    fn in_rect(
        &self,
        cols: core::ops::RangeInclusive<usize>,
        rows: core::ops::RangeInclusive<usize>,
    ) -> u32 {
        let (x0, x1) = (*cols.start(), *cols.end() + 1);
        let (y0, y1) = (*rows.start(), *rows.end() + 1);
        let at = |x: usize, y: usize| self.sums[y * self.stride + x];
        at(x1, y1) + at(x0, y0) - at(x0, y1) - at(x1, y0)
    }
}

#[cfg(test)]
mod tests {
    use rt_core::{BorderMode, Error, Image};
    use rt_track::OccupancyGrid;

    use super::BackgroundModel;

    fn flat(w: usize, h: usize, v: u16) -> Image<u16> {
        Image::new_fill(w, h, v)
    }

    #[test]
    fn calibration_averages_the_configured_frames() {
        let mut bg = BackgroundModel::new(3, 2, 2);
        assert!(!bg.is_calibrated());

        assert!(!bg.calibrate(&flat(3, 2, 1000).as_view()).expect("same size"));
        assert_eq!(bg.threshold(0, 0), 500);
        assert!(bg.calibrate(&flat(3, 2, 1000).as_view()).expect("same size"));
        assert_eq!(bg.threshold(2, 1), 750);
        assert_eq!(bg.calibration_progress(), (2, 2));

        assert!(bg.calibrate(&flat(3, 2, 0).as_view()).expect("same size"));
        assert_eq!(bg.threshold(2, 1), 750, "calibrated model ignores frames");

        bg.restart_calibration();
        assert!(!bg.is_calibrated());
    }

    #[test]
    fn calibration_rejects_other_sizes() {
        let mut bg = BackgroundModel::new(3, 2, 1);
        assert_eq!(
            bg.calibrate(&flat(2, 3, 0).as_view()),
            Err(Error::DimensionMismatch {
                expected: (3, 2),
                actual: (2, 3)
            })
        );
    }

    #[test]
    fn update_skips_pixels_near_the_region_and_missing_readings() {
        let mut bg = BackgroundModel::from_thresholds(flat(9, 9, 1000));
        let mut occupancy = OccupancyGrid::new(9, 9, 1);
        occupancy.occupy(4, 4);

        let mut frame = flat(9, 9, 2000);
        *frame.get_mut(0, 0).expect("in bounds") = 0;

        let updated = bg
            .update(&frame.as_view(), &occupancy, 2, BorderMode::Clamp)
            .expect("same size");

        // 5x5 block around the region plus the missing reading.
        assert_eq!(updated, 81 - 25 - 1);
        assert_eq!(bg.threshold(4, 4), 1000);
        assert_eq!(bg.threshold(2, 6), 1000);
        assert_eq!(bg.threshold(1, 4), 1500);
        assert_eq!(bg.threshold(0, 0), 1000);
        assert_eq!(bg.threshold(8, 8), 1500);
    }

    #[test]
    fn skip_border_leaves_the_rim_alone() {
        let mut bg = BackgroundModel::from_thresholds(flat(6, 5, 100));
        let occupancy = OccupancyGrid::new(6, 5, 1);

        let updated = bg
            .update(&flat(6, 5, 300).as_view(), &occupancy, 1, BorderMode::Skip)
            .expect("same size");

        assert_eq!(updated, 4 * 3);
        assert_eq!(bg.threshold(0, 2), 100);
        assert_eq!(bg.threshold(1, 1), 200);
        assert_eq!(bg.threshold(4, 3), 200);
        assert_eq!(bg.threshold(5, 3), 100);
    }
}
