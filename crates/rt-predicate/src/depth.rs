use rt_core::{BorderMode, Error, Image, ImageView};
use rt_track::{OccupancyQuery, RegionPredicate};
use serde::{Deserialize, Serialize};

use crate::background::BackgroundModel;

/// Depth gating for [`DepthPredicate`]. Distances are in sensor units
/// (millimetres for common depth cameras).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DepthPredicateConfig {
    pub min_distance: u16,
    pub max_distance: u16,
    /// How far in front of the background a reading must be.
    pub threshold_offset: u16,
    /// Clearance around the region before the background is updated.
    pub background_margin: usize,
    pub background_border: BorderMode,
    pub calibration_frames: usize,
}

impl Default for DepthPredicateConfig {
    fn default() -> Self {
        Self {
            min_distance: 300,
            max_distance: 1300,
            threshold_offset: 40,
            background_margin: 2,
            background_border: BorderMode::Clamp,
            calibration_frames: 30,
        }
    }
}

/// Accepts depth readings inside the configured range that lie clearly in
/// front of the learned background.
///
/// After every tracking step the background is refreshed from the current
/// frame wherever the tracked region is not nearby.
#[derive(Debug, Clone)]
pub struct DepthPredicate {
    config: DepthPredicateConfig,
    frame: Image<u16>,
    background: BackgroundModel,
}

impl DepthPredicate {
    pub fn new(width: usize, height: usize, config: DepthPredicateConfig) -> Self {
        Self {
            frame: Image::new_fill(width, height, 0),
            background: BackgroundModel::new(width, height, config.calibration_frames),
            config,
        }
    }

    /// Uses an existing background model; its size fixes the frame size.
    pub fn with_background(config: DepthPredicateConfig, background: BackgroundModel) -> Self {
        Self {
            frame: Image::new_fill(background.width(), background.height(), 0),
            background,
            config,
        }
    }

    /// Copies `frame` in as the current depth map.
    pub fn set_frame(&mut self, frame: &ImageView<'_, u16>) -> Result<(), Error> {
        self.frame.check_dims(frame.width(), frame.height())?;
        let width = self.frame.width();
        for y in 0..frame.height() {
            let start = self.frame.index_of(0, y);
            self.frame.data_mut()[start..start + width].copy_from_slice(frame.row(y));
        }
        Ok(())
    }

    /// Feeds a calibration frame. Returns `true` once the background is
    /// calibrated.
    pub fn calibrate(&mut self, frame: &ImageView<'_, u16>) -> Result<bool, Error> {
        self.set_frame(frame)?;
        self.background.calibrate(frame)
    }

    pub fn is_calibrated(&self) -> bool {
        self.background.is_calibrated()
    }

    pub fn config(&self) -> &DepthPredicateConfig {
        &self.config
    }

    pub fn frame(&self) -> &Image<u16> {
        &self.frame
    }

    pub fn background(&self) -> &BackgroundModel {
        &self.background
    }

    pub fn background_mut(&mut self) -> &mut BackgroundModel {
        &mut self.background
    }

    fn accepts_reading(&self, d: u16, threshold: u16) -> bool {
        let cfg = &self.config;
        d != 0
            && (cfg.min_distance..=cfg.max_distance).contains(&d)
            && d < threshold
            && threshold - d > cfg.threshold_offset
    }
}

impl RegionPredicate for DepthPredicate {
    #[inline]
    fn accepts(&self, x: usize, y: usize, _occupancy: &dyn OccupancyQuery) -> bool {
        match self.frame.get(x, y) {
            Some(&d) => self.accepts_reading(d, self.background.threshold(x, y)),
            None => false,
        }
    }

    fn observe(&mut self, occupancy: &dyn OccupancyQuery) {
        let result = self.background.update(
            &self.frame.as_view(),
            occupancy,
            self.config.background_margin,
            self.config.background_border,
        );
        match result {
            Ok(updated) => tracing::trace!("background: {} thresholds updated", updated),
            Err(e) => tracing::warn!("background update skipped: {}", e),
        }
    }
}
