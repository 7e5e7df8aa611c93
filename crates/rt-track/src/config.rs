use serde::{Deserialize, Serialize};

/// Largest accepted raster side. Boundary vertices run to `side` inclusive
/// and are stored as `i32`; candidate stacks store coordinates as `u32`.
pub const MAX_RASTER_SIDE: usize = (i32::MAX - 1) as usize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Column spacing of the seed scan.
    pub seed_stride_x: usize,
    /// Row spacing of the seed scan.
    pub seed_stride_y: usize,
    /// Keep one traced vertex out of every `decimation`.
    pub decimation: usize,
    /// Point count of every resampled line.
    pub resample_target: usize,
    /// Raw lines shorter than this are not resampled.
    pub min_resample_points: usize,
    /// Marker written into occupied cells.
    pub region_id: u16,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            seed_stride_x: 1,
            seed_stride_y: 1,
            decimation: 5,
            resample_target: 1024,
            min_resample_points: 10,
            region_id: 1,
        }
    }
}

impl TrackerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.seed_stride_x == 0 || self.seed_stride_y == 0 {
            return Err(ConfigError::ZeroSeedStride);
        }
        if self.decimation == 0 {
            return Err(ConfigError::ZeroDecimation);
        }
        if self.resample_target == 0 {
            return Err(ConfigError::ZeroResampleTarget);
        }
        if self.region_id == 0 {
            return Err(ConfigError::ZeroRegionId);
        }
        Ok(())
    }
}

/// Checks that a `width x height` raster can be tracked.
pub fn validate_raster(width: usize, height: usize) -> Result<(), ConfigError> {
    if width == 0 || height == 0 {
        return Err(ConfigError::EmptyRaster { width, height });
    }
    let fits = width <= MAX_RASTER_SIDE
        && height <= MAX_RASTER_SIDE
        && (width + 1).checked_mul(height + 1).is_some();
    if !fits {
        return Err(ConfigError::RasterTooLarge { width, height });
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    EmptyRaster { width: usize, height: usize },
    RasterTooLarge { width: usize, height: usize },
    ZeroSeedStride,
    ZeroDecimation,
    ZeroResampleTarget,
    ZeroRegionId,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyRaster { width, height } => {
                write!(f, "raster must be non-empty, got {width}x{height}")
            }
            Self::RasterTooLarge { width, height } => {
                write!(f, "raster {width}x{height} exceeds the coordinate range")
            }
            Self::ZeroSeedStride => write!(f, "seed stride must be at least 1 in both axes"),
            Self::ZeroDecimation => write!(f, "decimation must be at least 1"),
            Self::ZeroResampleTarget => write!(f, "resample target must be at least 1"),
            Self::ZeroRegionId => write!(f, "region id must be nonzero"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::{ConfigError, MAX_RASTER_SIDE, TrackerConfig, validate_raster};

    #[test]
    fn defaults_are_valid() {
        let cfg = TrackerConfig::default();
        assert_eq!(cfg.decimation, 5);
        assert_eq!(cfg.resample_target, 1024);
        assert_eq!(cfg.min_resample_points, 10);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn zero_fields_are_rejected() {
        let cases = [
            (
                TrackerConfig {
                    seed_stride_y: 0,
                    ..TrackerConfig::default()
                },
                ConfigError::ZeroSeedStride,
            ),
            (
                TrackerConfig {
                    decimation: 0,
                    ..TrackerConfig::default()
                },
                ConfigError::ZeroDecimation,
            ),
            (
                TrackerConfig {
                    resample_target: 0,
                    ..TrackerConfig::default()
                },
                ConfigError::ZeroResampleTarget,
            ),
            (
                TrackerConfig {
                    region_id: 0,
                    ..TrackerConfig::default()
                },
                ConfigError::ZeroRegionId,
            ),
        ];

        for (cfg, expected) in cases {
            assert_eq!(cfg.validate(), Err(expected));
        }
    }

    #[test]
    fn raster_bounds() {
        assert!(validate_raster(640, 480).is_ok());
        assert_eq!(
            validate_raster(0, 480),
            Err(ConfigError::EmptyRaster {
                width: 0,
                height: 480
            })
        );
        assert!(matches!(
            validate_raster(MAX_RASTER_SIDE + 1, 1),
            Err(ConfigError::RasterTooLarge { .. })
        ));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg: TrackerConfig =
            serde_json::from_str(r#"{ "decimation": 2 }"#).expect("valid json");
        assert_eq!(cfg.decimation, 2);
        assert_eq!(cfg.seed_stride_x, 1);
        assert_eq!(cfg.resample_target, 1024);
    }
}
